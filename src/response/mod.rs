//! Normalized replies of the Parcel DE Shipping API.
//!
//! The API answers with several document shapes: a multi-shipment `items`
//! list, legacy container keys, RFC 7807 problem documents, and manifest
//! payloads. [`Response::from_value`] reduces all of them to one model and
//! never fails on missing or oddly typed keys.
//!
//! # Example
//!
//! ```
//! use versand::response::{Response, StatusCode};
//!
//! let reply = serde_json::json!({
//!     "status": {"statusCode": 200, "title": "OK"},
//!     "items": [{
//!         "shipmentNo": "123",
//!         "sstatus": {"statusCode": 200, "title": "OK"},
//!         "label": {"url": "https://x/label?token=abcdef123"}
//!     }]
//! });
//! let response = Response::from_value(&reply);
//! assert_eq!(response.status_code(), StatusCode::NoError);
//! assert_eq!(response.shipment_number(), Some("123"));
//! assert_eq!(response.token(), Some("abcdef123"));
//! ```

mod label_data;
mod raw;
mod status;

pub use label_data::{LabelData, token_from_url};
pub use status::StatusCode;

use serde::Deserialize;
use serde_json::Value;

use crate::core::VersandError;
use raw::{RawReply, Text, TopStatus};

/// Status message set when a weak warning turns out to cover no failing
/// shipment.
pub const NO_ERROR_MESSAGE: &str = "Der Webservice wurde ohne Fehler ausgeführt.";

/// A normalized reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    status_code: StatusCode,
    status_text: Option<String>,
    status_message: Option<String>,
    block_type: Option<String>,
    manifest_data: Option<String>,
    label_data: Vec<LabelData>,
}

/// Where the per-shipment entries of a reply live.
enum Container<'a> {
    Items(&'a Value),
    DeletionState(&'a Value),
    LabelData(&'a Value),
    ValidationState(&'a Value),
    ExportDocData(&'a Value),
    /// The document itself is the single entry.
    WholeDocument(&'a Value),
}

impl<'a> Container<'a> {
    fn select(raw: &'a RawReply, document: &'a Value) -> Option<Self> {
        if let Some(v) = &raw.items {
            Some(Self::Items(v))
        } else if let Some(v) = &raw.deletion_state {
            Some(Self::DeletionState(v))
        } else if let Some(v) = &raw.label_data {
            Some(Self::LabelData(v))
        } else if let Some(v) = &raw.validation_state {
            Some(Self::ValidationState(v))
        } else if let Some(v) = &raw.export_doc_data {
            Some(Self::ExportDocData(v))
        } else if raw.manifest_date.is_some() {
            Some(Self::WholeDocument(document))
        } else {
            None
        }
    }

    fn entries(&self) -> Vec<LabelData> {
        let value = match self {
            Self::Items(v)
            | Self::DeletionState(v)
            | Self::LabelData(v)
            | Self::ValidationState(v)
            | Self::ExportDocData(v)
            | Self::WholeDocument(v) => *v,
        };
        match value {
            Value::Array(entries) => entries.iter().map(LabelData::from_value).collect(),
            single => vec![LabelData::from_value(single)],
        }
    }
}

impl Response {
    /// Normalize a decoded reply document.
    ///
    /// Only builds the model; call [`validate_status_code`](Self::validate_status_code)
    /// to reconcile the overall status with the per-shipment results.
    pub fn from_value(document: &Value) -> Self {
        let raw = match document {
            Value::Object(_) => RawReply::deserialize(document).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "reply document only partially understood");
                RawReply::default()
            }),
            _ => {
                tracing::warn!("reply is not a JSON object");
                RawReply::default()
            }
        };

        let mut response = Self::default();
        response.read_status(&raw);

        if let Some(manifest) = &raw.manifest {
            response.manifest_data = manifest.payload();
            tracing::debug!(status = %response.status_code, "manifest reply");
            return response;
        }

        if let Some(container) = Container::select(&raw, document) {
            response.label_data = container.entries();
        }
        tracing::debug!(
            status = %response.status_code,
            entries = response.label_data.len(),
            "reply normalized"
        );
        response
    }

    /// Decode and normalize a reply body.
    pub fn from_slice(body: &[u8]) -> Result<Self, VersandError> {
        let document: Value =
            serde_json::from_slice(body).map_err(|e| VersandError::Decode(e.to_string()))?;
        Ok(Self::from_value(&document))
    }

    /// Degenerate response standing in for a request that never got a reply.
    pub fn from_error(error: &VersandError) -> Self {
        Self {
            status_message: Some(error.to_string()),
            ..Self::default()
        }
    }

    fn read_status(&mut self, raw: &RawReply) {
        let text = |t: &Option<Text>| t.as_ref().and_then(|t| t.joined(";"));
        match &raw.status {
            Some(TopStatus::Object(status)) => {
                if let Some(code) = status.status_code.as_ref().and_then(Text::code) {
                    self.status_code = StatusCode::from_code(code);
                }
                self.status_text = text(&status.title).or_else(|| text(&raw.title));
                self.status_message = text(&status.detail).or_else(|| text(&raw.detail));
            }
            Some(TopStatus::Code(code)) => {
                if let Some(code) = code.code() {
                    self.status_code = StatusCode::from_code(code);
                }
                self.status_text = text(&raw.title);
                self.status_message = text(&raw.detail);
            }
            None => {
                if let Some(code) = raw.status_code.as_ref().and_then(Text::code) {
                    self.status_code = StatusCode::from_code(code);
                    self.status_text = text(&raw.title);
                    self.status_message = text(&raw.detail);
                }
            }
        }
        self.block_type = text(&raw.block_type);
    }

    /// Reconcile the overall status with the per-shipment results.
    ///
    /// - "No error" without the text `OK` becomes a weak warning.
    /// - With exactly one shipment, its code and text replace the overall
    ///   ones.
    /// - With several shipments, a weak warning becomes "no error" when every
    ///   shipment reports no error. Mixed results keep the overall status;
    ///   the per-shipment details stay in [`label_data`](Self::label_data).
    pub fn validate_status_code(&mut self) {
        if self.status_code == StatusCode::NoError && self.status_text.as_deref() != Some("OK") {
            self.status_code = StatusCode::WeakWarning;
        }

        if let [single] = self.label_data.as_slice() {
            self.status_code = single.status_code;
            self.status_text = single.status_text.clone();
        } else if self.status_code == StatusCode::WeakWarning
            && self.label_data.iter().all(|l| l.status_code.is_no_error())
        {
            self.status_code = StatusCode::NoError;
            self.status_text = Some("OK".to_string());
            self.status_message = Some(NO_ERROR_MESSAGE.to_string());
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status_text.as_deref()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// `type` URI of a problem document.
    pub fn block_type(&self) -> Option<&str> {
        self.block_type.as_deref()
    }

    /// Base64 (or URL) of the manifest document.
    pub fn manifest_data(&self) -> Option<&str> {
        self.manifest_data.as_deref()
    }

    pub fn label_data(&self) -> &[LabelData] {
        &self.label_data
    }

    fn first(&self) -> Option<&LabelData> {
        self.label_data.first()
    }

    /// Shipment number of the first shipment.
    pub fn shipment_number(&self) -> Option<&str> {
        self.first().and_then(|l| l.shipment_number.as_deref())
    }

    pub fn shipment_ref_no(&self) -> Option<&str> {
        self.first().and_then(|l| l.shipment_ref_no.as_deref())
    }

    pub fn label(&self) -> Option<&str> {
        self.first().and_then(|l| l.label.as_deref())
    }

    pub fn return_label(&self) -> Option<&str> {
        self.first().and_then(|l| l.return_label.as_deref())
    }

    pub fn export_doc(&self) -> Option<&str> {
        self.first().and_then(|l| l.export_doc.as_deref())
    }

    pub fn cod_label(&self) -> Option<&str> {
        self.first().and_then(|l| l.cod_label.as_deref())
    }

    pub fn token(&self) -> Option<&str> {
        self.first().and_then(|l| l.token.as_deref())
    }
}
