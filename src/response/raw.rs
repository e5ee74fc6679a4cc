//! Lenient mirrors of the reply documents.
//!
//! Every leaf accepts any JSON type so that one odd field never takes the
//! rest of a document down with it. Conversions to strings and codes happen
//! in the model types.

use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn text(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }

    fn code(&self) -> Option<i64> {
        match self {
            Self::Str(s) => s.trim().parse().ok(),
            Self::Int(i) => Some(*i),
            Self::Float(f) => Some(*f as i64),
            Self::Bool(_) => None,
        }
    }
}

/// A field that is usually a string but may come as a number or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Text {
    One(Scalar),
    Many(Vec<Scalar>),
    Other(IgnoredAny),
}

impl Text {
    /// String value; lists are joined with `sep`.
    pub(crate) fn joined(&self, sep: &str) -> Option<String> {
        match self {
            Self::One(s) => Some(s.text()),
            Self::Many(items) => Some(
                items
                    .iter()
                    .map(Scalar::text)
                    .collect::<Vec<_>>()
                    .join(sep),
            ),
            Self::Other(_) => None,
        }
    }

    pub(crate) fn code(&self) -> Option<i64> {
        match self {
            Self::One(s) => s.code(),
            _ => None,
        }
    }
}

/// A nested document, or anything else in its place.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Lenient<T> {
    Value(T),
    Other(IgnoredAny),
}

impl<T> Lenient<T> {
    pub(crate) fn get(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Other(_) => None,
        }
    }
}

/// `{statusCode, title, detail}` block, top-level `status` or per-item
/// `sstatus`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RawStatus {
    pub status_code: Option<Text>,
    pub title: Option<Text>,
    pub detail: Option<Text>,
}

/// Top-level `status`: an object, or a bare code in problem documents.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TopStatus {
    Object(RawStatus),
    Code(Text),
}

/// A label or document in one of its three representations.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RawDocument {
    pub url: Option<Text>,
    pub b64: Option<Text>,
    pub zpl2: Option<Text>,
    pub print_format: Option<Text>,
}

impl RawDocument {
    /// `url`, else `b64`, else `zpl2`.
    pub(crate) fn payload(&self) -> Option<String> {
        [&self.url, &self.b64, &self.zpl2]
            .into_iter()
            .flatten()
            .find_map(|t| t.joined(";"))
    }

    pub(crate) fn url(&self) -> Option<String> {
        self.url.as_ref().and_then(|t| t.joined(";"))
    }
}

/// The `manifest` key: a document object or a bare Base64 string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawManifest {
    Document(RawDocument),
    Text(Text),
}

impl RawManifest {
    pub(crate) fn payload(&self) -> Option<String> {
        match self {
            Self::Document(doc) => doc.payload(),
            Self::Text(text) => text.joined(";"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawValidationMessage {
    pub validation_message: Option<Text>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawMessage {
    Entry(RawValidationMessage),
    Plain(Scalar),
    Other(IgnoredAny),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawValidationMessages {
    List(Vec<RawMessage>),
    Text(Text),
}

impl RawValidationMessages {
    /// Messages joined with `"; "`.
    pub(crate) fn joined(&self) -> Option<String> {
        match self {
            Self::List(entries) => Some(
                entries
                    .iter()
                    .filter_map(|entry| match entry {
                        RawMessage::Entry(m) => {
                            m.validation_message.as_ref().and_then(|t| t.joined(";"))
                        }
                        RawMessage::Plain(s) => Some(s.text()),
                        RawMessage::Other(_) => None,
                    })
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            Self::Text(text) => text.joined("; "),
        }
    }
}

/// One per-shipment entry of a reply.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RawEntry {
    pub shipment_ref_no: Option<Text>,
    pub sstatus: Option<Lenient<RawStatus>>,
    pub property_path: Option<Text>,
    pub message: Option<Text>,
    pub validation_messages: Option<RawValidationMessages>,
    pub shipment_no: Option<Text>,
    pub return_shipment_no: Option<Text>,
    pub label: Option<Lenient<RawDocument>>,
    pub return_label: Option<Lenient<RawDocument>>,
    pub customs_doc: Option<Lenient<RawDocument>>,
    pub cod_label: Option<Lenient<RawDocument>>,
}

/// Keys of a whole reply document the normalizer looks at.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawReply {
    pub status: Option<TopStatus>,
    #[serde(rename = "statusCode")]
    pub status_code: Option<Text>,
    pub title: Option<Text>,
    pub detail: Option<Text>,
    #[serde(rename = "type")]
    pub block_type: Option<Text>,
    pub manifest: Option<RawManifest>,
    pub items: Option<Value>,
    #[serde(rename = "DeletionState")]
    pub deletion_state: Option<Value>,
    #[serde(rename = "LabelData")]
    pub label_data: Option<Value>,
    #[serde(rename = "ValidationState")]
    pub validation_state: Option<Value>,
    #[serde(rename = "ExportDocData")]
    pub export_doc_data: Option<Value>,
    #[serde(rename = "ManifestDate")]
    pub manifest_date: Option<IgnoredAny>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_accepts_any_shape() {
        let t: Text = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(t.joined(";").as_deref(), Some("a;b"));
        let t: Text = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(t.joined(";").as_deref(), Some("42"));
        assert_eq!(t.code(), Some(42));
        let t: Text = serde_json::from_value(json!({"x": 1})).unwrap();
        assert_eq!(t.joined(";"), None);
        let t: Text = serde_json::from_value(json!("1101")).unwrap();
        assert_eq!(t.code(), Some(1101));
    }

    #[test]
    fn document_payload_priority() {
        let doc: RawDocument =
            serde_json::from_value(json!({"b64": "QUJD", "zpl2": "^XA", "url": "https://x/l"}))
                .unwrap();
        assert_eq!(doc.payload().as_deref(), Some("https://x/l"));
        let doc: RawDocument = serde_json::from_value(json!({"zpl2": "^XA", "b64": "QUJD"})).unwrap();
        assert_eq!(doc.payload().as_deref(), Some("QUJD"));
    }

    #[test]
    fn entry_survives_odd_field_types() {
        let entry: RawEntry = serde_json::from_value(json!({
            "shipmentNo": 340434310428091700u64,
            "label": "not an object",
            "sstatus": {"statusCode": "200", "title": ["OK"]}
        }))
        .unwrap();
        assert!(entry.label.as_ref().unwrap().get().is_none());
        let status = entry.sstatus.as_ref().unwrap().get().unwrap();
        assert_eq!(status.status_code.as_ref().unwrap().code(), Some(200));
    }

    #[test]
    fn validation_messages_are_joined() {
        let messages: RawValidationMessages = serde_json::from_value(json!([
            {"property": "shipper.city", "validationMessage": "city unknown", "validationState": "Error"},
            {"validationMessage": "postal code invalid"}
        ]))
        .unwrap();
        assert_eq!(
            messages.joined().as_deref(),
            Some("city unknown; postal code invalid")
        );
    }
}
