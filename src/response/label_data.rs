use serde::Deserialize;
use serde_json::Value;

use super::raw::{Lenient, RawDocument, RawEntry};
use super::status::StatusCode;

/// Result for one shipment of a reply.
///
/// Label fields hold whichever representation the API sent: a download URL,
/// Base64 data, or ZPL2 code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelData {
    pub status_code: StatusCode,
    pub status_text: Option<String>,
    pub status_message: Option<String>,
    /// Sequence number echoed from the request.
    pub shipment_ref_no: Option<String>,
    pub shipment_number: Option<String>,
    pub return_shipment_number: Option<String>,
    pub label: Option<String>,
    pub return_label: Option<String>,
    pub export_doc: Option<String>,
    pub cod_label: Option<String>,
    pub label_format: Option<String>,
    pub return_label_format: Option<String>,
    pub export_doc_format: Option<String>,
    pub cod_label_format: Option<String>,
    /// Token for [`get_label`](crate::client::BusinessShipment::get_label),
    /// taken from the label URL.
    pub token: Option<String>,
}

impl LabelData {
    /// Normalize one entry of a reply. Never fails; an entry that is not an
    /// object yields an empty record.
    pub fn from_value(value: &Value) -> Self {
        let parsed = match value {
            Value::Object(_) => RawEntry::deserialize(value).ok(),
            _ => None,
        };
        let raw = match parsed {
            Some(raw) => raw,
            None => {
                tracing::warn!(kind = json_kind(value), "ignoring malformed shipment entry");
                RawEntry::default()
            }
        };
        Self::from_raw(&raw)
    }

    fn from_raw(raw: &RawEntry) -> Self {
        let mut data = Self {
            shipment_ref_no: raw.shipment_ref_no.as_ref().and_then(|t| t.joined(";")),
            shipment_number: raw.shipment_no.as_ref().and_then(|t| t.joined(";")),
            return_shipment_number: raw.return_shipment_no.as_ref().and_then(|t| t.joined(";")),
            ..Self::default()
        };

        if let Some(sstatus) = &raw.sstatus {
            if let Some(status) = sstatus.get() {
                if let Some(code) = status.status_code.as_ref().and_then(|t| t.code()) {
                    data.status_code = StatusCode::from_code(code);
                }
                data.status_text = status.title.as_ref().and_then(|t| t.joined(";"));
                data.status_message = status.detail.as_ref().and_then(|t| t.joined(";"));
            }
            if let Some(messages) = raw.validation_messages.as_ref().and_then(|m| m.joined()) {
                data.status_message = Some(messages);
            }
        } else {
            // error-shaped entry
            data.status_text = raw.property_path.as_ref().and_then(|t| t.joined(";"));
            data.status_message = raw.message.as_ref().and_then(|t| t.joined(";"));
        }

        let label = document(&raw.label);
        if let Some(doc) = label {
            data.label = doc.payload();
            data.token = doc.url().as_deref().and_then(token_from_url);
            data.label_format = format(doc);
        }
        if let Some(doc) = document(&raw.return_label) {
            data.return_label = doc.payload();
            data.return_label_format = format(doc);
        }
        if let Some(doc) = document(&raw.customs_doc) {
            data.export_doc = doc.payload();
            data.export_doc_format = format(doc);
        }
        if let Some(doc) = document(&raw.cod_label) {
            data.cod_label = doc.payload();
            data.cod_label_format = format(doc);
        }

        data
    }
}

fn document(field: &Option<Lenient<RawDocument>>) -> Option<&RawDocument> {
    field.as_ref().and_then(Lenient::get)
}

fn format(doc: &RawDocument) -> Option<String> {
    doc.print_format.as_ref().and_then(|t| t.joined(";"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Correlation token of a label URL: its query string from the seventh
/// character on, which drops the leading `token=`.
pub fn token_from_url(label_url: &str) -> Option<String> {
    let query = match url::Url::parse(label_url) {
        Ok(parsed) => parsed.query().map(str::to_string),
        Err(_) => label_url
            .split_once('?')
            .map(|(_, rest)| rest.split('#').next().unwrap_or(rest).to_string()),
    }?;
    query.get(6..).filter(|t| !t.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_is_query_after_prefix() {
        assert_eq!(
            token_from_url("https://x/label?token=abcdef123").as_deref(),
            Some("abcdef123")
        );
        assert_eq!(
            token_from_url("/labels?token=xyz#page=1").as_deref(),
            Some("xyz")
        );
        assert_eq!(token_from_url("https://x/label"), None);
        assert_eq!(token_from_url("https://x/label?a=1"), None);
    }

    #[test]
    fn successful_entry() {
        let data = LabelData::from_value(&json!({
            "shipmentNo": "340434310428091700",
            "returnShipmentNo": 999,
            "shipmentRefNo": "1",
            "sstatus": {"title": "OK", "statusCode": 200},
            "label": {"url": "https://api/labels?token=tok", "printFormat": "910-300-600", "b64": "QUJD"},
            "returnLabel": {"b64": "UkVU", "printFormat": "910-300-600"},
            "customsDoc": {"zpl2": "^XA^XZ"},
            "codLabel": {"url": "https://api/cod?token=c"}
        }));
        assert_eq!(data.status_code, StatusCode::NoError);
        assert_eq!(data.status_text.as_deref(), Some("OK"));
        assert_eq!(data.shipment_number.as_deref(), Some("340434310428091700"));
        assert_eq!(data.return_shipment_number.as_deref(), Some("999"));
        assert_eq!(data.shipment_ref_no.as_deref(), Some("1"));
        assert_eq!(data.label.as_deref(), Some("https://api/labels?token=tok"));
        assert_eq!(data.token.as_deref(), Some("tok"));
        assert_eq!(data.label_format.as_deref(), Some("910-300-600"));
        assert_eq!(data.return_label.as_deref(), Some("UkVU"));
        assert_eq!(data.export_doc.as_deref(), Some("^XA^XZ"));
        assert_eq!(data.cod_label.as_deref(), Some("https://api/cod?token=c"));
    }

    #[test]
    fn warning_entry_collects_validation_messages() {
        let data = LabelData::from_value(&json!({
            "sstatus": {"title": "Weak validation error occured.", "statusCode": 200, "detail": ["a", "b"]},
            "validationMessages": [
                {"property": "consignee.city", "validationMessage": "city does not match", "validationState": "Warning"},
                {"validationMessage": "second"}
            ]
        }));
        // the item code is kept as sent
        assert_eq!(data.status_code, StatusCode::NoError);
        assert_eq!(data.status_text.as_deref(), Some("Weak validation error occured."));
        assert_eq!(data.status_message.as_deref(), Some("city does not match; second"));
    }

    #[test]
    fn created_title_keeps_no_error() {
        let data = LabelData::from_value(&json!({
            "shipmentNo": "1",
            "sstatus": {"title": "Created", "statusCode": 200}
        }));
        assert_eq!(data.status_code, StatusCode::NoError);
        assert_eq!(data.status_text.as_deref(), Some("Created"));
    }

    #[test]
    fn detail_becomes_message() {
        let data = LabelData::from_value(&json!({
            "sstatus": {"title": "Bad Request", "statusCode": 400, "detail": ["one", "two"]}
        }));
        assert_eq!(data.status_code, StatusCode::Other(400));
        assert_eq!(data.status_message.as_deref(), Some("one;two"));
    }

    #[test]
    fn error_shaped_entry() {
        let data = LabelData::from_value(&json!({
            "propertyPath": ["shipments[0].shipper.postalCode"],
            "message": "must not be blank"
        }));
        assert_eq!(data.status_code, StatusCode::NotSet);
        assert_eq!(data.status_text.as_deref(), Some("shipments[0].shipper.postalCode"));
        assert_eq!(data.status_message.as_deref(), Some("must not be blank"));
    }

    #[test]
    fn non_object_entry_is_empty() {
        assert_eq!(LabelData::from_value(&json!("garbage")), LabelData::default());
        assert_eq!(LabelData::from_value(&json!(null)), LabelData::default());
    }
}
