//! Customs declaration for shipments leaving the EU.

use rust_decimal::Decimal;
use serde::Serialize;

use super::address::CountryCode;
use super::error::VersandError;
use super::money::{Amount, CurrencyCode, Weight, WeightUnit};

/// Kind of export (Sendungsart).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExportType {
    #[default]
    Other,
    Present,
    CommercialSample,
    Document,
    ReturnOfGoods,
    CommercialGoods,
}

impl ExportType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Other => "OTHER",
            Self::Present => "PRESENT",
            Self::CommercialSample => "COMMERCIAL_SAMPLE",
            Self::Document => "DOCUMENT",
            Self::ReturnOfGoods => "RETURN_OF_GOODS",
            Self::CommercialGoods => "COMMERCIAL_GOODS",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "OTHER" => Some(Self::Other),
            "PRESENT" => Some(Self::Present),
            "COMMERCIAL_SAMPLE" => Some(Self::CommercialSample),
            "DOCUMENT" => Some(Self::Document),
            "RETURN_OF_GOODS" => Some(Self::ReturnOfGoods),
            "COMMERCIAL_GOODS" => Some(Self::CommercialGoods),
            _ => None,
        }
    }
}

/// Terms of trade (Incoterm-like shipping conditions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TermsOfTrade {
    /// Delivered duty paid.
    Ddp,
    /// Delivered at place.
    Dap,
    /// Delivered duty unpaid.
    Ddu,
    /// Delivered duty paid, excluding VAT.
    Dxv,
    /// Delivered duty paid, excluding duties, taxes and VAT.
    Ddx,
}

impl TermsOfTrade {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ddp => "DDP",
            Self::Dap => "DAP",
            Self::Ddu => "DDU",
            Self::Dxv => "DXV",
            Self::Ddx => "DDX",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DDP" => Some(Self::Ddp),
            "DAP" => Some(Self::Dap),
            "DDU" => Some(Self::Ddu),
            "DXV" => Some(Self::Dxv),
            "DDX" => Some(Self::Ddx),
            _ => None,
        }
    }
}

/// A single document that is either one item or a list.
///
/// Serializes untagged: `One` as the bare document, `Many` as an array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Collapse a list into a scalar when it holds exactly one entry.
    /// Returns `None` for an empty list.
    pub fn from_vec(mut items: Vec<T>) -> Option<Self> {
        match items.len() {
            0 => None,
            1 => items.pop().map(Self::One),
            _ => Some(Self::Many(items)),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

/// One line of the export declaration.
///
/// All fields are required. [`ExportDocPosition::new`] hands back an empty
/// position (and logs a warning) when any of them is missing or zero;
/// [`ExportDocPosition::try_new`] reports the problem instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportDocPosition {
    pub item_description: String,
    pub country_of_origin: Option<CountryCode>,
    pub hs_code: String,
    pub packaged_quantity: u32,
    pub item_weight: Option<Weight>,
    pub item_value: Option<Amount>,
}

impl ExportDocPosition {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        item_description: &str,
        country_of_origin: &str,
        hs_code: &str,
        packaged_quantity: u32,
        item_weight: Decimal,
        item_weight_uom: WeightUnit,
        item_value: Decimal,
        item_value_currency: &str,
    ) -> Self {
        match Self::try_new(
            item_description,
            country_of_origin,
            hs_code,
            packaged_quantity,
            item_weight,
            item_weight_uom,
            item_value,
            item_value_currency,
        ) {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring export document position");
                Self::default()
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        item_description: &str,
        country_of_origin: &str,
        hs_code: &str,
        packaged_quantity: u32,
        item_weight: Decimal,
        item_weight_uom: WeightUnit,
        item_value: Decimal,
        item_value_currency: &str,
    ) -> Result<Self, VersandError> {
        let missing = [
            ("item description", item_description.trim().is_empty()),
            ("country of origin", country_of_origin.trim().is_empty()),
            ("HS code", hs_code.trim().is_empty()),
            ("packaged quantity", packaged_quantity == 0),
            ("item weight", item_weight.is_zero()),
            ("item value", item_value.is_zero()),
            ("currency", item_value_currency.trim().is_empty()),
        ];
        if let Some((field, _)) = missing.iter().find(|(_, empty)| *empty) {
            return Err(VersandError::InvalidExportDocPosition(format!(
                "{field} must be filled out"
            )));
        }

        Ok(Self {
            item_description: item_description.to_string(),
            country_of_origin: Some(CountryCode::new(country_of_origin)),
            hs_code: hs_code.to_string(),
            packaged_quantity,
            item_weight: Some(Weight::new(item_weight, item_weight_uom)),
            item_value: Some(Amount::new(item_value, CurrencyCode::new(item_value_currency))),
        })
    }

    /// True for a position that was rejected on construction.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn to_wire(&self) -> ExportDocPositionWire<'_> {
        ExportDocPositionWire {
            item_description: &self.item_description,
            country_of_origin: self.country_of_origin.as_ref(),
            hs_code: &self.hs_code,
            packaged_quantity: self.packaged_quantity,
            item_weight: self.item_weight.as_ref(),
            item_value: self.item_value.as_ref(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocPositionWire<'a> {
    item_description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    country_of_origin: Option<&'a CountryCode>,
    hs_code: &'a str,
    packaged_quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    item_weight: Option<&'a Weight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    item_value: Option<&'a Amount>,
}

/// Customs declaration (export document) of a shipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customs {
    pub invoice_no: Option<String>,
    pub export_type: ExportType,
    /// Required by the API when the export type is `Other`.
    pub export_description: Option<String>,
    pub shipping_conditions: Option<TermsOfTrade>,
    pub permit_no: Option<String>,
    pub attestation_no: Option<String>,
    pub has_electronic_export_notification: Option<bool>,
    pub postal_charges: Amount,
    pub office_of_origin: String,
    items: Vec<ExportDocPosition>,
}

impl Customs {
    pub fn new(
        export_type: ExportType,
        postal_charges: Amount,
        office_of_origin: impl Into<String>,
    ) -> Self {
        Self {
            invoice_no: None,
            export_type,
            export_description: None,
            shipping_conditions: None,
            permit_no: None,
            attestation_no: None,
            has_electronic_export_notification: None,
            postal_charges,
            office_of_origin: office_of_origin.into(),
            items: Vec::new(),
        }
    }

    pub fn invoice_no(mut self, invoice_no: impl Into<String>) -> Self {
        self.invoice_no = Some(invoice_no.into());
        self
    }

    pub fn export_description(mut self, description: impl Into<String>) -> Self {
        self.export_description = Some(description.into());
        self
    }

    pub fn shipping_conditions(mut self, terms: TermsOfTrade) -> Self {
        self.shipping_conditions = Some(terms);
        self
    }

    pub fn permit_no(mut self, permit_no: impl Into<String>) -> Self {
        self.permit_no = Some(permit_no.into());
        self
    }

    pub fn attestation_no(mut self, attestation_no: impl Into<String>) -> Self {
        self.attestation_no = Some(attestation_no.into());
        self
    }

    pub fn electronic_export_notification(mut self, enabled: bool) -> Self {
        self.has_electronic_export_notification = Some(enabled);
        self
    }

    /// Append a line item. Positions rejected on construction are skipped.
    pub fn add_item(&mut self, position: ExportDocPosition) {
        if position.is_empty() {
            tracing::warn!("not adding an empty export document position");
            return;
        }
        self.items.push(position);
    }

    /// Builder-style [`add_item`](Self::add_item).
    pub fn item(mut self, position: ExportDocPosition) -> Self {
        self.add_item(position);
        self
    }

    pub fn items(&self) -> &[ExportDocPosition] {
        &self.items
    }

    pub fn to_wire(&self) -> CustomsWire<'_> {
        CustomsWire {
            invoice_no: self.invoice_no.as_deref(),
            export_type: self.export_type,
            export_description: self.export_description.as_deref(),
            shipping_conditions: self.shipping_conditions,
            permit_no: self.permit_no.as_deref(),
            attestation_no: self.attestation_no.as_deref(),
            has_electronic_export_notification: self.has_electronic_export_notification,
            postal_charges: &self.postal_charges,
            office_of_origin: &self.office_of_origin,
            items: OneOrMany::from_vec(self.items.iter().map(ExportDocPosition::to_wire).collect()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomsWire<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    invoice_no: Option<&'a str>,
    export_type: ExportType,
    #[serde(skip_serializing_if = "Option::is_none")]
    export_description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping_conditions: Option<TermsOfTrade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    permit_no: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attestation_no: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    has_electronic_export_notification: Option<bool>,
    postal_charges: &'a Amount,
    office_of_origin: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<OneOrMany<ExportDocPositionWire<'a>>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn position(description: &str) -> ExportDocPosition {
        ExportDocPosition::new(
            description,
            "deu",
            "61091000",
            2,
            dec!(0.4),
            WeightUnit::Kilogram,
            dec!(19.99),
            "eur",
        )
    }

    #[test]
    fn position_normalizes_codes() {
        let pos = position("T-Shirt");
        assert_eq!(pos.country_of_origin.as_ref().unwrap().as_str(), "DEU");
        assert_eq!(pos.item_value.as_ref().unwrap().currency.as_str(), "EUR");
    }

    #[test]
    fn empty_description_leaves_position_at_defaults() {
        let pos = position("");
        assert!(pos.is_empty());
        assert_eq!(pos, ExportDocPosition::default());
    }

    #[test]
    fn try_new_names_missing_field() {
        let err = ExportDocPosition::try_new(
            "Mug",
            "DEU",
            "",
            1,
            dec!(1),
            WeightUnit::Kilogram,
            dec!(5),
            "EUR",
        )
        .unwrap_err();
        assert!(err.to_string().contains("HS code"));
    }

    #[test]
    fn single_item_is_sent_as_object() {
        let customs = Customs::new(ExportType::Present, Amount::eur(dec!(3)), "Hamburg")
            .item(position("T-Shirt"));
        let json = serde_json::to_value(customs.to_wire()).unwrap();
        assert!(json["items"].is_object());
        assert_eq!(json["items"]["itemDescription"], "T-Shirt");
    }

    #[test]
    fn two_items_are_sent_as_array() {
        let mut customs = Customs::new(ExportType::CommercialGoods, Amount::eur(dec!(3)), "Hamburg");
        customs.add_item(position("T-Shirt"));
        customs.add_item(position("Socks"));
        let json = serde_json::to_value(customs.to_wire()).unwrap();
        let items = json["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[1],
            serde_json::to_value(customs.items()[1].to_wire()).unwrap()
        );
    }

    #[test]
    fn no_items_and_unset_optionals_are_omitted() {
        let mut customs = Customs::new(ExportType::Document, Amount::eur(dec!(0)), "Berlin");
        customs.add_item(position(""));
        let json = serde_json::to_value(customs.to_wire()).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("items"));
        assert!(!obj.contains_key("invoiceNo"));
        assert!(!obj.contains_key("shippingConditions"));
        assert_eq!(obj["exportType"], "DOCUMENT");
        assert_eq!(obj["officeOfOrigin"], "Berlin");
    }

    #[test]
    fn terms_of_trade_codes() {
        assert_eq!(TermsOfTrade::from_code("DDP"), Some(TermsOfTrade::Ddp));
        assert_eq!(
            serde_json::to_value(TermsOfTrade::Dxv).unwrap(),
            serde_json::json!("DXV")
        );
    }
}
