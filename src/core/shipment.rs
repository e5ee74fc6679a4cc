//! The shipment aggregate: one parcel from a shipper to a consignee.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, Utc, Weekday};
use serde::Serialize;

use super::customs::{Customs, CustomsWire};
use super::details::{Details, DetailsWire};
use super::party::{Consignee, ConsigneeWire, Deliverable, Shipper, ShipperWire};
use super::services::{Services, ServicesWire};

/// Shipping product (Produkt) of the Parcel DE Shipping API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Product {
    /// DHL Paket (national).
    #[default]
    V01Pak,
    /// DHL Paket Prio.
    V01Prio,
    /// DHL Warenpost.
    V62Wp,
    /// DHL Warenpost International.
    V66Wpi,
    /// DHL Paket International.
    V53WPak,
    /// DHL Europaket.
    V54EPak,
    /// DHL Paket Connect (packed connect).
    V55Pak,
    /// DHL Kurier Taggleich (same-day package).
    V06Pak,
    /// DHL Kurier Taggleich (messenger).
    V06Tg,
    /// DHL Kurier Wunschzeit.
    V06Wz,
    /// DHL Paket Austria.
    V86Parcel,
    /// DHL Paket International from Austria.
    V82Parcel,
    /// DHL Paket Connect from Austria.
    V87Parcel,
}

impl Product {
    pub const ALL: [Product; 13] = [
        Self::V01Pak,
        Self::V01Prio,
        Self::V62Wp,
        Self::V66Wpi,
        Self::V53WPak,
        Self::V54EPak,
        Self::V55Pak,
        Self::V06Pak,
        Self::V06Tg,
        Self::V06Wz,
        Self::V86Parcel,
        Self::V82Parcel,
        Self::V87Parcel,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::V01Pak => "V01PAK",
            Self::V01Prio => "V01PRIO",
            Self::V62Wp => "V62WP",
            Self::V66Wpi => "V66WPI",
            Self::V53WPak => "V53WPAK",
            Self::V54EPak => "V54EPAK",
            Self::V55Pak => "V55PAK",
            Self::V06Pak => "V06PAK",
            Self::V06Tg => "V06TG",
            Self::V06Wz => "V06WZ",
            Self::V86Parcel => "V86PARCEL",
            Self::V82Parcel => "V82PARCEL",
            Self::V87Parcel => "V87PARCEL",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }

    /// Two-digit procedure (Verfahren) that goes into the billing number.
    pub fn procedure(&self) -> &'static str {
        &self.code()[1..3]
    }
}

/// Ship date used when none is set: `today`, or Monday when `today` is a
/// Sunday.
pub fn default_ship_date(today: NaiveDate) -> NaiveDate {
    if today.weekday() == Weekday::Sun {
        today.succ_opt().unwrap_or(today)
    } else {
        today
    }
}

/// A single shipment order.
///
/// The aggregate owns its parties and value objects and only reads them when
/// projecting to the wire.
#[derive(Debug, Clone)]
pub struct Shipment {
    pub product: Product,
    /// 14-digit billing number (see [`Credentials::billing_number`](super::Credentials::billing_number)).
    pub billing_number: String,
    /// Customer reference, 8 to 35 characters.
    pub ref_no: Option<String>,
    pub cost_center: Option<String>,
    pub creation_software: Option<String>,
    pub shipper: Shipper,
    pub consignee: Consignee,
    pub details: Details,
    pub services: Option<Services>,
    pub customs: Option<Customs>,
    ship_date: Option<NaiveDate>,
    default_date: OnceLock<NaiveDate>,
}

impl Shipment {
    /// Explicit ship date, or the default computed on first read. The default
    /// is cached for the lifetime of the shipment.
    pub fn ship_date(&self) -> NaiveDate {
        match self.ship_date {
            Some(date) => date,
            None => *self
                .default_date
                .get_or_init(|| default_ship_date(Utc::now().date_naive())),
        }
    }

    pub fn set_ship_date(&mut self, date: Option<NaiveDate>) {
        self.ship_date = date;
    }

    /// Ship date as sent to the API (`2024-05-13T00:00:00Z`).
    pub fn ship_date_wire(&self) -> String {
        self.ship_date().format("%Y-%m-%dT00:00:00Z").to_string()
    }

    pub fn to_wire(&self) -> ShipmentWire<'_> {
        ShipmentWire {
            product: self.product.code(),
            billing_number: &self.billing_number,
            ref_no: self.ref_no.as_deref(),
            cost_center: self.cost_center.as_deref(),
            ship_date: self.ship_date_wire(),
            creation_software: self.creation_software.as_deref(),
            shipper: self.shipper.to_wire(),
            consignee: self.consignee.to_wire(),
            details: self.details.to_wire(),
            services: self
                .services
                .as_ref()
                .filter(|s| !s.is_empty())
                .map(Services::to_wire),
            customs: self.customs.as_ref().map(Customs::to_wire),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentWire<'a> {
    product: &'static str,
    billing_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ref_no: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost_center: Option<&'a str>,
    ship_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    creation_software: Option<&'a str>,
    shipper: ShipperWire<'a>,
    consignee: ConsigneeWire<'a>,
    details: DetailsWire<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    services: Option<ServicesWire<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customs: Option<CustomsWire<'a>>,
}

/// Builder for [`Shipment`].
pub struct ShipmentBuilder {
    shipment: Shipment,
}

impl ShipmentBuilder {
    pub fn new(
        billing_number: impl Into<String>,
        shipper: Shipper,
        consignee: impl Into<Consignee>,
    ) -> Self {
        Self {
            shipment: Shipment {
                product: Product::default(),
                billing_number: billing_number.into(),
                ref_no: None,
                cost_center: None,
                creation_software: None,
                shipper,
                consignee: consignee.into(),
                details: Details::default(),
                services: None,
                customs: None,
                ship_date: None,
                default_date: OnceLock::new(),
            },
        }
    }

    pub fn product(mut self, product: Product) -> Self {
        self.shipment.product = product;
        self
    }

    pub fn ref_no(mut self, ref_no: impl Into<String>) -> Self {
        self.shipment.ref_no = Some(ref_no.into());
        self
    }

    pub fn cost_center(mut self, cost_center: impl Into<String>) -> Self {
        self.shipment.cost_center = Some(cost_center.into());
        self
    }

    pub fn creation_software(mut self, software: impl Into<String>) -> Self {
        self.shipment.creation_software = Some(software.into());
        self
    }

    pub fn ship_date(mut self, date: NaiveDate) -> Self {
        self.shipment.ship_date = Some(date);
        self
    }

    pub fn details(mut self, details: Details) -> Self {
        self.shipment.details = details;
        self
    }

    pub fn services(mut self, services: Services) -> Self {
        self.shipment.services = Some(services);
        self
    }

    pub fn customs(mut self, customs: Customs) -> Self {
        self.shipment.customs = Some(customs);
        self
    }

    pub fn build(self) -> Shipment {
        self.shipment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AddressBuilder, Amount, ExportType, SendPersonBuilder};
    use rust_decimal_macros::dec;

    fn shipment() -> ShipmentBuilder {
        let shipper = Shipper::new(
            SendPersonBuilder::new(
                "Versand GmbH",
                AddressBuilder::new("53113", "Bonn")
                    .street("Sträßchensweg", "10")
                    .country("deu")
                    .build(),
            )
            .build(),
        );
        let consignee = SendPersonBuilder::new(
            "Kunde",
            AddressBuilder::new("21037", "Hamburg")
                .street("Kurt-Schumacher-Allee", "4")
                .country("deu")
                .build(),
        )
        .build();
        ShipmentBuilder::new("33333333330101", shipper, consignee)
    }

    #[test]
    fn product_codes() {
        for product in Product::ALL {
            assert_eq!(Product::from_code(product.code()), Some(product));
            assert_eq!(product.procedure().len(), 2);
        }
        assert_eq!(Product::V86Parcel.procedure(), "86");
        assert_eq!(Product::from_code("V99XX"), None);
    }

    #[test]
    fn sunday_moves_to_monday() {
        let sunday = NaiveDate::from_ymd_opt(2024, 5, 12).unwrap();
        let monday = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
        assert_eq!(default_ship_date(sunday), monday);
        assert_eq!(default_ship_date(monday), monday);
    }

    #[test]
    fn default_ship_date_is_cached() {
        let shipment = shipment().build();
        let first = shipment.ship_date_wire();
        assert_eq!(shipment.ship_date_wire(), first);
        assert!(first.ends_with("T00:00:00Z"));
    }

    #[test]
    fn explicit_ship_date_wins() {
        let mut shipment = shipment()
            .ship_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
            .build();
        assert_eq!(shipment.ship_date_wire(), "2024-02-29T00:00:00Z");
        shipment.set_ship_date(None);
        assert_ne!(shipment.ship_date_wire(), "2024-02-29T00:00:00Z");
    }

    #[test]
    fn wire_document() {
        let shipment = shipment()
            .product(Product::V01Pak)
            .ref_no("Bestellung 4711")
            .ship_date(NaiveDate::from_ymd_opt(2024, 5, 13).unwrap())
            .details(Details::kg(dec!(2)))
            .services(Services::default())
            .build();
        let json = serde_json::to_value(shipment.to_wire()).unwrap();
        assert_eq!(json["product"], "V01PAK");
        assert_eq!(json["billingNumber"], "33333333330101");
        assert_eq!(json["refNo"], "Bestellung 4711");
        assert_eq!(json["shipDate"], "2024-05-13T00:00:00Z");
        assert_eq!(json["shipper"]["name1"], "Versand GmbH");
        assert_eq!(json["consignee"]["addressStreet"], "Kurt-Schumacher-Allee");
        assert_eq!(json["details"]["weight"]["value"], 2.0);
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("services"));
        assert!(!obj.contains_key("customs"));
        assert!(!obj.contains_key("costCenter"));
        assert!(!obj.contains_key("creationSoftware"));
    }

    #[test]
    fn customs_block_is_nested() {
        let shipment = shipment()
            .product(Product::V53WPak)
            .customs(Customs::new(ExportType::Present, Amount::eur(dec!(5)), "Bonn"))
            .build();
        let json = serde_json::to_value(shipment.to_wire()).unwrap();
        assert_eq!(json["customs"]["exportType"], "PRESENT");
        assert_eq!(json["customs"]["postalCharges"]["value"], 5.0);
    }
}
