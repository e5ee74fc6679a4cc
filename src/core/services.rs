//! Value-added services (Zusatzleistungen) of a shipment.

use chrono::NaiveDate;
use serde::Serialize;

use super::bank::{BankData, CashOnDeliveryWire};
use super::money::Amount;
use super::party::{ReturnReceiver, ReturnReceiverWire};

/// Minimum age for visual age check and ident check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MinimumAge {
    A16,
    A18,
}

impl MinimumAge {
    pub fn code(&self) -> &'static str {
        match self {
            Self::A16 => "A16",
            Self::A18 => "A18",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A16" => Some(Self::A16),
            "A18" => Some(Self::A18),
            _ => None,
        }
    }
}

/// What happens to an international parcel that cannot be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Endorsement {
    /// Send back to the shipper.
    Return,
    /// Abandon the parcel.
    Abandon,
}

/// Identity and age verification at the door.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentCheck {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub minimum_age: MinimumAge,
}

impl IdentCheck {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: Option<NaiveDate>,
        minimum_age: MinimumAge,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
            minimum_age,
        }
    }

    pub fn to_wire(&self) -> IdentCheckWire<'_> {
        IdentCheckWire {
            first_name: &self.first_name,
            last_name: &self.last_name,
            date_of_birth: self.date_of_birth,
            minimum_age: self.minimum_age,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentCheckWire<'a> {
    first_name: &'a str,
    last_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_of_birth: Option<NaiveDate>,
    minimum_age: MinimumAge,
}

/// Optional delivery services. Every field is independent; unset fields are
/// left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Services {
    pub preferred_neighbour: Option<String>,
    pub preferred_location: Option<String>,
    pub preferred_day: Option<NaiveDate>,
    /// Address that receives the shipping confirmation mail.
    pub shipping_confirmation: Option<String>,
    pub visual_check_of_age: Option<MinimumAge>,
    pub named_person_only: Option<bool>,
    pub ident_check: Option<IdentCheck>,
    pub endorsement: Option<Endorsement>,
    pub no_neighbour_delivery: Option<bool>,
    pub additional_insurance: Option<Amount>,
    pub bulky_goods: Option<bool>,
    pub cash_on_delivery: Option<BankData>,
    /// Two-character code agreed in the customer contract.
    pub individual_sender_requirement: Option<String>,
    pub premium: Option<bool>,
    pub closest_drop_point: Option<bool>,
    /// Notification address for parcel outlet routing.
    pub parcel_outlet_routing: Option<String>,
    pub dhl_retoure: Option<ReturnReceiver>,
    pub postal_delivery_duty_paid: Option<bool>,
    pub signed_for_by_recipient: Option<bool>,
}

impl Services {
    pub fn builder() -> ServicesBuilder {
        ServicesBuilder::default()
    }

    /// True when no service is selected.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn to_wire(&self) -> ServicesWire<'_> {
        ServicesWire {
            preferred_neighbour: self.preferred_neighbour.as_deref(),
            preferred_location: self.preferred_location.as_deref(),
            shipping_confirmation: self
                .shipping_confirmation
                .as_deref()
                .map(|email| ShippingConfirmationWire { email }),
            visual_check_of_age: self.visual_check_of_age,
            named_person_only: self.named_person_only,
            ident_check: self.ident_check.as_ref().map(IdentCheck::to_wire),
            endorsement: self.endorsement,
            preferred_day: self.preferred_day,
            no_neighbour_delivery: self.no_neighbour_delivery,
            additional_insurance: self.additional_insurance.as_ref(),
            bulky_goods: self.bulky_goods,
            cash_on_delivery: self.cash_on_delivery.as_ref().map(BankData::to_wire),
            individual_sender_requirement: self.individual_sender_requirement.as_deref(),
            premium: self.premium,
            closest_drop_point: self.closest_drop_point,
            parcel_outlet_routing: self.parcel_outlet_routing.as_deref(),
            dhl_retoure: self.dhl_retoure.as_ref().map(ReturnReceiver::to_wire),
            postal_delivery_duty_paid: self.postal_delivery_duty_paid,
            signed_for_by_recipient: self.signed_for_by_recipient,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesWire<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    preferred_neighbour: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preferred_location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping_confirmation: Option<ShippingConfirmationWire<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    visual_check_of_age: Option<MinimumAge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    named_person_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ident_check: Option<IdentCheckWire<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    endorsement: Option<Endorsement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preferred_day: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    no_neighbour_delivery: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    additional_insurance: Option<&'a Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bulky_goods: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cash_on_delivery: Option<CashOnDeliveryWire<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    individual_sender_requirement: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    premium: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    closest_drop_point: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parcel_outlet_routing: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dhl_retoure: Option<ReturnReceiverWire<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_delivery_duty_paid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signed_for_by_recipient: Option<bool>,
}

#[derive(Debug, Serialize)]
struct ShippingConfirmationWire<'a> {
    email: &'a str,
}

/// Builder for [`Services`].
#[derive(Default)]
pub struct ServicesBuilder {
    services: Services,
}

impl ServicesBuilder {
    pub fn preferred_neighbour(mut self, neighbour: impl Into<String>) -> Self {
        self.services.preferred_neighbour = Some(neighbour.into());
        self
    }

    pub fn preferred_location(mut self, location: impl Into<String>) -> Self {
        self.services.preferred_location = Some(location.into());
        self
    }

    pub fn preferred_day(mut self, day: NaiveDate) -> Self {
        self.services.preferred_day = Some(day);
        self
    }

    pub fn shipping_confirmation(mut self, email: impl Into<String>) -> Self {
        self.services.shipping_confirmation = Some(email.into());
        self
    }

    pub fn visual_check_of_age(mut self, age: MinimumAge) -> Self {
        self.services.visual_check_of_age = Some(age);
        self
    }

    pub fn named_person_only(mut self, enabled: bool) -> Self {
        self.services.named_person_only = Some(enabled);
        self
    }

    pub fn ident_check(mut self, check: IdentCheck) -> Self {
        self.services.ident_check = Some(check);
        self
    }

    pub fn endorsement(mut self, endorsement: Endorsement) -> Self {
        self.services.endorsement = Some(endorsement);
        self
    }

    pub fn no_neighbour_delivery(mut self, enabled: bool) -> Self {
        self.services.no_neighbour_delivery = Some(enabled);
        self
    }

    pub fn additional_insurance(mut self, amount: Amount) -> Self {
        self.services.additional_insurance = Some(amount);
        self
    }

    pub fn bulky_goods(mut self, enabled: bool) -> Self {
        self.services.bulky_goods = Some(enabled);
        self
    }

    pub fn cash_on_delivery(mut self, bank: BankData) -> Self {
        self.services.cash_on_delivery = Some(bank);
        self
    }

    pub fn individual_sender_requirement(mut self, code: impl Into<String>) -> Self {
        self.services.individual_sender_requirement = Some(code.into());
        self
    }

    pub fn premium(mut self, enabled: bool) -> Self {
        self.services.premium = Some(enabled);
        self
    }

    pub fn closest_drop_point(mut self, enabled: bool) -> Self {
        self.services.closest_drop_point = Some(enabled);
        self
    }

    pub fn parcel_outlet_routing(mut self, email: impl Into<String>) -> Self {
        self.services.parcel_outlet_routing = Some(email.into());
        self
    }

    pub fn dhl_retoure(mut self, receiver: ReturnReceiver) -> Self {
        self.services.dhl_retoure = Some(receiver);
        self
    }

    pub fn postal_delivery_duty_paid(mut self, enabled: bool) -> Self {
        self.services.postal_delivery_duty_paid = Some(enabled);
        self
    }

    pub fn signed_for_by_recipient(mut self, enabled: bool) -> Self {
        self.services.signed_for_by_recipient = Some(enabled);
        self
    }

    pub fn build(self) -> Services {
        self.services
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_services_serialize_to_empty_object() {
        let json = serde_json::to_value(Services::default().to_wire()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn selected_services_only() {
        let services = Services::builder()
            .preferred_neighbour("Schmidt")
            .visual_check_of_age(MinimumAge::A18)
            .endorsement(Endorsement::Return)
            .preferred_day(NaiveDate::from_ymd_opt(2023, 5, 9).unwrap())
            .no_neighbour_delivery(false)
            .premium(true)
            .shipping_confirmation("notify@example.com")
            .additional_insurance(Amount::new(dec!(100), "eur"))
            .build();
        let json = serde_json::to_value(services.to_wire()).unwrap();
        assert_eq!(json["preferredNeighbour"], "Schmidt");
        assert_eq!(json["visualCheckOfAge"], "A18");
        assert_eq!(json["endorsement"], "RETURN");
        assert_eq!(json["preferredDay"], "2023-05-09");
        assert_eq!(json["noNeighbourDelivery"], false);
        assert_eq!(json["premium"], true);
        assert_eq!(json["shippingConfirmation"]["email"], "notify@example.com");
        assert_eq!(json["additionalInsurance"]["currency"], "EUR");
        assert!(json.get("bulkyGoods").is_none());
        assert!(json.get("cashOnDelivery").is_none());
        assert!(json.get("identCheck").is_none());
    }

    #[test]
    fn ident_check_keeps_names_in_place() {
        let check = IdentCheck::new(
            "Anna",
            "Muster",
            NaiveDate::from_ymd_opt(1990, 1, 31),
            MinimumAge::A16,
        );
        let json = serde_json::to_value(check.to_wire()).unwrap();
        assert_eq!(json["firstName"], "Anna");
        assert_eq!(json["lastName"], "Muster");
        assert_eq!(json["dateOfBirth"], "1990-01-31");
        assert_eq!(json["minimumAge"], "A16");
    }

    #[test]
    fn minimum_age_codes() {
        assert_eq!(MinimumAge::from_code("A18"), Some(MinimumAge::A18));
        assert_eq!(MinimumAge::A16.code(), "A16");
        assert_eq!(MinimumAge::from_code("A21"), None);
    }
}
