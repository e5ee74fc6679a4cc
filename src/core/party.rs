//! Parties of a shipment: the shipper, the three consignee variants, and the
//! receiver of a return label.
//!
//! All parties embed an [`Address`] instead of inheriting from one. Consignee
//! variants share the [`Deliverable`] capability but each projects to its own
//! wire shape.

use serde::Serialize;

use super::address::{Address, AddressWire, CountryCode};

/// Name and contact fields common to shipper, plain consignee and return
/// receiver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendPerson {
    pub name1: String,
    pub name2: Option<String>,
    pub name3: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub contact_name: Option<String>,
    pub address: Address,
}

impl SendPerson {
    fn to_receiver_wire(&self) -> ReceiverWire<'_> {
        ReceiverWire {
            name1: &self.name1,
            name2: self.name2.as_deref(),
            name3: self.name3.as_deref(),
            address: self.address.to_wire(),
            contact_name: self.contact_name.as_deref(),
            phone: self.phone.as_deref(),
            email: self.email.as_deref(),
        }
    }
}

/// Builder for [`SendPerson`].
pub struct SendPersonBuilder {
    person: SendPerson,
}

impl SendPersonBuilder {
    pub fn new(name1: impl Into<String>, address: Address) -> Self {
        Self {
            person: SendPerson {
                name1: name1.into(),
                address,
                ..SendPerson::default()
            },
        }
    }

    pub fn name2(mut self, name: impl Into<String>) -> Self {
        self.person.name2 = Some(name.into());
        self
    }

    pub fn name3(mut self, name: impl Into<String>) -> Self {
        self.person.name3 = Some(name.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.person.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.person.email = Some(email.into());
        self
    }

    pub fn contact_name(mut self, name: impl Into<String>) -> Self {
        self.person.contact_name = Some(name.into());
        self
    }

    pub fn build(self) -> SendPerson {
        self.person
    }
}

// --- Shipper ---

/// The sending party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shipper {
    pub person: SendPerson,
    /// Reference to a shipper address stored in the DHL business portal.
    pub shipper_ref: Option<String>,
}

impl Shipper {
    pub fn new(person: SendPerson) -> Self {
        Self {
            person,
            shipper_ref: None,
        }
    }

    pub fn shipper_ref(mut self, reference: impl Into<String>) -> Self {
        self.shipper_ref = Some(reference.into());
        self
    }

    pub fn to_wire(&self) -> ShipperWire<'_> {
        let p = &self.person;
        ShipperWire {
            name1: &p.name1,
            name2: p.name2.as_deref(),
            name3: p.name3.as_deref(),
            address_street: &p.address.street,
            address_house: &p.address.house,
            postal_code: &p.address.postal_code,
            city: &p.address.city,
            country: p.address.country.as_ref(),
            contact_name: p.contact_name.as_deref(),
            email: p.email.as_deref(),
            shipper_ref: self.shipper_ref.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipperWire<'a> {
    name1: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name2: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name3: Option<&'a str>,
    address_street: &'a str,
    address_house: &'a str,
    postal_code: &'a str,
    city: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<&'a CountryCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipper_ref: Option<&'a str>,
}

// --- Consignee variants ---

/// A party a parcel can be delivered to.
pub trait Deliverable {
    /// Postal location of the party.
    fn address(&self) -> &Address;

    /// Wire document for the `consignee` key of a shipment.
    fn to_wire(&self) -> ConsigneeWire<'_>;

    fn postal_code(&self) -> &str {
        &self.address().postal_code
    }

    fn city(&self) -> &str {
        &self.address().city
    }

    fn country(&self) -> Option<&CountryCode> {
        self.address().country.as_ref()
    }
}

impl Deliverable for SendPerson {
    fn address(&self) -> &Address {
        &self.address
    }

    fn to_wire(&self) -> ConsigneeWire<'_> {
        ConsigneeWire::Plain(self.to_receiver_wire())
    }
}

/// A DHL Packstation.
///
/// Only postal code, city, state and country of the embedded address are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locker {
    pub name: String,
    /// The consignee's DHL post number (Postnummer).
    pub post_number: String,
    /// Number of the Packstation.
    pub locker_id: u32,
    pub address: Address,
}

impl Locker {
    pub fn new(
        name: impl Into<String>,
        post_number: impl Into<String>,
        locker_id: u32,
        address: Address,
    ) -> Self {
        Self {
            name: name.into(),
            post_number: post_number.into(),
            locker_id,
            address,
        }
    }
}

impl Deliverable for Locker {
    fn address(&self) -> &Address {
        &self.address
    }

    fn to_wire(&self) -> ConsigneeWire<'_> {
        ConsigneeWire::Locker(LockerWire {
            name: &self.name,
            post_number: &self.post_number,
            locker_id: self.locker_id,
            postal_code: &self.address.postal_code,
            city: &self.address.city,
            state: self.address.state.as_deref(),
            country: self.address.country.as_ref(),
        })
    }
}

/// A post office or retail outlet (Postfiliale).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOffice {
    pub name: String,
    pub retail_id: u32,
    pub post_number: Option<String>,
    /// Notification address; the API wants either this or a post number.
    pub email: Option<String>,
    pub address: Address,
}

impl PostOffice {
    pub fn new(name: impl Into<String>, retail_id: u32, address: Address) -> Self {
        Self {
            name: name.into(),
            retail_id,
            post_number: None,
            email: None,
            address,
        }
    }

    pub fn post_number(mut self, post_number: impl Into<String>) -> Self {
        self.post_number = Some(post_number.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl Deliverable for PostOffice {
    fn address(&self) -> &Address {
        &self.address
    }

    fn to_wire(&self) -> ConsigneeWire<'_> {
        ConsigneeWire::PostOffice(PostOfficeWire {
            name: &self.name,
            post_number: self.post_number.as_deref(),
            email: self.email.as_deref(),
            retail_id: self.retail_id,
            postal_code: &self.address.postal_code,
            city: &self.address.city,
            country: self.address.country.as_ref(),
        })
    }
}

/// Who receives the parcel. The caller picks the variant; there is no
/// inference from the address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Consignee {
    /// Person or company at a street address.
    Plain(SendPerson),
    Locker(Locker),
    PostOffice(PostOffice),
}

impl Deliverable for Consignee {
    fn address(&self) -> &Address {
        match self {
            Self::Plain(p) => p.address(),
            Self::Locker(l) => l.address(),
            Self::PostOffice(o) => o.address(),
        }
    }

    fn to_wire(&self) -> ConsigneeWire<'_> {
        match self {
            Self::Plain(p) => p.to_wire(),
            Self::Locker(l) => l.to_wire(),
            Self::PostOffice(o) => o.to_wire(),
        }
    }
}

impl From<SendPerson> for Consignee {
    fn from(person: SendPerson) -> Self {
        Self::Plain(person)
    }
}

impl From<Locker> for Consignee {
    fn from(locker: Locker) -> Self {
        Self::Locker(locker)
    }
}

impl From<PostOffice> for Consignee {
    fn from(office: PostOffice) -> Self {
        Self::PostOffice(office)
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ConsigneeWire<'a> {
    Plain(ReceiverWire<'a>),
    Locker(LockerWire<'a>),
    PostOffice(PostOfficeWire<'a>),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiverWire<'a> {
    name1: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name2: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name3: Option<&'a str>,
    #[serde(flatten)]
    address: AddressWire<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockerWire<'a> {
    name: &'a str,
    post_number: &'a str,
    #[serde(rename = "lockerID")]
    locker_id: u32,
    postal_code: &'a str,
    city: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<&'a CountryCode>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOfficeWire<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(rename = "retailID")]
    retail_id: u32,
    postal_code: &'a str,
    city: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<&'a CountryCode>,
}

// --- Return receiver ---

/// Receiver of the return label (DHL Retoure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnReceiver {
    /// Billing number of the return procedure (EKP + 07 + participation).
    pub billing_number: String,
    pub ref_no: Option<String>,
    pub person: SendPerson,
}

impl ReturnReceiver {
    pub fn new(billing_number: impl Into<String>, person: SendPerson) -> Self {
        Self {
            billing_number: billing_number.into(),
            ref_no: None,
            person,
        }
    }

    pub fn ref_no(mut self, ref_no: impl Into<String>) -> Self {
        self.ref_no = Some(ref_no.into());
        self
    }

    pub fn to_wire(&self) -> ReturnReceiverWire<'_> {
        ReturnReceiverWire {
            billing_number: &self.billing_number,
            ref_no: self.ref_no.as_deref(),
            return_address: self.person.to_receiver_wire(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnReceiverWire<'a> {
    billing_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ref_no: Option<&'a str>,
    return_address: ReceiverWire<'a>,
}
