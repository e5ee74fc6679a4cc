use std::fmt;

use serde::Serialize;

/// Country code as sent to the API (ISO 3166 alpha-3, e.g. "DEU").
///
/// Always stored upper-case; whatever case the caller hands in is folded on
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CountryCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for CountryCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

/// Postal address fields shared by every party type.
///
/// Length limits (street 50, house 10, additions 35, postal code 17, city 50)
/// belong to the wire contract; they are checked by
/// [`validate_shipment`](super::validate_shipment), not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub house: String,
    /// Up to three address-addition lines; extra lines are not sent.
    pub additional_info: Vec<String>,
    pub dispatching_info: Option<String>,
    pub postal_code: String,
    pub city: String,
    pub country: Option<CountryCode>,
    /// State or province.
    pub state: Option<String>,
}

impl Address {
    /// Maximum number of address-addition lines the API accepts.
    pub const MAX_ADDITIONAL_LINES: usize = 3;

    /// Address-addition line `n` (1-based), if set.
    pub fn additional_info_line(&self, n: usize) -> Option<&str> {
        if n == 0 || n > Self::MAX_ADDITIONAL_LINES {
            return None;
        }
        self.additional_info.get(n - 1).map(String::as_str)
    }

    pub(crate) fn to_wire(&self) -> AddressWire<'_> {
        AddressWire {
            address_street: &self.street,
            address_house: &self.house,
            additional_address_information1: self.additional_info_line(1),
            additional_address_information2: self.additional_info_line(2),
            additional_address_information3: self.additional_info_line(3),
            dispatching_information: self.dispatching_info.as_deref(),
            postal_code: &self.postal_code,
            city: &self.city,
            state: self.state.as_deref(),
            country: self.country.as_ref(),
        }
    }
}

/// Street-address block of a consignee or return address.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddressWire<'a> {
    address_street: &'a str,
    address_house: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    additional_address_information1: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    additional_address_information2: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    additional_address_information3: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dispatching_information: Option<&'a str>,
    postal_code: &'a str,
    city: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<&'a CountryCode>,
}

/// Builder for [`Address`].
pub struct AddressBuilder {
    address: Address,
}

impl AddressBuilder {
    pub fn new(postal_code: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            address: Address {
                postal_code: postal_code.into(),
                city: city.into(),
                ..Address::default()
            },
        }
    }

    pub fn street(mut self, street: impl Into<String>, house: impl Into<String>) -> Self {
        self.address.street = street.into();
        self.address.house = house.into();
        self
    }

    /// Append an address-addition line. Lines beyond the third are dropped.
    pub fn additional_info(mut self, line: impl Into<String>) -> Self {
        if self.address.additional_info.len() < Address::MAX_ADDITIONAL_LINES {
            self.address.additional_info.push(line.into());
        } else {
            tracing::warn!("address already has three addition lines, ignoring the fourth");
        }
        self
    }

    pub fn dispatching_info(mut self, info: impl Into<String>) -> Self {
        self.address.dispatching_info = Some(info.into());
        self
    }

    pub fn country(mut self, country: impl Into<CountryCode>) -> Self {
        self.address.country = Some(country.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.address.state = Some(state.into());
        self
    }

    pub fn build(self) -> Address {
        self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_code_is_upper_cased() {
        assert_eq!(CountryCode::new("deu").as_str(), "DEU");
        assert_eq!(CountryCode::from(" aUt ").as_str(), "AUT");
    }

    #[test]
    fn additional_lines_are_capped_at_three() {
        let address = AddressBuilder::new("21037", "Hamburg")
            .additional_info("1")
            .additional_info("2")
            .additional_info("3")
            .additional_info("4")
            .build();
        assert_eq!(address.additional_info.len(), 3);
        assert_eq!(address.additional_info_line(3), Some("3"));
        assert_eq!(address.additional_info_line(4), None);
        assert_eq!(address.additional_info_line(0), None);
    }

    #[test]
    fn wire_omits_unset_optionals() {
        let address = AddressBuilder::new("21037", "Hamburg")
            .street("Test Straße", "12a")
            .build();
        let json = serde_json::to_value(address.to_wire()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["addressStreet"], "Test Straße");
        assert_eq!(obj["addressHouse"], "12a");
        assert!(!obj.contains_key("country"));
        assert!(!obj.contains_key("state"));
        assert!(!obj.contains_key("additionalAddressInformation1"));
        assert!(!obj.contains_key("dispatchingInformation"));
    }
}
