use super::address::Address;
use super::error::ValidationError;
use super::party::{Consignee, SendPerson};
use super::shipment::Shipment;

const MAX_STREET: usize = 50;
const MAX_HOUSE: usize = 10;
const MAX_ADDITION: usize = 35;
const MAX_POSTAL_CODE: usize = 17;
const MAX_CITY: usize = 50;
const MAX_NAME: usize = 50;
const REF_NO_LEN: std::ops::RangeInclusive<usize> = 8..=35;
const MAX_PROFILE: usize = 30;

/// Check a shipment against the field limits of the API.
/// Returns all problems found (not just the first).
///
/// The wire projection itself never validates; call this before sending when
/// you want to catch mistakes locally instead of in the API reply.
pub fn validate_shipment(shipment: &Shipment) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if shipment.billing_number.chars().count() != 14
        || !shipment.billing_number.chars().all(|c| c.is_ascii_digit())
    {
        errors.push(ValidationError::new(
            "billing_number",
            "billing number must be 14 digits",
        ));
    }

    if let Some(ref_no) = &shipment.ref_no {
        let len = ref_no.chars().count();
        if !REF_NO_LEN.contains(&len) {
            errors.push(ValidationError::new(
                "ref_no",
                format!(
                    "reference must be {} to {} characters, got {len}",
                    REF_NO_LEN.start(),
                    REF_NO_LEN.end()
                ),
            ));
        }
    }

    validate_person(&shipment.shipper.person, "shipper", &mut errors);

    match &shipment.consignee {
        Consignee::Plain(person) => validate_person(person, "consignee", &mut errors),
        Consignee::Locker(locker) => {
            check_max(&locker.name, MAX_NAME, "consignee.name", &mut errors);
            validate_location(&locker.address, "consignee.address", &mut errors);
        }
        Consignee::PostOffice(office) => {
            check_max(&office.name, MAX_NAME, "consignee.name", &mut errors);
            validate_location(&office.address, "consignee.address", &mut errors);
        }
    }

    if let Some(retoure) = shipment
        .services
        .as_ref()
        .and_then(|s| s.dhl_retoure.as_ref())
    {
        validate_person(&retoure.person, "services.dhl_retoure", &mut errors);
    }

    if let Some(customs) = &shipment.customs {
        if customs.office_of_origin.trim().is_empty() {
            errors.push(ValidationError::new(
                "customs.office_of_origin",
                "office of origin must not be empty",
            ));
        }
        check_code(
            customs.postal_charges.currency.as_str(),
            "customs.postal_charges.currency",
            &mut errors,
        );
        for (i, item) in customs.items().iter().enumerate() {
            if let Some(country) = &item.country_of_origin {
                check_code(
                    country.as_str(),
                    &format!("customs.items[{i}].country_of_origin"),
                    &mut errors,
                );
            }
        }
    }

    errors
}

/// Check the profile name of a request.
pub fn validate_profile(profile: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if profile.trim().is_empty() {
        errors.push(ValidationError::new("profile", "profile must not be empty"));
    }
    check_max(profile, MAX_PROFILE, "profile", &mut errors);
    errors
}

fn validate_person(person: &SendPerson, prefix: &str, errors: &mut Vec<ValidationError>) {
    if person.name1.trim().is_empty() {
        errors.push(ValidationError::new(
            format!("{prefix}.name1"),
            "name must not be empty",
        ));
    }
    check_max(&person.name1, MAX_NAME, &format!("{prefix}.name1"), errors);
    for (field, value) in [("name2", &person.name2), ("name3", &person.name3)] {
        if let Some(value) = value {
            check_max(value, MAX_NAME, &format!("{prefix}.{field}"), errors);
        }
    }

    let address = &person.address;
    let path = format!("{prefix}.address");
    check_max(&address.street, MAX_STREET, &format!("{path}.street"), errors);
    check_max(&address.house, MAX_HOUSE, &format!("{path}.house"), errors);
    for (i, line) in address.additional_info.iter().enumerate() {
        check_max(line, MAX_ADDITION, &format!("{path}.additional_info[{i}]"), errors);
    }
    if let Some(info) = &address.dispatching_info {
        check_max(info, MAX_ADDITION, &format!("{path}.dispatching_info"), errors);
    }
    validate_location(address, &path, errors);
}

fn validate_location(address: &Address, path: &str, errors: &mut Vec<ValidationError>) {
    if address.city.trim().is_empty() {
        errors.push(ValidationError::new(
            format!("{path}.city"),
            "city must not be empty",
        ));
    }
    check_max(&address.postal_code, MAX_POSTAL_CODE, &format!("{path}.postal_code"), errors);
    check_max(&address.city, MAX_CITY, &format!("{path}.city"), errors);
    if let Some(country) = &address.country {
        check_code(country.as_str(), &format!("{path}.country"), errors);
    }
}

fn check_max(value: &str, max: usize, field: &str, errors: &mut Vec<ValidationError>) {
    let len = value.chars().count();
    if len > max {
        errors.push(ValidationError::new(
            field,
            format!("at most {max} characters allowed, got {len}"),
        ));
    }
}

fn check_code(code: &str, field: &str, errors: &mut Vec<ValidationError>) {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        errors.push(ValidationError::new(
            field,
            format!("'{code}' is not a three-letter code"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AddressBuilder, Locker, SendPersonBuilder, ShipmentBuilder, Shipper};

    fn person(name: &str, street: &str) -> SendPerson {
        SendPersonBuilder::new(
            name,
            AddressBuilder::new("53113", "Bonn")
                .street(street, "1")
                .country("DEU")
                .build(),
        )
        .build()
    }

    #[test]
    fn valid_shipment_passes() {
        let shipment = ShipmentBuilder::new(
            "33333333330101",
            Shipper::new(person("Versand GmbH", "Hauptstraße")),
            person("Kunde", "Nebenstraße"),
        )
        .ref_no("Order-12345")
        .build();
        assert!(validate_shipment(&shipment).is_empty());
    }

    #[test]
    fn reports_every_problem() {
        let long_street = "x".repeat(51);
        let shipment = ShipmentBuilder::new(
            "3333",
            Shipper::new(person("", &long_street)),
            person("Kunde", "Nebenstraße"),
        )
        .ref_no("short")
        .build();
        let errors = validate_shipment(&shipment);
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"billing_number"));
        assert!(fields.contains(&"ref_no"));
        assert!(fields.contains(&"shipper.name1"));
        assert!(fields.contains(&"shipper.address.street"));
    }

    #[test]
    fn locker_country_must_be_alpha3() {
        let address = AddressBuilder::new("53113", "Bonn").country("de").build();
        let shipment = ShipmentBuilder::new(
            "33333333330101",
            Shipper::new(person("Versand GmbH", "Hauptstraße")),
            Locker::new("Max", "12345678", 120, address),
        )
        .build();
        let errors = validate_shipment(&shipment);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "consignee.address.country");
    }

    #[test]
    fn profile_length() {
        assert!(validate_profile("STANDARD_GRUPPENPROFIL").is_empty());
        assert_eq!(validate_profile(&"P".repeat(31)).len(), 1);
        assert_eq!(validate_profile("").len(), 1);
    }
}
