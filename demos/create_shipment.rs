//! Create a parcel in the DHL sandbox and print the result.
//!
//! Offline by default, answering from a canned reply. With
//! `--features blocking,env` and `DHL_USER`, `DHL_PASSWORD`, `DHL_EKP` and
//! `DHL_API_KEY` set, the request goes to the real sandbox.
//!
//! Run with: `RUST_LOG=versand=debug cargo run --example create_shipment`

use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;
use versand::client::{BusinessShipment, Environment, HttpRequest, HttpResponse, Transport};
use versand::core::*;

const CANNED_REPLY: &str = r#"{
    "status": {"title": "OK", "statusCode": 200},
    "items": [{
        "shipmentNo": "0034043333301020000003873",
        "sstatus": {"title": "OK", "statusCode": 200},
        "label": {"url": "https://api-sandbox.dhl.com/parcel/de/shipping/v2/labels?token=abcdef123", "printFormat": "910-300-600"}
    }]
}"#;

fn canned(_: &HttpRequest) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::new(200, CANNED_REPLY))
}

fn run<T: Transport>(credentials: Credentials, transport: T) {
    let mut client = BusinessShipment::new(credentials, Environment::Sandbox, transport);

    let shipper = Shipper::new(
        SendPersonBuilder::new(
            "Versandhaus GmbH",
            AddressBuilder::new("53113", "Bonn")
                .street("Charles-de-Gaulle-Str.", "20")
                .country("DEU")
                .build(),
        )
        .email("versand@example.com")
        .build(),
    );
    let consignee = SendPersonBuilder::new(
        "Erika Musterfrau",
        AddressBuilder::new("10115", "Berlin")
            .street("Invalidenstr.", "1")
            .country("DEU")
            .build(),
    )
    .build();

    let billing = client.credentials().billing_number(Product::V01Pak, "01");
    let shipment = ShipmentBuilder::new(billing, shipper, consignee)
        .ref_no("Bestellung-4711")
        .details(Details::kg(dec!(2.5)))
        .services(Services::builder().preferred_neighbour("Familie Schmidt").build());

    let shipment = shipment.build();
    for problem in validate_shipment(&shipment) {
        println!("Validation: {problem}");
    }
    client.add_shipment(shipment);

    let response = client.create_shipment();
    println!("Status:   {} {:?}", response.status_code(), response.status_text());
    println!("Shipment: {:?}", response.shipment_number());
    println!("Label:    {:?}", response.label());
    println!("Token:    {:?}", response.token());
    for error in client.errors() {
        println!("Error:    {error}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    #[cfg(all(feature = "blocking", feature = "env"))]
    if let Ok(credentials) = Credentials::from_env() {
        let transport = versand::client::ReqwestTransport::new().expect("HTTP client");
        run(credentials, transport);
        return;
    }

    run(Credentials::new("user", "pass", "3333333333", "demo-key"), canned);
}
