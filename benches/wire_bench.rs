use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use versand::client::{BusinessShipment, Environment, HttpRequest, HttpResponse};
use versand::core::*;
use versand::response::Response;

fn ship_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 13).unwrap()
}

fn build_shipment(n: usize) -> Shipment {
    let shipper = Shipper::new(
        SendPersonBuilder::new(
            "Benchmark GmbH",
            AddressBuilder::new("53113", "Bonn")
                .street("Charles-de-Gaulle-Str.", "20")
                .country("DEU")
                .build(),
        )
        .build(),
    );
    let consignee = SendPersonBuilder::new(
        format!("Kunde {n}"),
        AddressBuilder::new("10115", "Berlin")
            .street("Invalidenstr.", "1")
            .additional_info("Hinterhaus")
            .country("DEU")
            .build(),
    )
    .email("kunde@example.com")
    .build();

    ShipmentBuilder::new("33333333330101", shipper, consignee)
        .ref_no(format!("Bestellung-{n:06}"))
        .ship_date(ship_date())
        .details(Details::kg(dec!(2.5)))
        .services(
            Services::builder()
                .preferred_neighbour("Nachbar")
                .additional_insurance(Amount::eur(dec!(500)))
                .build(),
        )
        .build()
}

fn reply(entries: usize) -> String {
    let items: Vec<String> = (0..entries)
        .map(|i| {
            format!(
                r#"{{"shipmentNo":"00340434{i:012}","sstatus":{{"title":"OK","statusCode":200}},
                "label":{{"url":"https://api-eu.dhl.com/parcel/de/shipping/v2/labels?token=tok{i}","printFormat":"910-300-600"}}}}"#
            )
        })
        .collect();
    format!(
        r#"{{"status":{{"title":"OK","statusCode":200}},"items":[{}]}}"#,
        items.join(",")
    )
}

fn bench_shipment_wire(c: &mut Criterion) {
    let shipment = build_shipment(1);
    c.bench_function("shipment_to_json", |b| {
        b.iter(|| serde_json::to_string(&black_box(&shipment).to_wire()).unwrap())
    });
}

fn bench_validate(c: &mut Criterion) {
    let shipment = build_shipment(1);
    c.bench_function("validate_shipment", |b| {
        b.iter(|| validate_shipment(black_box(&shipment)))
    });
}

fn bench_build_order_request(c: &mut Criterion) {
    let transport = |_: &HttpRequest| -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::default())
    };
    let credentials = Credentials::new("user", "secret", "3333333333", "key");
    let mut client = BusinessShipment::new(credentials, Environment::Sandbox, transport);
    for n in 0..30 {
        client.add_shipment(build_shipment(n));
    }
    c.bench_function("build_order_request_30", |b| {
        b.iter(|| black_box(&client).build_shipment_order(false).unwrap())
    });
}

fn bench_parse_reply(c: &mut Criterion) {
    let small = reply(1);
    let large = reply(30);
    c.bench_function("parse_reply_1", |b| {
        b.iter(|| Response::from_slice(black_box(small.as_bytes())).unwrap())
    });
    c.bench_function("parse_reply_30", |b| {
        b.iter(|| {
            let mut response = Response::from_slice(black_box(large.as_bytes())).unwrap();
            response.validate_status_code();
            response
        })
    });
}

criterion_group!(
    benches,
    bench_shipment_wire,
    bench_validate,
    bench_build_order_request,
    bench_parse_reply,
);
criterion_main!(benches);
