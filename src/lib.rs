//! # versand
//!
//! Client for the DHL Parcel DE Shipping API (v2): create, validate, update
//! and cancel shipment orders, fetch labels and close out the day with a
//! manifest.
//!
//! The crate never opens a socket on its own. [`client::BusinessShipment`]
//! builds [`client::HttpRequest`] values and hands them to a
//! [`client::Transport`]; enable `blocking` for a ready-made `reqwest`
//! transport, or pass a closure.
//!
//! Weights and amounts use [`rust_decimal::Decimal`].
//!
//! ## Quick Start
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use versand::client::{BusinessShipment, Environment, HttpRequest, HttpResponse};
//! use versand::*;
//!
//! let transport = |request: &HttpRequest| -> Result<HttpResponse, TransportError> {
//!     assert!(request.url.contains("/orders?validate=false"));
//!     Ok(HttpResponse::new(200, r#"{"status":{"statusCode":200,"title":"OK"},"items":[
//!         {"shipmentNo":"00340434161094042557","sstatus":{"statusCode":200,"title":"OK"},
//!          "label":{"url":"https://api-sandbox.dhl.com/labels?token=t0k3n"}}]}"#))
//! };
//!
//! let credentials = Credentials::new("user", "secret", "3333333333", "api-key");
//! let mut client = BusinessShipment::new(credentials, Environment::Sandbox, transport);
//!
//! let shipper = Shipper::new(
//!     SendPersonBuilder::new(
//!         "Versandhaus GmbH",
//!         AddressBuilder::new("53113", "Bonn").street("Charles-de-Gaulle-Str.", "20").build(),
//!     )
//!     .build(),
//! );
//! let consignee = SendPersonBuilder::new(
//!     "Erika Musterfrau",
//!     AddressBuilder::new("10115", "Berlin").street("Invalidenstr.", "1").build(),
//! )
//! .email("erika@example.com")
//! .build();
//!
//! let billing = client.credentials().billing_number(Product::V01Pak, "01");
//! let shipment = ShipmentBuilder::new(billing, shipper, consignee)
//!     .ref_no("Bestellung-4711")
//!     .details(Details::kg(dec!(2.5)))
//!     .build();
//! assert!(validate_shipment(&shipment).is_empty());
//! client.add_shipment(shipment);
//!
//! let response = client.create_shipment();
//! assert_eq!(response.shipment_number(), Some("00340434161094042557"));
//! assert_eq!(response.token(), Some("t0k3n"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Shipment types, wire encoding, validation |
//! | `response` (default) | Reply normalization |
//! | `client` (default) | Request building and the `BusinessShipment` orchestrator |
//! | `blocking` | `reqwest` blocking transport |
//! | `env` | Credentials from `DHL_*` environment variables |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "response")]
pub mod response;

#[cfg(feature = "client")]
pub mod client;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
