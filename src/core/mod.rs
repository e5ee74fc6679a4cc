//! Shipment entity graph and its JSON wire projection.
//!
//! Every entity exposes a `to_wire()` method returning a borrowed, serializable
//! view. Optional fields that are unset are left out of the document entirely
//! (never sent as `null`). Country and currency codes are folded to upper case
//! when they are stored.

mod address;
mod bank;
mod credentials;
mod customs;
mod details;
mod error;
mod label_format;
mod money;
mod party;
mod services;
mod shipment;
mod validation;

pub use address::*;
pub use bank::*;
pub use credentials::*;
pub use customs::*;
pub use details::*;
pub use error::*;
pub use label_format::*;
pub use money::*;
pub use party::*;
pub use services::*;
pub use shipment::*;
pub use validation::*;
