//! Monetary amounts and weights as they travel on the wire.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

/// ISO 4217 currency code, always stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self("EUR".to_string())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

/// A value with its currency (`{"value": 12.5, "currency": "EUR"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Amount {
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub currency: CurrencyCode,
}

impl Amount {
    pub fn new(value: Decimal, currency: impl Into<CurrencyCode>) -> Self {
        Self {
            value,
            currency: currency.into(),
        }
    }

    /// Amount in euro.
    pub fn eur(value: Decimal) -> Self {
        Self::new(value, CurrencyCode::default())
    }
}

/// Unit of a weight value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum WeightUnit {
    #[default]
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "g")]
    Gram,
}

impl WeightUnit {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Kilogram => "kg",
            Self::Gram => "g",
        }
    }

    /// Parse a unit code, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "kg" => Some(Self::Kilogram),
            "g" => Some(Self::Gram),
            _ => None,
        }
    }
}

/// A weight with its unit (`{"value": 2.0, "uom": "kg"}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Weight {
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub uom: WeightUnit,
}

impl Weight {
    pub fn new(value: Decimal, uom: WeightUnit) -> Self {
        Self { value, uom }
    }

    pub fn kg(value: Decimal) -> Self {
        Self::new(value, WeightUnit::Kilogram)
    }
}
