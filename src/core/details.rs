use rust_decimal::Decimal;
use serde::Serialize;

use super::money::{Weight, WeightUnit};

/// Unit of the parcel dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum DimensionUnit {
    #[default]
    #[serde(rename = "cm")]
    Centimetre,
    #[serde(rename = "mm")]
    Millimetre,
}

impl DimensionUnit {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Centimetre => "cm",
            Self::Millimetre => "mm",
        }
    }

    /// Parse a unit code, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "cm" => Some(Self::Centimetre),
            "mm" => Some(Self::Millimetre),
            _ => None,
        }
    }
}

/// Parcel measurements. Every field is optional on its own, but the block
/// only reaches the wire when all four are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dimensions {
    pub length: Option<Decimal>,
    pub width: Option<Decimal>,
    pub height: Option<Decimal>,
    pub uom: Option<DimensionUnit>,
}

impl Dimensions {
    pub fn new(length: Decimal, width: Decimal, height: Decimal, uom: DimensionUnit) -> Self {
        Self {
            length: Some(length),
            width: Some(width),
            height: Some(height),
            uom: Some(uom),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.to_wire().is_some()
    }

    fn to_wire(&self) -> Option<DimensionsWire> {
        Some(DimensionsWire {
            length: self.length?,
            width: self.width?,
            height: self.height?,
            uom: self.uom?,
        })
    }
}

#[derive(Debug, Serialize)]
struct DimensionsWire {
    #[serde(with = "rust_decimal::serde::float")]
    length: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    width: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    height: Decimal,
    uom: DimensionUnit,
}

/// Weight and size of a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Details {
    pub weight: Weight,
    pub dimensions: Dimensions,
}

impl Default for Details {
    /// One kilogram, no dimensions.
    fn default() -> Self {
        Self {
            weight: Weight::kg(Decimal::ONE),
            dimensions: Dimensions::default(),
        }
    }
}

impl Details {
    pub fn new(weight: Weight) -> Self {
        Self {
            weight,
            dimensions: Dimensions::default(),
        }
    }

    /// Weight in kilograms.
    pub fn kg(value: Decimal) -> Self {
        Self::new(Weight::new(value, WeightUnit::Kilogram))
    }

    pub fn dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn to_wire(&self) -> DetailsWire<'_> {
        DetailsWire {
            weight: &self.weight,
            dim: self.dimensions.to_wire(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DetailsWire<'a> {
    weight: &'a Weight,
    #[serde(skip_serializing_if = "Option::is_none")]
    dim: Option<DimensionsWire>,
}
