//! Unit-of-measure conversion over a fixed factor table.
//!
//! Mass units are expressed in grams, volume units in milliliters, and `unit`
//! is a plain count. The table does not check that both sides share a
//! dimension; callers convert within one dimension.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "lb")]
    Pound,
    #[serde(rename = "oz")]
    Ounce,
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "l")]
    Liter,
    #[serde(rename = "unit")]
    Count,
}

impl Unit {
    pub const ALL: [Unit; 7] = [
        Unit::Gram,
        Unit::Kilogram,
        Unit::Pound,
        Unit::Ounce,
        Unit::Milliliter,
        Unit::Liter,
        Unit::Count,
    ];

    /// Multiplier to the base unit (g, ml or count).
    pub fn factor(&self) -> f64 {
        match self {
            Unit::Gram => 1.0,
            Unit::Kilogram => 1000.0,
            Unit::Pound => 453.592,
            Unit::Ounce => 28.3495,
            Unit::Milliliter => 1.0,
            Unit::Liter => 1000.0,
            Unit::Count => 1.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Pound => "lb",
            Unit::Ounce => "oz",
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Count => "unit",
        }
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Unit::ALL
            .into_iter()
            .find(|u| u.symbol().eq_ignore_ascii_case(needle))
            .ok_or_else(|| InventoryError::InvalidUnit(s.to_string()))
    }
}

/// `value × factor(from) / factor(to)`.
pub fn convert(value: f64, from: Unit, to: Unit) -> f64 {
    value * from.factor() / to.factor()
}

/// Parse both symbols, then [`convert`].
pub fn convert_str(value: f64, from: &str, to: &str) -> Result<f64, InventoryError> {
    Ok(convert(value, from.parse()?, to.parse()?))
}
