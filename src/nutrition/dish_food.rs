//! Eaten quantity of a dish food
//!
//! A logged food is either an absolute amount (`150 g`) or a share of the
//! portion initially presented (`50 %` of `200 g`).

use serde::Serialize;

use super::converter::normalize_quantity;
use super::units::parse_unit;

/// Eaten unit meaning "percent of the presented quantity"
pub const PERCENT_UNIT: &str = "%";

/// The quantity fields of a dish food entry as received from the API
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DishFoodQuantities<'a> {
    pub present_quantity: Option<f64>,
    pub present_unit: Option<&'a str>,
    pub eaten_quantity: Option<f64>,
    pub eaten_unit: Option<&'a str>,
}

/// Result of resolving an eaten quantity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EatenQuantity {
    /// Whether enough information was present to compute a value
    pub normalized: bool,
    /// Eaten amount in the base unit, 0 when not normalized
    pub normalized_quantity: f64,
}

impl EatenQuantity {
    fn resolved(quantity: f64) -> Self {
        Self {
            normalized: true,
            normalized_quantity: quantity,
        }
    }
}

/// Compute the "as eaten" quantity of a dish food in its base unit
///
/// Never fails: missing fields or units that cannot be normalized yield
/// `{ normalized: false, normalized_quantity: 0 }`.
pub fn resolve_eaten_quantity(entry: &DishFoodQuantities<'_>) -> EatenQuantity {
    let result = if entry.eaten_unit == Some(PERCENT_UNIT) {
        match (entry.present_quantity, entry.present_unit, entry.eaten_quantity) {
            (Some(present), Some(unit), Some(percent)) => {
                normalize_quantity(present, unit).map(|n| n.quantity * percent / 100.0)
            }
            _ => return EatenQuantity::default(),
        }
    } else {
        match (entry.eaten_quantity, entry.eaten_unit) {
            (Some(eaten), Some(unit)) => normalize_quantity(eaten, unit).map(|n| n.quantity),
            _ => return EatenQuantity::default(),
        }
    };

    match result {
        Ok(quantity) => EatenQuantity::resolved(quantity),
        Err(e) => {
            tracing::warn!("Could not resolve eaten quantity: {}", e);
            EatenQuantity::default()
        }
    }
}

/// Unit the resolved quantity is expressed in, without prefix (e.g. "l" for "330 ml")
///
/// A `%` entry is a share of the presented amount and takes its unit; any
/// other entry is measured in its own eaten unit. `None` when that unit is
/// missing or unrecognized.
pub fn eaten_base_unit<'a>(entry: &DishFoodQuantities<'a>) -> Option<&'a str> {
    let unit = if entry.eaten_unit == Some(PERCENT_UNIT) {
        entry.present_unit?
    } else {
        entry.eaten_unit?
    };
    parse_unit(unit).ok().map(|parsed| parsed.unit)
}
