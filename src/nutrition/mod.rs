//! Nutrition quantity module
//!
//! Unit normalization, display formatting and eaten quantity resolution.

pub mod converter;
pub mod dish_food;
pub mod display;
pub mod units;

pub use converter::{normalize_quantity, unit_multiplier, NormalizedQuantity};
pub use dish_food::{
    eaten_base_unit, resolve_eaten_quantity, DishFoodQuantities, EatenQuantity, PERCENT_UNIT,
};
pub use display::{display_quantity, display_quantity_with_policy, DisplayPolicy};
pub use units::{
    parse_unit, prefix_multiplier, unit_kind, ParsedUnit, Prefix, UnitError, UnitKind,
    UnitResult, BASE_UNITS, IDENTITY_PREFIX, PREFIXES,
};
