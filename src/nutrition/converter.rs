//! Quantity normalization
//!
//! Collapses a metric prefix (and its exponent) into the numeric value,
//! leaving only the base unit.

use serde::Serialize;

use super::units::{exponent_value, parse_unit, prefix_multiplier, UnitError, UnitResult};

/// A quantity with all prefix scaling folded into the magnitude
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedQuantity {
    /// Magnitude in the base unit
    pub quantity: f64,
    /// Base unit with exponent marker (e.g. "m²")
    pub unit: String,
    /// Bare base unit (e.g. "m")
    pub base_unit: String,
    /// Prefix symbol stripped from the input, if any
    pub prefix: Option<String>,
    /// Numeric exponent, 1 when the unit carries no marker
    pub exponent: i32,
}

/// Scale factor for a prefix raised to the unit's exponent
///
/// The exponent applies to the prefixed unit as a whole: `cm² = (1e-2 m)²`.
pub fn unit_multiplier(symbol: &str, exponent: i32) -> UnitResult<f64> {
    let base = prefix_multiplier(symbol)
        .filter(|m| *m != 0.0)
        .ok_or_else(|| UnitError::UnregisteredPrefix(symbol.to_string()))?;

    Ok(match exponent {
        1 => base,
        2 => base * base,
        3 => base * base * base,
        n => base.powi(n),
    })
}

/// Normalize a quantity expressed in a possibly prefixed unit
///
/// Examples:
/// - (5, "kg") -> 5000 g
/// - (250, "ml") -> 0.25 l
/// - (2, "cm²") -> 0.0002 m²
pub fn normalize_quantity(quantity: f64, unit: &str) -> UnitResult<NormalizedQuantity> {
    let parsed = parse_unit(unit)?;
    let exponent = exponent_value(parsed.exponent);

    let multiplier = match parsed.prefix {
        Some(symbol) => unit_multiplier(symbol, exponent)?,
        None => 1.0,
    };

    Ok(NormalizedQuantity {
        quantity: quantity * multiplier,
        unit: parsed.unit.to_string(),
        base_unit: parsed.base_unit.to_string(),
        prefix: parsed.prefix.map(str::to_string),
        exponent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::units::PREFIXES;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = expected.abs() * 1e-9;
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_normalize_kilogram() {
        let n = normalize_quantity(5.0, "kg").unwrap();
        assert_eq!(n.quantity, 5000.0);
        assert_eq!(n.unit, "g");
        assert_eq!(n.base_unit, "g");
        assert_eq!(n.prefix.as_deref(), Some("k"));
        assert_eq!(n.exponent, 1);
    }

    #[test]
    fn test_normalize_every_prefix() {
        for prefix in PREFIXES {
            let unit = format!("{}g", prefix.symbol);
            let n = normalize_quantity(3.0, &unit).unwrap();
            assert_close(n.quantity, 3.0 * prefix.multiplier);
            assert_eq!(n.base_unit, "g");
        }
    }

    #[test]
    fn test_normalize_no_prefix_passthrough() {
        let n = normalize_quantity(7.0, "g").unwrap();
        assert_eq!(n.quantity, 7.0);
        assert_eq!(n.prefix, None);
    }

    #[test]
    fn test_normalize_squared_prefix() {
        let n = normalize_quantity(2.0, "cm²").unwrap();
        assert_close(n.quantity, 2e-4);
        assert_eq!(n.unit, "m²");
        assert_eq!(n.base_unit, "m");
        assert_eq!(n.exponent, 2);

        let n = normalize_quantity(2.0, "cm2").unwrap();
        assert_close(n.quantity, 2e-4);
    }

    #[test]
    fn test_normalize_cubed_prefix() {
        let n = normalize_quantity(1.5, "dm³").unwrap();
        assert_close(n.quantity, 1.5e-3);
        assert_eq!(n.exponent, 3);
    }

    #[test]
    fn test_exponent_without_prefix() {
        let n = normalize_quantity(4.0, "m²").unwrap();
        assert_eq!(n.quantity, 4.0);
        assert_eq!(n.unit, "m²");
        assert_eq!(n.exponent, 2);
    }

    #[test]
    fn test_normalize_unrecognized_unit() {
        assert_eq!(
            normalize_quantity(1.0, "xyz"),
            Err(UnitError::UnrecognizedUnit("xyz".to_string()))
        );
        assert!(normalize_quantity(1.0, "oz").is_err());
    }

    #[test]
    fn test_unit_multiplier_unregistered() {
        assert_eq!(
            unit_multiplier("q", 1),
            Err(UnitError::UnregisteredPrefix("q".to_string()))
        );
    }

    #[test]
    fn test_unit_multiplier_generic_power() {
        assert_close(unit_multiplier("k", 4).unwrap(), 1e12);
        assert_close(unit_multiplier("m", 3).unwrap(), 1e-9);
    }
}
