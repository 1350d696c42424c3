//! Human readable quantities
//!
//! Picks the metric prefix that keeps a value in a readable range and
//! renders it rounded to two decimals.

use super::converter::{normalize_quantity, unit_multiplier};
use super::units::{
    lookup_prefix, unit_kind, Prefix, UnitError, UnitKind, UnitResult, IDENTITY_PREFIX, PREFIXES,
};

/// Which prefixes each kind of unit may be displayed with
///
/// Kinds without an entry fall back to the full prefix table.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayPolicy {
    pub mass: Vec<&'static str>,
    pub volume: Vec<&'static str>,
}

impl Default for DisplayPolicy {
    fn default() -> Self {
        Self {
            mass: vec!["n", "µ", "m", "k"],
            volume: vec!["n", "µ", "m", "d", "k"],
        }
    }
}

impl DisplayPolicy {
    /// Prefix symbols allowed for a base unit, `None` meaning all of them
    pub fn allowed_for(&self, base_unit: &str) -> Option<&[&'static str]> {
        match unit_kind(base_unit) {
            Some(UnitKind::Mass) => Some(self.mass.as_slice()),
            Some(UnitKind::Volume) => Some(self.volume.as_slice()),
            _ => None,
        }
    }
}

/// Identity first, then the allowed prefixes in the order given
fn candidates(allowed: Option<&[&str]>) -> UnitResult<Vec<Prefix>> {
    let mut prefixes = vec![IDENTITY_PREFIX];
    match allowed {
        Some(symbols) => {
            for symbol in symbols {
                if symbol.is_empty() {
                    continue;
                }
                let prefix = lookup_prefix(symbol)
                    .ok_or_else(|| UnitError::UnregisteredPrefix(symbol.to_string()))?;
                prefixes.push(prefix);
            }
        }
        None => prefixes.extend(PREFIXES),
    }
    Ok(prefixes)
}

fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a quantity with the default display policy
///
/// Examples:
/// - (1500, "g", None) -> "1.5 kg"
/// - (0.25, "l", None) -> "2.5 dl"
/// - (0, "g", None) -> "0 g"
pub fn display_quantity(
    quantity: f64,
    unit: &str,
    allowed_prefixes: Option<&[&str]>,
) -> UnitResult<String> {
    display_quantity_with_policy(quantity, unit, allowed_prefixes, &DisplayPolicy::default())
}

/// Format a quantity, choosing among `allowed_prefixes` or the policy's whitelist
pub fn display_quantity_with_policy(
    quantity: f64,
    unit: &str,
    allowed_prefixes: Option<&[&str]>,
    policy: &DisplayPolicy,
) -> UnitResult<String> {
    let normalized = normalize_quantity(quantity, unit)?;
    let magnitude = normalized.quantity;

    // Nothing meaningful to rescale
    if magnitude == 0.0 || !magnitude.is_finite() {
        return Ok(format!("{} {}", quantity, unit));
    }

    let allowed = allowed_prefixes.or_else(|| policy.allowed_for(&normalized.base_unit));
    let target = magnitude.abs().log10();

    let mut best = IDENTITY_PREFIX;
    let mut best_scale = 1.0;
    let mut best_distance = f64::INFINITY;
    for prefix in candidates(allowed)? {
        let scale = if prefix.is_identity() {
            1.0
        } else {
            unit_multiplier(prefix.symbol, normalized.exponent)?
        };
        let distance = (target - (scale * 10.0).log10()).abs();
        if distance < best_distance {
            best = prefix;
            best_scale = scale;
            best_distance = distance;
        }
    }

    let value = round_2(magnitude / best_scale);
    Ok(format!("{} {}{}", value, best.symbol, normalized.unit))
}
