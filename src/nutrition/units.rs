//! Unit tables and the compiled unit grammar
//!
//! Metric prefixes, base unit symbols and the regular expression built from
//! both. The grammar is compiled once from the same tables used for
//! multiplier lookup so the two cannot drift apart silently.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Errors raised while parsing a unit string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("Unrecognized unit: '{0}'")]
    UnrecognizedUnit(String),

    #[error("Prefix '{0}' has no registered multiplier")]
    UnregisteredPrefix(String),
}

/// Result type for unit operations
pub type UnitResult<T> = Result<T, UnitError>;

/// A metric prefix symbol and its power-of-ten multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prefix {
    pub symbol: &'static str,
    pub multiplier: f64,
}

impl Prefix {
    const fn new(symbol: &'static str, multiplier: f64) -> Self {
        Self { symbol, multiplier }
    }

    /// Whether this is the "no prefix" entry
    pub fn is_identity(&self) -> bool {
        self.symbol.is_empty()
    }
}

/// The "no prefix" entry
pub const IDENTITY_PREFIX: Prefix = Prefix::new("", 1.0);

// ============================================================================
// Prefix Table
// ============================================================================

/// Metric prefixes in display tie-break order
pub const PREFIXES: [Prefix; 14] = [
    Prefix::new("f", 1e-15),
    Prefix::new("p", 1e-12),
    Prefix::new("n", 1e-9),
    Prefix::new("µ", 1e-6),
    Prefix::new("u", 1e-6),
    Prefix::new("m", 1e-3),
    Prefix::new("c", 1e-2),
    Prefix::new("d", 1e-1),
    Prefix::new("da", 1e1),
    Prefix::new("h", 1e2),
    Prefix::new("k", 1e3),
    Prefix::new("M", 1e6),
    Prefix::new("G", 1e9),
    Prefix::new("T", 1e12),
];

// ============================================================================
// Base Units
// ============================================================================

/// Base unit symbols: mass, volume, energy, length, force, temperature, pressure
pub const BASE_UNITS: [&str; 14] = [
    "g", "l", "L", "cal", "Cal", "J", "m", "N", "Å", "K", "°C", "°F", "Pa", "bar",
];

/// Exponent markers accepted after a base unit
pub const EXPONENT_MARKERS: [&str; 4] = ["2", "²", "3", "³"];

/// Look up the multiplier registered for a prefix symbol
pub fn prefix_multiplier(symbol: &str) -> Option<f64> {
    lookup_prefix(symbol).map(|p| p.multiplier)
}

/// Look up a prefix entry by symbol
pub fn lookup_prefix(symbol: &str) -> Option<Prefix> {
    PREFIXES.iter().copied().find(|p| p.symbol == symbol)
}

/// Physical quantity measured by a base unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Mass,
    Volume,
    Energy,
    Length,
    Force,
    Temperature,
    Pressure,
}

/// Classify a base unit symbol
pub fn unit_kind(base_unit: &str) -> Option<UnitKind> {
    match base_unit {
        "g" => Some(UnitKind::Mass),
        "l" | "L" => Some(UnitKind::Volume),
        "cal" | "Cal" | "J" => Some(UnitKind::Energy),
        "m" | "Å" => Some(UnitKind::Length),
        "N" => Some(UnitKind::Force),
        "K" | "°C" | "°F" => Some(UnitKind::Temperature),
        "Pa" | "bar" => Some(UnitKind::Pressure),
        _ => None,
    }
}

fn alternation<'a>(symbols: impl Iterator<Item = &'a str>) -> String {
    symbols.map(regex::escape).collect::<Vec<_>>().join("|")
}

lazy_static! {
    /// `(prefix)?((base)(exponent)?)`, anchored at both ends
    static ref UNIT_PATTERN: Regex = Regex::new(&format!(
        "^({})?(({})({})?)$",
        alternation(PREFIXES.iter().map(|p| p.symbol)),
        alternation(BASE_UNITS.iter().copied()),
        alternation(EXPONENT_MARKERS.iter().copied()),
    ))
    .expect("unit grammar is built from static tables");
}

/// The pieces of a unit string matched by the grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUnit<'a> {
    /// Prefix symbol, if any (e.g. "k" from "kg")
    pub prefix: Option<&'a str>,
    /// Unit without prefix, exponent included (e.g. "m²" from "cm²")
    pub unit: &'a str,
    /// Bare base unit (e.g. "m" from "cm²")
    pub base_unit: &'a str,
    /// Exponent marker, if any
    pub exponent: Option<&'a str>,
}

/// Match a unit string against the grammar
pub fn parse_unit(unit: &str) -> UnitResult<ParsedUnit<'_>> {
    let caps = UNIT_PATTERN
        .captures(unit)
        .ok_or_else(|| UnitError::UnrecognizedUnit(unit.to_string()))?;

    // Groups 2 and 3 are mandatory in the pattern
    let (Some(unit_part), Some(base_unit)) = (caps.get(2), caps.get(3)) else {
        return Err(UnitError::UnrecognizedUnit(unit.to_string()));
    };

    Ok(ParsedUnit {
        prefix: caps.get(1).map(|m| m.as_str()),
        unit: unit_part.as_str(),
        base_unit: base_unit.as_str(),
        exponent: caps.get(4).map(|m| m.as_str()),
    })
}

/// Numeric value of an exponent marker
///
/// Absent → 1, `2`/`²` → 2, `3`/`³` → 3, any other integer string → its value.
pub fn exponent_value(marker: Option<&str>) -> i32 {
    match marker {
        None | Some("") => 1,
        Some("2") | Some("²") => 2,
        Some("3") | Some("³") => 3,
        Some(other) => other.parse().unwrap_or(1),
    }
}
