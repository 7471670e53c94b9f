//! Physical units for instrument variables.
//!
//! CDF files carry a per-variable `UNITS` attribute as a free-form string.
//! A small exact-key table maps the strings the EAS products actually use to
//! canonical units; anything else goes through a general symbol parser.

use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

use crate::error::{SwaError, SwaResult};

/// The physical dimension a unit measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitQuantityKind {
    Angle,
    Energy,
    Dimensionless,
    Velocity,
    Density,
    Pressure,
    MagneticField,
    Time,
}

/// A physical unit: display symbol, dimension, and scale to the
/// dimension's base unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub symbol: String,
    pub kind: UnitQuantityKind,
    /// Factor converting one of this unit to the base unit of `kind`
    /// (degree, eV, m/s, cm^-3, nPa, nT, s).
    pub scale: f64,
}

impl Unit {
    pub fn new(symbol: &str, kind: UnitQuantityKind, scale: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            kind,
            scale,
        }
    }

    /// Canonical angle unit (degrees).
    pub fn degrees() -> Self {
        Self::new("deg", UnitQuantityKind::Angle, 1.0)
    }

    /// Canonical energy unit (electronvolts).
    pub fn electron_volts() -> Self {
        Self::new("eV", UnitQuantityKind::Energy, 1.0)
    }

    /// Unitless counts.
    pub fn dimensionless() -> Self {
        Self::new("", UnitQuantityKind::Dimensionless, 1.0)
    }

    /// Factor converting values in `self` to values in `other`,
    /// or None if the units measure different dimensions.
    pub fn conversion_factor(&self, other: &Unit) -> Option<f64> {
        if self.kind != other.kind {
            return None;
        }
        Some(self.scale / other.scale)
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Resolve a CDF `UNITS` attribute string to a unit.
///
/// Exact table keys first (the spellings used by EAS files), then the
/// general symbol parser.
pub fn parse_unit(s: &str) -> SwaResult<Unit> {
    match s {
        "Degrees" => return Ok(Unit::degrees()),
        "ElectronVolts" => return Ok(Unit::electron_volts()),
        "Counts/Accum" | "Total Counts" => return Ok(Unit::dimensionless()),
        _ => {}
    }
    parse_unit_symbol(s).ok_or_else(|| SwaError::UnitParse {
        variable: String::new(),
        unit: s.to_string(),
    })
}

/// General unit-string parser for symbols not covered by the exact table.
fn parse_unit_symbol(s: &str) -> Option<Unit> {
    use UnitQuantityKind::*;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(Unit::dimensionless());
    }
    let (kind, scale) = match trimmed {
        "deg" | "degrees" => (Angle, 1.0),
        "rad" => (Angle, 180.0 / std::f64::consts::PI),
        "eV" => (Energy, 1.0),
        "keV" => (Energy, 1e3),
        "m/s" => (Velocity, 1.0),
        "km/s" => (Velocity, 1e3),
        "cm^-3" | "1/cm^3" => (Density, 1.0),
        "m^-3" | "1/m^3" => (Density, 1e-6),
        "nPa" => (Pressure, 1.0),
        "Pa" => (Pressure, 1e9),
        "nT" => (MagneticField, 1.0),
        "T" => (MagneticField, 1e9),
        "s" => (Time, 1.0),
        "ms" => (Time, 1e-3),
        "ns" => (Time, 1e-9),
        "counts" | "Counts" => (Dimensionless, 1.0),
        _ => return None,
    };
    Some(Unit::new(trimmed, kind, scale))
}

/// A numeric array with an attached unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub values: ArrayD<f64>,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(values: ArrayD<f64>, unit: Unit) -> Self {
        Self { values, unit }
    }

    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert to a compatible unit, scaling the values.
    pub fn to_unit(&self, target: &Unit) -> SwaResult<Quantity> {
        let factor = self.unit.conversion_factor(target).ok_or_else(|| {
            SwaError::InvalidData(format!(
                "incompatible unit conversion: '{}' to '{}'",
                self.unit, target
            ))
        })?;
        Ok(Quantity::new(&self.values * factor, target.clone()))
    }
}
