//! Unit conversion between measurement systems
//!
//! Every unit belongs to exactly one [`UnitFamily`]. Each family has a base
//! unit and conversion always goes `from -> base -> to`, so adding a unit is
//! a matter of adding its factor to the base.
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

use super::ConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical quantity measured by a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitFamily {
    Pressure,
    SpringRate,
    Damping,
    Length,
    Temperature,
    Torque,
    Force,
    Speed,
    Volume,
}

/// Supported measurement units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    // Pressure (base: kPa)
    Kpa,
    Psi,
    Bar,
    // Spring rate (base: N/mm)
    NMm,
    LbIn,
    // Damping (base: N·s/m)
    NSM,
    LbSIn,
    // Length (base: mm)
    Mm,
    Inches,
    Cm,
    // Temperature (base: Celsius)
    Celsius,
    Fahrenheit,
    Kelvin,
    // Torque (base: N·m)
    Nm,
    LbFt,
    // Force (base: Newtons)
    Newtons,
    Pounds,
    // Speed (base: km/h)
    Kph,
    Mph,
    Ms,
    // Volume (base: liters)
    Liters,
    GallonsUs,
    GallonsUk,
}

impl Unit {
    /// All units, grouped by family
    pub const ALL: [Unit; 23] = [
        Unit::Kpa,
        Unit::Psi,
        Unit::Bar,
        Unit::NMm,
        Unit::LbIn,
        Unit::NSM,
        Unit::LbSIn,
        Unit::Mm,
        Unit::Inches,
        Unit::Cm,
        Unit::Celsius,
        Unit::Fahrenheit,
        Unit::Kelvin,
        Unit::Nm,
        Unit::LbFt,
        Unit::Newtons,
        Unit::Pounds,
        Unit::Kph,
        Unit::Mph,
        Unit::Ms,
        Unit::Liters,
        Unit::GallonsUs,
        Unit::GallonsUk,
    ];

    /// The quantity this unit measures
    pub fn family(self) -> UnitFamily {
        match self {
            Unit::Kpa | Unit::Psi | Unit::Bar => UnitFamily::Pressure,
            Unit::NMm | Unit::LbIn => UnitFamily::SpringRate,
            Unit::NSM | Unit::LbSIn => UnitFamily::Damping,
            Unit::Mm | Unit::Inches | Unit::Cm => UnitFamily::Length,
            Unit::Celsius | Unit::Fahrenheit | Unit::Kelvin => UnitFamily::Temperature,
            Unit::Nm | Unit::LbFt => UnitFamily::Torque,
            Unit::Newtons | Unit::Pounds => UnitFamily::Force,
            Unit::Kph | Unit::Mph | Unit::Ms => UnitFamily::Speed,
            Unit::Liters | Unit::GallonsUs | Unit::GallonsUk => UnitFamily::Volume,
        }
    }

    /// Short display symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Kpa => "kPa",
            Unit::Psi => "psi",
            Unit::Bar => "bar",
            Unit::NMm => "N/mm",
            Unit::LbIn => "lb/in",
            Unit::NSM => "N·s/m",
            Unit::LbSIn => "lb·s/in",
            Unit::Mm => "mm",
            Unit::Inches => "in",
            Unit::Cm => "cm",
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
            Unit::Kelvin => "K",
            Unit::Nm => "N·m",
            Unit::LbFt => "lb·ft",
            Unit::Newtons => "N",
            Unit::Pounds => "lbf",
            Unit::Kph => "km/h",
            Unit::Mph => "mph",
            Unit::Ms => "m/s",
            Unit::Liters => "L",
            Unit::GallonsUs => "gal (US)",
            Unit::GallonsUk => "gal (UK)",
        }
    }

    /// Identifier used in configuration files (matches the serde name)
    pub fn name(self) -> &'static str {
        match self {
            Unit::Kpa => "kpa",
            Unit::Psi => "psi",
            Unit::Bar => "bar",
            Unit::NMm => "n_mm",
            Unit::LbIn => "lb_in",
            Unit::NSM => "n_s_m",
            Unit::LbSIn => "lb_s_in",
            Unit::Mm => "mm",
            Unit::Inches => "inches",
            Unit::Cm => "cm",
            Unit::Celsius => "celsius",
            Unit::Fahrenheit => "fahrenheit",
            Unit::Kelvin => "kelvin",
            Unit::Nm => "nm",
            Unit::LbFt => "lb_ft",
            Unit::Newtons => "newtons",
            Unit::Pounds => "pounds",
            Unit::Kph => "kph",
            Unit::Mph => "mph",
            Unit::Ms => "ms",
            Unit::Liters => "liters",
            Unit::GallonsUs => "gallons_us",
            Unit::GallonsUk => "gallons_uk",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for UnitFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitFamily::Pressure => "pressure",
            UnitFamily::SpringRate => "spring rate",
            UnitFamily::Damping => "damping",
            UnitFamily::Length => "length",
            UnitFamily::Temperature => "temperature",
            UnitFamily::Torque => "torque",
            UnitFamily::Force => "force",
            UnitFamily::Speed => "speed",
            UnitFamily::Volume => "volume",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Unit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Unit::ALL
            .iter()
            .copied()
            .find(|unit| unit.name() == needle || unit.symbol().eq_ignore_ascii_case(&needle))
            .ok_or(ConversionError::UnknownUnit { name: s.to_string() })
    }
}

/// Fixed-table unit converter
///
/// Stateless; all methods are associated functions.
pub struct UnitConverter;

impl UnitConverter {
    /// Convert `value` from one unit to another of the same family
    ///
    /// Returns the input untouched when `from == to` so identity conversions
    /// never accumulate floating point drift.
    pub fn convert(value: f64, from: Unit, to: Unit) -> Result<f64, ConversionError> {
        if from == to {
            return Ok(value);
        }

        if from.family() != to.family() {
            return Err(ConversionError::IncompatibleUnits {
                from,
                to,
                from_family: from.family(),
                to_family: to.family(),
            });
        }

        Ok(Self::from_base(Self::to_base(value, from), to))
    }

    /// Express `value` in the base unit of its family
    pub fn to_base(value: f64, unit: Unit) -> f64 {
        match unit {
            Unit::Kpa => value,
            Unit::Psi => value * 6.89476,
            Unit::Bar => value * 100.0,

            Unit::NMm => value,
            Unit::LbIn => value * 0.175127,

            Unit::NSM => value,
            Unit::LbSIn => value * 175.127,

            Unit::Mm => value,
            Unit::Inches => value * 25.4,
            Unit::Cm => value * 10.0,

            Unit::Celsius => value,
            Unit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            Unit::Kelvin => value - 273.15,

            Unit::Nm => value,
            Unit::LbFt => value * 1.35582,

            Unit::Newtons => value,
            Unit::Pounds => value * 4.44822,

            Unit::Kph => value,
            Unit::Mph => value * 1.60934,
            Unit::Ms => value * 3.6,

            Unit::Liters => value,
            Unit::GallonsUs => value * 3.78541,
            Unit::GallonsUk => value * 4.54609,
        }
    }

    /// Express a base-unit `value` in `unit`
    pub fn from_base(value: f64, unit: Unit) -> f64 {
        match unit {
            Unit::Kpa => value,
            Unit::Psi => value / 6.89476,
            Unit::Bar => value / 100.0,

            Unit::NMm => value,
            Unit::LbIn => value / 0.175127,

            Unit::NSM => value,
            Unit::LbSIn => value / 175.127,

            Unit::Mm => value,
            Unit::Inches => value / 25.4,
            Unit::Cm => value / 10.0,

            Unit::Celsius => value,
            Unit::Fahrenheit => value * 9.0 / 5.0 + 32.0,
            Unit::Kelvin => value + 273.15,

            Unit::Nm => value,
            Unit::LbFt => value / 1.35582,

            Unit::Newtons => value,
            Unit::Pounds => value / 4.44822,

            Unit::Kph => value,
            Unit::Mph => value / 1.60934,
            Unit::Ms => value / 3.6,

            Unit::Liters => value,
            Unit::GallonsUs => value / 3.78541,
            Unit::GallonsUk => value / 4.54609,
        }
    }

    /// Clamp into `[min, max]`, then snap to `step` when `step > 0`
    pub fn clamp(value: f64, min: f64, max: f64, step: f64) -> f64 {
        let clamped = value.min(max).max(min);
        if step > 0.0 {
            Self::round_to_step(clamped, step)
        } else {
            clamped
        }
    }

    /// Round to the nearest multiple of `step` (half away from zero)
    pub fn round_to_step(value: f64, step: f64) -> f64 {
        if step <= 0.0 {
            return value;
        }
        (value / step).round() * step
    }
}
