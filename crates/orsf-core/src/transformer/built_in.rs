//! Transform constructors
//!
//! One function per primitive, plus a few presets for conversions that
//! adapters need over and over.
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

use super::types::{Transform, TransformFn};
use crate::conversion::{LookupTable, Unit};

/// `x`
pub fn identity() -> Transform {
    Transform::Identity
}

/// `factor * x`
pub fn scale(factor: f64) -> Transform {
    Transform::Scale { factor }
}

/// `x + amount`
pub fn offset(amount: f64) -> Transform {
    Transform::Offset { amount }
}

/// `scale * x + offset`
pub fn linear(scale: f64, offset: f64) -> Transform {
    Transform::Linear { scale, offset }
}

/// `1 / x`; fails for inputs within 1e-10 of zero
pub fn invert() -> Transform {
    Transform::Invert
}

/// `-x`
pub fn negate() -> Transform {
    Transform::Negate
}

/// Clamp into `[min, max]` without step snapping
pub fn clamp(min: f64, max: f64) -> Transform {
    Transform::Clamp { min, max }
}

/// `x / 100`
pub fn percent_to_ratio() -> Transform {
    Transform::PercentToRatio
}

/// `x * 100`
pub fn ratio_to_percent() -> Transform {
    Transform::RatioToPercent
}

/// Convert between two units of the same family
pub fn unit_convert(from: Unit, to: Unit) -> Transform {
    Transform::UnitConvert { from, to }
}

/// Interpolate through `table`
pub fn lookup_table(table: LookupTable) -> Transform {
    Transform::LookupTable { points: table }
}

/// Invert `table` by reverse interpolation
pub fn reverse_lookup_table(table: LookupTable) -> Transform {
    Transform::ReverseLookupTable { points: table }
}

/// Apply `steps` in order. An empty list behaves as identity.
///
/// The reverse of a composition is never derived automatically; build it
/// separately from the inverse primitives in reverse order.
pub fn compose(steps: Vec<Transform>) -> Transform {
    Transform::Compose { steps }
}

/// Wrap a plain function as a named transform
pub fn custom(name: impl Into<String>, function: TransformFn) -> Transform {
    Transform::Custom {
        name: name.into(),
        function,
    }
}

/// kPa (canonical) to psi
pub fn pressure_kpa_to_psi() -> Transform {
    unit_convert(Unit::Kpa, Unit::Psi)
}

/// psi to kPa (canonical)
pub fn pressure_psi_to_kpa() -> Transform {
    unit_convert(Unit::Psi, Unit::Kpa)
}
