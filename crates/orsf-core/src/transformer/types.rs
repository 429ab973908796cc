//! Core transform types and error definitions
//!
//! A [`Transform`] is a pure scalar function. It is a closed set of
//! primitives so it can be described in configuration files and compared in
//! tests, plus a [`Transform::Custom`] escape hatch carrying a plain function
//! pointer.
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

use crate::conversion::{ConversionError, LookupTable, Unit, UnitConverter};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Inputs with a smaller magnitude cannot be inverted
pub const INVERT_EPSILON: f64 = 1e-10;

/// Errors that can occur while applying a transform
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Attempted to invert zero (or a value indistinguishable from it)
    #[error("Cannot invert value {value:e}: division by zero")]
    DivisionByZero { value: f64 },

    /// Unit or lookup-table conversion failed
    #[error("Conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// A custom transform rejected its input
    #[error("Custom transform '{name}' failed: {message}")]
    Custom { name: String, message: String },
}

/// Signature of a custom transform
pub type TransformFn = fn(f64) -> Result<f64, TransformError>;

/// A pure, composable scalar function
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transform {
    /// `x`
    Identity,
    /// `factor * x`
    Scale { factor: f64 },
    /// `x + amount`
    Offset { amount: f64 },
    /// `scale * x + offset`
    Linear { scale: f64, offset: f64 },
    /// `1 / x`, failing near zero
    Invert,
    /// `-x`
    Negate,
    /// Clamp into `[min, max]`
    Clamp { min: f64, max: f64 },
    /// `x / 100`
    PercentToRatio,
    /// `x * 100`
    RatioToPercent,
    /// Fixed-factor unit conversion
    UnitConvert { from: Unit, to: Unit },
    /// Forward interpolation through a lookup table
    LookupTable { points: LookupTable },
    /// Reverse interpolation through a lookup table
    ReverseLookupTable { points: LookupTable },
    /// Apply each step in order, threading the result
    Compose { steps: Vec<Transform> },
    /// Named function pointer; cannot be expressed in configuration
    #[serde(skip)]
    Custom { name: String, function: TransformFn },
}

impl Transform {
    /// Apply the transform to a single value
    pub fn apply(&self, x: f64) -> Result<f64, TransformError> {
        match self {
            Transform::Identity => Ok(x),
            Transform::Scale { factor } => Ok(x * factor),
            Transform::Offset { amount } => Ok(x + amount),
            Transform::Linear { scale, offset } => Ok(x * scale + offset),
            Transform::Invert => {
                if x.abs() < INVERT_EPSILON {
                    return Err(TransformError::DivisionByZero { value: x });
                }
                Ok(1.0 / x)
            }
            Transform::Negate => Ok(-x),
            Transform::Clamp { min, max } => Ok(UnitConverter::clamp(x, *min, *max, 0.0)),
            Transform::PercentToRatio => Ok(x / 100.0),
            Transform::RatioToPercent => Ok(x * 100.0),
            Transform::UnitConvert { from, to } => Ok(UnitConverter::convert(x, *from, *to)?),
            Transform::LookupTable { points } => Ok(points.interpolate(x)?),
            Transform::ReverseLookupTable { points } => Ok(points.reverse_lookup(x)?),
            Transform::Compose { steps } => steps.iter().try_fold(x, |acc, step| step.apply(acc)),
            Transform::Custom { function, .. } => function(x),
        }
    }

    /// Chain another transform after this one
    pub fn then(self, next: Transform) -> Transform {
        match self {
            Transform::Compose { mut steps } => {
                steps.push(next);
                Transform::Compose { steps }
            }
            Transform::Identity => next,
            first => Transform::Compose {
                steps: vec![first, next],
            },
        }
    }

    /// Human-readable description, used in logs and error context
    pub fn describe(&self) -> String {
        match self {
            Transform::Identity => "identity".to_string(),
            Transform::Scale { factor } => format!("scale({})", factor),
            Transform::Offset { amount } => format!("offset({})", amount),
            Transform::Linear { scale, offset } => format!("linear({}, {})", scale, offset),
            Transform::Invert => "invert".to_string(),
            Transform::Negate => "negate".to_string(),
            Transform::Clamp { min, max } => format!("clamp({}, {})", min, max),
            Transform::PercentToRatio => "percent_to_ratio".to_string(),
            Transform::RatioToPercent => "ratio_to_percent".to_string(),
            Transform::UnitConvert { from, to } => format!("{} -> {}", from, to),
            Transform::LookupTable { points } => format!("lookup({} points)", points.len()),
            Transform::ReverseLookupTable { points } => {
                format!("reverse_lookup({} points)", points.len())
            }
            Transform::Compose { steps } => {
                let inner: Vec<String> = steps.iter().map(Transform::describe).collect();
                format!("[{}]", inner.join(" | "))
            }
            Transform::Custom { name, .. } => format!("custom({})", name),
        }
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        use Transform::*;
        match (self, other) {
            (Identity, Identity)
            | (Invert, Invert)
            | (Negate, Negate)
            | (PercentToRatio, PercentToRatio)
            | (RatioToPercent, RatioToPercent) => true,
            (Scale { factor: a }, Scale { factor: b }) => a == b,
            (Offset { amount: a }, Offset { amount: b }) => a == b,
            (Linear { scale: s1, offset: o1 }, Linear { scale: s2, offset: o2 }) => {
                s1 == s2 && o1 == o2
            }
            (Clamp { min: a1, max: b1 }, Clamp { min: a2, max: b2 }) => a1 == a2 && b1 == b2,
            (UnitConvert { from: f1, to: t1 }, UnitConvert { from: f2, to: t2 }) => {
                f1 == f2 && t1 == t2
            }
            (LookupTable { points: a }, LookupTable { points: b }) => a == b,
            (ReverseLookupTable { points: a }, ReverseLookupTable { points: b }) => a == b,
            (Compose { steps: a }, Compose { steps: b }) => a == b,
            // Function pointers are compared by name only
            (Custom { name: a, .. }, Custom { name: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}
