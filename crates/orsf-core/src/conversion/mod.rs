//! Numeric conversion primitives
//!
//! Two leaf converters live here:
//! - [`units`]: fixed-factor conversion between units of one physical quantity
//! - [`lookup`]: piecewise-linear lookup tables with forward and reverse lookup
//!
//! Both are pure and hold no shared state. The transform pipeline in
//! [`crate::transformer`] builds on top of them.
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

pub mod lookup;
pub mod units;

use thiserror::Error;

pub use lookup::{LookupTable, LutEntry};
pub use units::{Unit, UnitConverter, UnitFamily};

/// Errors raised by unit and lookup-table conversion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Source and target units measure different quantities
    #[error("Cannot convert {from} ({from_family}) to {to} ({to_family})")]
    IncompatibleUnits {
        from: Unit,
        to: Unit,
        from_family: UnitFamily,
        to_family: UnitFamily,
    },

    /// Unit name not in the conversion table
    #[error("Unknown unit: {name}")]
    UnknownUnit { name: String },

    /// Interpolation requested on a table without control points
    #[error("Empty lookup table")]
    EmptyLookupTable,

    /// Checked construction found outputs that rise and fall
    #[error("Lookup table outputs are not monotonic (direction changes at input {input})")]
    NonMonotonicTable { input: f64 },
}
