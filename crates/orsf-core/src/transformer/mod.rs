//! Scalar transform pipeline for translating values between representations
//!
//! Transforms turn a canonical value into a native one (unit changes,
//! scaling, encodings via lookup tables) and back. Each field mapping carries
//! an optional forward and an optional reverse transform.
//!
//! # Module Organization
//!
//! - [`types`] - The [`Transform`] type and [`TransformError`]
//! - [`built_in`] - Constructors for every primitive
//!
//! # Examples
//!
//! ```
//! use orsf_core::transformer::built_in;
//!
//! let to_native = built_in::compose(vec![built_in::scale(2.0), built_in::offset(10.0)]);
//! assert_eq!(to_native.apply(5.0).unwrap(), 20.0);
//!
//! let to_psi = built_in::pressure_kpa_to_psi();
//! assert!((to_psi.apply(170.0).unwrap() - 24.656).abs() < 1e-3);
//! ```
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

// Core types and error definitions
pub mod types;

// Primitive constructors
pub mod built_in;

#[cfg(test)]
mod tests;

pub use types::{Transform, TransformError, TransformFn, INVERT_EPSILON};
