//! Semantic validation of canonical setups
//!
//! The validator walks a setup and returns every finding as a
//! [`ValidationError`] carrying a severity, a code, the dotted field path and,
//! where meaningful, the expected bound and the actual value. It never stops
//! at the first problem.
//!
//! The validator is organized into focused modules:
//! - `types`: Findings, severities, codes and modes
//! - `core`: The [`Validator`] orchestration
//! - `field_validators`: Per-section checks and shared helpers
//! - `cross_field`: Checks relating several fields
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

pub mod core;
pub mod cross_field;
pub mod field_validators;
pub mod types;


pub use self::core::Validator;
pub use types::{ValidationCode, ValidationError, ValidationMode, ValidationSeverity};
