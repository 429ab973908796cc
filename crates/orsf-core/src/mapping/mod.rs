//! Path mapping between canonical setups and flat key/value representations
//!
//! Every numeric leaf of a setup has a dotted path such as
//! `setup.suspension.front_left.camber_deg` or `setup.gearing.gear_3`. The
//! engine reads and writes through those paths, flattens a whole setup into a
//! sorted map, and applies ordered [`FieldMapping`] rules to move values into
//! and out of a native key vocabulary.
//!
//! # Module Organization
//!
//! - [`paths`] - Path grammar and the static per-section accessor tables
//! - [`engine`] - [`MappingEngine`] operations
//! - [`field_mapping`] - [`FieldMapping`] rules and their builder
//!
//! # Examples
//!
//! ```
//! use orsf_core::mapping::{FieldMapping, MappingEngine};
//! use orsf_core::transformer::built_in;
//! use orsf_core::Orsf;
//!
//! let mut orsf = Orsf::new("id", "Monza", "Porsche", "911 GT3 R");
//! MappingEngine::set_value(&mut orsf, "setup.tires.pressure_fl_kpa", 170.0);
//!
//! let rules = vec![FieldMapping::new("setup.tires.pressure_fl_kpa", "tire_fl_pressure")
//!     .with_forward(built_in::pressure_kpa_to_psi())
//!     .with_reverse(built_in::pressure_psi_to_kpa())];
//!
//! let native = MappingEngine::map_to_native(&orsf, &rules).unwrap();
//! assert!((native["tire_fl_pressure"] - 24.656).abs() < 1e-3);
//! ```
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

use crate::transformer::TransformError;
use std::collections::BTreeMap;
use thiserror::Error;

// Path grammar and accessor tables
pub mod paths;

// Flatten, get/set and rule-driven mapping
pub mod engine;

// Mapping rules
pub mod field_mapping;


pub use engine::MappingEngine;
pub use field_mapping::{FieldMapping, FieldMappingBuilder};
pub use paths::{known_paths, Section, SetupPath, MAX_GEARS};

/// Flat key to value representation, keyed either by canonical path or by
/// native key
pub type FlatSetup = BTreeMap<String, f64>;

/// Errors raised by rule-driven mapping
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    /// A required canonical field had no value
    #[error("Required field missing: {path}")]
    RequiredFieldMissing { path: String },

    /// A required native key was absent from the input
    #[error("Required native key missing: {key}")]
    RequiredNativeKeyMissing { key: String },

    /// A transform failed while mapping the given canonical path
    #[error("Transform failed for {path}: {source}")]
    Transform {
        path: String,
        #[source]
        source: TransformError,
    },
}
