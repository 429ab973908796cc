//! Field mapping rules
//!
//! A [`FieldMapping`] pairs one canonical path with one native key, plus an
//! optional transform for each direction. Rules are plain data so adapters
//! can be described in configuration files.
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

use super::paths::SetupPath;
use crate::conversion::Unit;
use crate::error::{Error, Result};
use crate::transformer::{built_in, Transform, TransformError};
use serde::{Deserialize, Serialize};

/// One canonical path to native key rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Dotted canonical path, e.g. `setup.aero.front_wing`
    pub canonical_path: String,

    /// Key in the native vocabulary
    pub native_key: String,

    /// Applied when writing the native value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_transform: Option<Transform>,

    /// Applied when reading the native value back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_transform: Option<Transform>,

    #[serde(default)]
    pub required: bool,
}

impl FieldMapping {
    /// An optional rule with no transforms
    pub fn new(canonical_path: impl Into<String>, native_key: impl Into<String>) -> Self {
        Self {
            canonical_path: canonical_path.into(),
            native_key: native_key.into(),
            forward_transform: None,
            reverse_transform: None,
            required: false,
        }
    }

    /// Start a checked builder
    pub fn builder(
        canonical_path: impl Into<String>,
        native_key: impl Into<String>,
    ) -> FieldMappingBuilder {
        FieldMappingBuilder::new(canonical_path, native_key)
    }

    pub fn with_forward(mut self, transform: Transform) -> Self {
        self.forward_transform = Some(transform);
        self
    }

    pub fn with_reverse(mut self, transform: Transform) -> Self {
        self.reverse_transform = Some(transform);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Canonical value to native value
    pub fn to_native(&self, value: f64) -> std::result::Result<f64, TransformError> {
        match &self.forward_transform {
            Some(transform) => transform.apply(value),
            None => Ok(value),
        }
    }

    /// Native value to canonical value
    pub fn to_canonical(&self, value: f64) -> std::result::Result<f64, TransformError> {
        match &self.reverse_transform {
            Some(transform) => transform.apply(value),
            None => Ok(value),
        }
    }
}

/// Builder for [`FieldMapping`] that checks the rule before handing it out
pub struct FieldMappingBuilder {
    canonical_path: String,
    native_key: String,
    forward_transform: Option<Transform>,
    reverse_transform: Option<Transform>,
    required: bool,
}

impl FieldMappingBuilder {
    pub fn new(canonical_path: impl Into<String>, native_key: impl Into<String>) -> Self {
        Self {
            canonical_path: canonical_path.into(),
            native_key: native_key.into(),
            forward_transform: None,
            reverse_transform: None,
            required: false,
        }
    }

    /// Transform applied towards the native side
    pub fn forward(mut self, transform: Transform) -> Self {
        self.forward_transform = Some(transform);
        self
    }

    /// Transform applied towards the canonical side
    pub fn reverse(mut self, transform: Transform) -> Self {
        self.reverse_transform = Some(transform);
        self
    }

    /// Convert between the canonical unit and a native unit in both directions
    pub fn units(self, canonical: Unit, native: Unit) -> Self {
        self.forward(built_in::unit_convert(canonical, native))
            .reverse(built_in::unit_convert(native, canonical))
    }

    /// Make the rule required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Build the rule, rejecting unknown paths, empty or unwritable keys and
    /// cross-family unit conversions
    pub fn build(self) -> Result<FieldMapping> {
        let known = SetupPath::parse(&self.canonical_path)
            .map(|path| path.is_known())
            .unwrap_or(false);
        if !known {
            return Err(Error::configuration(format!(
                "Unknown canonical path: {}",
                self.canonical_path
            )));
        }

        if self.native_key.trim().is_empty() {
            return Err(Error::configuration(format!(
                "Native key for {} is empty",
                self.canonical_path
            )));
        }

        // Keys must survive a `key = value` line unchanged
        let key = self.native_key.as_str();
        if key.trim() != key
            || key.contains(['=', '\n', '\r'])
            || key.starts_with(['#', ';'])
        {
            return Err(Error::configuration(format!(
                "Native key {:?} for {} cannot be written as a key/value line",
                key, self.canonical_path
            )));
        }

        for transform in self.forward_transform.iter().chain(&self.reverse_transform) {
            check_units(transform)?;
        }

        Ok(FieldMapping {
            canonical_path: self.canonical_path,
            native_key: self.native_key,
            forward_transform: self.forward_transform,
            reverse_transform: self.reverse_transform,
            required: self.required,
        })
    }
}

fn check_units(transform: &Transform) -> Result<()> {
    match transform {
        Transform::UnitConvert { from, to } if from.family() != to.family() => {
            Err(Error::configuration(format!(
                "Cannot convert {} to {}: {} and {} are different quantities",
                from,
                to,
                from.family(),
                to.family()
            )))
        }
        Transform::Compose { steps } => steps.iter().try_for_each(check_units),
        _ => Ok(()),
    }
}
