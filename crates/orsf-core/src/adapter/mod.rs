//! Adapters between canonical setups and native setup formats
//!
//! An [`Adapter`] knows one native format: how to encode a canonical setup
//! into native bytes, how to read them back, and which [`FieldMapping`] rules
//! connect the two vocabularies. Adapters are looked up through an explicit
//! [`AdapterRegistry`] owned by the caller.
//!
//! # Module Organization
//!
//! - [`registry`] - [`AdapterRegistry`]
//! - [`json`] - [`JsonAdapter`], the canonical document as JSON
//! - [`key_value`] - [`KeyValueAdapter`], `key = value` text driven by mapping rules
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use crate::mapping::{FieldMapping, FlatSetup, MappingEngine};
use crate::types::Orsf;
use crate::validator::{ValidationError, Validator};
use serde::{Deserialize, Serialize};

pub mod json;
pub mod key_value;
pub mod registry;

pub use json::JsonAdapter;
pub use key_value::KeyValueAdapter;
pub use registry::AdapterRegistry;

/// Identification of an adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterMetadata {
    /// Format or simulator identifier, e.g. `"acc"`
    pub id: String,
    /// Native format version the adapter targets
    pub version: String,
    /// Normalized car identifier, or `"generic"`
    pub car_key: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
}

impl AdapterMetadata {
    pub fn new(
        id: impl Into<String>,
        version: impl Into<String>,
        car_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            car_key: car_key.into(),
            description: String::new(),
            author: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Whether this adapter satisfies the given lookup constraints.
    /// `None` matches anything.
    pub fn matches(&self, id: &str, version: Option<&str>, car_key: Option<&str>) -> bool {
        self.id == id
            && version.map_or(true, |v| self.version == v)
            && car_key.map_or(true, |c| self.car_key == c)
    }
}

/// A native setup format
pub trait Adapter: Send + Sync {
    fn metadata(&self) -> &AdapterMetadata;

    /// Rules connecting canonical paths and native keys
    fn field_mappings(&self) -> &[FieldMapping];

    /// Encode a canonical setup as native bytes
    fn to_native(&self, orsf: &Orsf) -> Result<Vec<u8>>;

    /// Decode native bytes into a canonical setup
    #[allow(clippy::wrong_self_convention)]
    fn from_native(&self, data: &[u8]) -> Result<Orsf>;

    /// Format-specific validation; defaults to the standard validator
    fn validate(&self, orsf: &Orsf) -> Vec<ValidationError> {
        Validator::new().validate(orsf)
    }

    /// Native file extension without the dot
    fn file_extension(&self) -> &str;

    fn suggested_filename(&self) -> String {
        format!("setup_{}.{}", self.metadata().id, self.file_extension())
    }

    /// Native-keyed values produced by this adapter's rules
    fn to_flat(&self, orsf: &Orsf) -> Result<FlatSetup> {
        Ok(MappingEngine::map_to_native(orsf, self.field_mappings())?)
    }

    /// Apply this adapter's rules to native values on top of `template`
    #[allow(clippy::wrong_self_convention)]
    fn from_flat(&self, flat: &FlatSetup, template: &Orsf) -> Result<Orsf> {
        Ok(MappingEngine::map_to_orsf(flat, self.field_mappings(), template)?)
    }
}
