//! Line-oriented `key = value` adapter
//!
//! Encoding runs the adapter's mapping rules and writes one sorted line per
//! native key after a comment header. Decoding parses the lines and applies
//! the reverse rules on top of a template setup. Blank lines and lines
//! starting with `#` or `;` are ignored.
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

use super::{Adapter, AdapterMetadata};
use crate::error::{Error, Result};
use crate::mapping::{FieldMapping, FlatSetup};
use crate::types::Orsf;
use std::fmt::Write as _;

pub struct KeyValueAdapter {
    metadata: AdapterMetadata,
    mappings: Vec<FieldMapping>,
    extension: String,
    template: Orsf,
}

impl KeyValueAdapter {
    pub fn new(metadata: AdapterMetadata, mappings: Vec<FieldMapping>) -> Self {
        Self {
            metadata,
            mappings,
            extension: "ini".to_string(),
            template: Orsf::default(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Setup that decoded values are written on top of
    pub fn with_template(mut self, template: Orsf) -> Self {
        self.template = template;
        self
    }

    pub fn template(&self) -> &Orsf {
        &self.template
    }

    /// Render native values as text
    pub fn render(&self, native: &FlatSetup) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "# {} {} {}",
            self.metadata.id, self.metadata.version, self.metadata.car_key
        );
        for (key, value) in native {
            let _ = writeln!(out, "{} = {}", key, value);
        }
        out
    }

    /// Parse text into native values
    pub fn parse(&self, text: &str) -> Result<FlatSetup> {
        let mut native = FlatSetup::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| {
                Error::adapter(
                    &self.metadata.id,
                    format!("Line {}: expected 'key = value'", index + 1),
                )
            })?;

            let key = key.trim();
            if key.is_empty() {
                return Err(Error::adapter(
                    &self.metadata.id,
                    format!("Line {}: empty key", index + 1),
                ));
            }

            let value: f64 = value.trim().parse().map_err(|_| {
                Error::adapter(
                    &self.metadata.id,
                    format!("Line {}: '{}' is not a number", index + 1, value.trim()),
                )
            })?;
            if !value.is_finite() {
                return Err(Error::adapter(
                    &self.metadata.id,
                    format!("Line {}: '{}' is not a finite number", index + 1, value),
                ));
            }

            if native.insert(key.to_string(), value).is_some() {
                log::warn!(
                    "Duplicate key '{}' in {} input, keeping the last value",
                    key,
                    self.metadata.id
                );
            }
        }

        Ok(native)
    }
}

impl Adapter for KeyValueAdapter {
    fn metadata(&self) -> &AdapterMetadata {
        &self.metadata
    }

    fn field_mappings(&self) -> &[FieldMapping] {
        &self.mappings
    }

    fn to_native(&self, orsf: &Orsf) -> Result<Vec<u8>> {
        let _span = tracing::debug_span!("to_native", adapter = %self.metadata.id).entered();
        let native = self.to_flat(orsf)?;
        tracing::debug!(keys = native.len(), "mapped setup to native keys");
        Ok(self.render(&native).into_bytes())
    }

    fn from_native(&self, data: &[u8]) -> Result<Orsf> {
        let _span = tracing::debug_span!("from_native", adapter = %self.metadata.id).entered();
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::adapter(&self.metadata.id, format!("Input is not UTF-8: {}", e)))?;
        let native = self.parse(text)?;
        tracing::debug!(keys = native.len(), "parsed native keys");
        self.from_flat(&native, &self.template)
    }

    fn file_extension(&self) -> &str {
        &self.extension
    }
}
