//! Mapping engine operations
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

use super::field_mapping::FieldMapping;
use super::paths::{self, SetupPath};
use super::{FlatSetup, MappingError};
use crate::types::Orsf;

/// Stateless operations over canonical setups and flat representations
pub struct MappingEngine;

impl MappingEngine {
    /// Every present numeric leaf keyed by its canonical path.
    /// Absent fields produce no entry.
    pub fn flatten(orsf: &Orsf) -> FlatSetup {
        let mut flat = FlatSetup::new();
        paths::flatten_into(&orsf.setup, &mut flat);
        flat
    }

    /// Read one value. Anything unresolved (malformed path, missing section,
    /// corner or field) reads as `None`.
    pub fn get_value(orsf: &Orsf, path: &str) -> Option<f64> {
        SetupPath::parse(path)?.read(&orsf.setup)
    }

    /// Write one value, creating missing sections and corners as needed.
    ///
    /// Malformed paths and unknown leaves leave the setup untouched and
    /// return `false`. Writing past the end of the gear list pads the
    /// skipped gears with `0.0`.
    pub fn set_value(orsf: &mut Orsf, path: &str, value: f64) -> bool {
        let written = SetupPath::parse(path)
            .map(|parsed| parsed.write(&mut orsf.setup, value))
            .unwrap_or(false);

        if !written {
            log::debug!("Ignoring write to unresolvable path '{}'", path);
        }
        written
    }

    /// Copy of `orsf` with one value written
    pub fn with_value(orsf: &Orsf, path: &str, value: f64) -> Orsf {
        let mut copy = orsf.clone();
        Self::set_value(&mut copy, path, value);
        copy
    }

    /// Apply `mappings` in order to produce a native-keyed representation.
    /// Later rules overwrite earlier ones writing the same native key.
    pub fn map_to_native(
        orsf: &Orsf,
        mappings: &[FieldMapping],
    ) -> Result<FlatSetup, MappingError> {
        let mut native = FlatSetup::new();

        for mapping in mappings {
            let Some(value) = Self::get_value(orsf, &mapping.canonical_path) else {
                if mapping.required {
                    return Err(MappingError::RequiredFieldMissing {
                        path: mapping.canonical_path.clone(),
                    });
                }
                log::debug!(
                    "Skipping optional mapping {} -> {}: no value",
                    mapping.canonical_path,
                    mapping.native_key
                );
                continue;
            };

            let converted = mapping
                .to_native(value)
                .map_err(|source| MappingError::Transform {
                    path: mapping.canonical_path.clone(),
                    source,
                })?;
            native.insert(mapping.native_key.clone(), converted);
        }

        Ok(native)
    }

    /// Rebuild a setup from native values, starting from a copy of
    /// `template`. Optional keys missing from `native` keep the template's
    /// value.
    pub fn map_to_orsf(
        native: &FlatSetup,
        mappings: &[FieldMapping],
        template: &Orsf,
    ) -> Result<Orsf, MappingError> {
        let mut orsf = template.clone();

        for mapping in mappings {
            let Some(&value) = native.get(&mapping.native_key) else {
                if mapping.required {
                    return Err(MappingError::RequiredNativeKeyMissing {
                        key: mapping.native_key.clone(),
                    });
                }
                log::debug!(
                    "Skipping optional mapping {} <- {}: key not present",
                    mapping.canonical_path,
                    mapping.native_key
                );
                continue;
            };

            let converted = mapping
                .to_canonical(value)
                .map_err(|source| MappingError::Transform {
                    path: mapping.canonical_path.clone(),
                    source,
                })?;
            Self::set_value(&mut orsf, &mapping.canonical_path, converted);
        }

        Ok(orsf)
    }

    /// Treat every key of `flat` as a canonical path and write it into a
    /// copy of `template`
    pub fn inflate(flat: &FlatSetup, template: &Orsf) -> Orsf {
        let mut orsf = template.clone();
        for (path, value) in flat {
            Self::set_value(&mut orsf, path, *value);
        }
        orsf
    }

    /// Every fixed canonical path the engine can address
    pub fn canonical_paths() -> Vec<String> {
        paths::known_paths()
    }
}
