//! Engine configuration
//!
//! Configuration describes the validation mode and any number of
//! rule-driven adapters. It is loaded from YAML (`.yaml`/`.yml`) or JSON
//! files; every section has defaults so partial files are fine.
//!
//! ```yaml
//! validation:
//!   mode: lenient
//! adapters:
//!   - id: acc
//!     version: "1.9"
//!     car_key: porsche_992_gt3_r
//!     file_extension: json
//!     mappings:
//!       - canonical_path: setup.tires.pressure_fl_kpa
//!         native_key: tyre_pressure_lf
//!         forward_transform: { type: unit_convert, from: kpa, to: psi }
//!         reverse_transform: { type: unit_convert, from: psi, to: kpa }
//! ```

use crate::adapter::AdapterMetadata;
use crate::error::{Error, Result};
use crate::mapping::{FieldMapping, FieldMappingBuilder};
use crate::validator::{ValidationMode, Validator};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub validation: ValidationConfig,

    /// Adapters described entirely by mapping rules
    pub adapters: Vec<AdapterConfig>,
}

/// Validation settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub mode: ValidationMode,
}

/// One configured adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterConfig {
    #[serde(flatten)]
    pub metadata: AdapterMetadata,

    #[serde(default = "default_file_extension")]
    pub file_extension: String,

    #[serde(default)]
    pub mappings: Vec<FieldMapping>,
}

fn default_file_extension() -> String {
    "ini".to_string()
}

impl EngineConfig {
    /// Load configuration from a file, picking the format from the extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            message: format!("Failed to read config file {}", path.display()),
            source: e,
        })?;

        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            other => {
                return Err(Error::configuration(format!(
                    "Unsupported config file extension: {:?}",
                    other
                )))
            }
        };

        log::debug!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| Error::Configuration {
            message: "Failed to parse YAML configuration".to_string(),
            source: Some(e.into()),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content).map_err(|e| Error::Configuration {
            message: "Failed to parse JSON configuration".to_string(),
            source: Some(e.into()),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file in the format its extension names
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => {
                serde_yaml::to_string(self).map_err(|e| Error::Configuration {
                    message: "Failed to serialize configuration".to_string(),
                    source: Some(e.into()),
                })?
            }
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| Error::json("Failed to serialize configuration", e))?,
            other => {
                return Err(Error::configuration(format!(
                    "Unsupported config file extension: {:?}",
                    other
                )))
            }
        };

        std::fs::write(path, content).map_err(|e| Error::Io {
            message: format!("Failed to write config file {}", path.display()),
            source: e,
        })
    }

    /// Check adapter identities and every mapping rule
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for adapter in &self.adapters {
            let meta = &adapter.metadata;
            if meta.id.trim().is_empty() {
                return Err(Error::configuration("Adapter id cannot be empty"));
            }

            let identity = (meta.id.as_str(), meta.version.as_str(), meta.car_key.as_str());
            if !seen.insert(identity) {
                return Err(Error::configuration(format!(
                    "Duplicate adapter {} {} {}",
                    meta.id, meta.version, meta.car_key
                )));
            }

            for mapping in &adapter.mappings {
                let mut builder =
                    FieldMappingBuilder::new(&mapping.canonical_path, &mapping.native_key);
                if let Some(transform) = &mapping.forward_transform {
                    builder = builder.forward(transform.clone());
                }
                if let Some(transform) = &mapping.reverse_transform {
                    builder = builder.reverse(transform.clone());
                }
                builder.build().map_err(|e| Error::Configuration {
                    message: format!("Invalid mapping in adapter {}", meta.id),
                    source: Some(e.into()),
                })?;
            }
        }

        Ok(())
    }

    /// Validator configured with this mode
    pub fn validator(&self) -> Validator {
        Validator::with_mode(self.validation.mode)
    }
}
