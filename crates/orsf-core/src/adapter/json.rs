//! JSON adapter
//!
//! The native format is the canonical document itself, written as indented
//! JSON. Its mapping rules describe a small generic key vocabulary.
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

use super::{Adapter, AdapterMetadata};
use crate::error::{Error, Result};
use crate::mapping::FieldMapping;
use crate::transformer::built_in;
use crate::types::Orsf;

pub struct JsonAdapter {
    metadata: AdapterMetadata,
    mappings: Vec<FieldMapping>,
}

impl JsonAdapter {
    pub fn new() -> Self {
        Self {
            metadata: AdapterMetadata::new("json", "1.0", "generic")
                .with_description("Canonical ORSF document as JSON")
                .with_author("ORSF Team"),
            mappings: vec![
                FieldMapping::new("setup.aero.front_wing", "aero_front"),
                FieldMapping::new("setup.aero.rear_wing", "aero_rear"),
                FieldMapping::new("setup.tires.pressure_fl_kpa", "tire_fl_pressure")
                    .with_forward(built_in::pressure_kpa_to_psi())
                    .with_reverse(built_in::pressure_psi_to_kpa()),
                FieldMapping::new("setup.brakes.brake_bias_pct", "brake_balance"),
            ],
        }
    }
}

impl Default for JsonAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Adapter for JsonAdapter {
    fn metadata(&self) -> &AdapterMetadata {
        &self.metadata
    }

    fn field_mappings(&self) -> &[FieldMapping] {
        &self.mappings
    }

    fn to_native(&self, orsf: &Orsf) -> Result<Vec<u8>> {
        let _span = tracing::debug_span!("to_native", adapter = %self.metadata.id).entered();
        Ok(orsf.to_json_string_pretty()?.into_bytes())
    }

    fn from_native(&self, data: &[u8]) -> Result<Orsf> {
        let _span = tracing::debug_span!("from_native", adapter = %self.metadata.id).entered();
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::adapter(&self.metadata.id, format!("Input is not UTF-8: {}", e)))?;
        Orsf::from_json_str(text)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
