//! ORSF Core - Conversion engine for canonical racing simulator setups
//!
//! This crate converts between the canonical ORSF setup document and flat
//! native representations used by individual simulators, and validates
//! canonical setups.
//!
//! # Main Components
//!
//! - **Core Types**: The typed [`Orsf`] document with JSON encoding
//! - **Conversion**: Fixed-factor unit conversion and lookup tables
//! - **Transforms**: Composable scalar transforms applied per field
//! - **Mapping**: Dotted-path access, flattening and rule-driven mapping
//! - **Validation**: Collect-all semantic checks with severities
//! - **Adapters**: Native formats and an explicit adapter registry
//!
//! # Example
//!
//! ```
//! use orsf_core::{MappingEngine, Orsf, Result, Validator};
//!
//! fn example() -> Result<()> {
//!     let mut orsf = Orsf::new("a1b2", "Spa race", "Porsche", "911 GT3 R");
//!     MappingEngine::set_value(&mut orsf, "setup.brakes.brake_bias_pct", 56.0);
//!     MappingEngine::set_value(&mut orsf, "setup.suspension.front_left.camber_deg", -3.4);
//!
//!     let flat = MappingEngine::flatten(&orsf);
//!     assert_eq!(flat.len(), 2);
//!
//!     let findings = Validator::new().validate(&orsf);
//!     assert!(findings.is_empty());
//!
//!     let json = orsf.to_json_string()?;
//!     assert_eq!(Orsf::from_json_str(&json)?, orsf);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod adapter;
pub mod config;
pub mod conversion;
pub mod error;
pub mod mapping;
pub mod timestamps;
pub mod transformer;
pub mod types;
pub mod validator;

// Re-export main types for convenience
pub use adapter::{Adapter, AdapterMetadata, AdapterRegistry, JsonAdapter, KeyValueAdapter};
pub use config::EngineConfig;
pub use conversion::{ConversionError, LookupTable, LutEntry, Unit, UnitConverter, UnitFamily};
pub use error::{Error, Result};
pub use mapping::{FieldMapping, FieldMappingBuilder, FlatSetup, MappingEngine, MappingError};
pub use transformer::{Transform, TransformError};
pub use types::{
    // Document
    Orsf, Metadata, Car, Context, Setup,

    // Setup sections
    Aerodynamics, Suspension, CornerSuspension, Corner, Tires, Drivetrain, Gearing, Brakes,
    Electronics, Fuel, Strategy,

    SCHEMA_V1,
};
pub use validator::{
    ValidationCode, ValidationError, ValidationMode, ValidationSeverity, Validator,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
