//! Error types for the ORSF core library
//!
//! This module defines the crate-wide error type. Module-level errors
//! (unit and lookup-table conversion, transform application, field mapping)
//! are defined next to the code that raises them and fold into [`Error`].
//!
//! Semantic validation findings are *not* errors: the validator returns them
//! as a list of diagnostics (see [`crate::validator`]).

use crate::conversion::ConversionError;
use crate::mapping::MappingError;
use crate::transformer::TransformError;
use thiserror::Error;

/// Main error type for ORSF operations
#[derive(Error, Debug)]
pub enum Error {
    /// Document carries an unexpected schema tag
    #[error("Invalid schema version: {found} (expected {expected})")]
    Schema {
        expected: String,
        found: String,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A required field was missing while mapping
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// A transform could not be applied to its input
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Unit or lookup-table conversion failed
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A validation diagnostic promoted to a hard failure
    #[error("Validation error: {field} - {message}")]
    Validation {
        field: String,
        message: String,
        expected: Option<String>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Adapter-specific failures (native encoding, unknown adapter)
    #[error("Adapter error: {adapter} - {message}")]
    Adapter {
        adapter: String,
        message: String,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a serde_json error with a short description of what was attempted
    pub(crate) fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Json {
            message: message.into(),
            source,
        }
    }

    /// Build a configuration error without an underlying cause
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Build an adapter error
    pub(crate) fn adapter(adapter: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Adapter {
            adapter: adapter.into(),
            message: message.into(),
        }
    }
}
