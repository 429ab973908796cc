//! Core validation engine
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

use super::cross_field::validate_temperatures;
use super::field_validators::{
    validate_aero, validate_brakes, validate_car, validate_context, validate_drivetrain,
    validate_electronics, validate_fuel, validate_gearing, validate_metadata, validate_schema,
    validate_suspension, validate_tires,
};
use super::{ValidationError, ValidationMode, ValidationSeverity};
use crate::error::{Error, Result};
use crate::types::Orsf;

/// Semantic validator for canonical setups
///
/// Every check runs on every call; findings are collected in document order
/// (schema, metadata, car, context, setup sections, cross-field checks).
/// Validation itself never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    mode: ValidationMode,
}

impl Validator {
    /// Validator reporting every finding
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: ValidationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Run all checks and return the findings the mode keeps
    pub fn validate(&self, orsf: &Orsf) -> Vec<ValidationError> {
        let setup = &orsf.setup;
        let mut errors = Vec::new();

        errors.extend(validate_schema(orsf));
        errors.extend(validate_metadata(&orsf.metadata));
        errors.extend(validate_car(&orsf.car));
        errors.extend(validate_context(orsf.context.as_ref()));

        errors.extend(validate_aero(setup.aero.as_ref()));
        errors.extend(validate_suspension(setup.suspension.as_ref()));
        errors.extend(validate_tires(setup.tires.as_ref()));
        errors.extend(validate_drivetrain(setup.drivetrain.as_ref()));
        errors.extend(validate_gearing(setup.gearing.as_ref()));
        errors.extend(validate_brakes(setup.brakes.as_ref()));
        errors.extend(validate_electronics(setup.electronics.as_ref()));
        errors.extend(validate_fuel(setup.fuel.as_ref()));

        errors.extend(validate_temperatures(orsf));

        self.filter_errors_by_mode(errors)
    }

    /// Fail with the first error-severity finding, if any
    pub fn validate_strict(&self, orsf: &Orsf) -> Result<()> {
        let errors = self.validate(orsf);

        if let Some(error) = errors.iter().find(|e| e.severity == ValidationSeverity::Error) {
            return Err(Error::Validation {
                field: error.field_path.clone(),
                message: error.message.clone(),
                expected: error.expected.clone(),
            });
        }

        Ok(())
    }

    fn filter_errors_by_mode(&self, errors: Vec<ValidationError>) -> Vec<ValidationError> {
        match self.mode {
            ValidationMode::Strict => errors,
            ValidationMode::Lenient => errors.into_iter().filter(ValidationError::is_error).collect(),
        }
    }
}
