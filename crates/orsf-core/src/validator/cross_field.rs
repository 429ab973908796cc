//! Checks spanning more than one field
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

use super::{ValidationCode, ValidationError, ValidationSeverity};
use crate::types::Orsf;

/// Track may sit at most this far below ambient
pub const TRACK_BELOW_AMBIENT_C: f64 = 5.0;

/// Track may sit at most this far above ambient
pub const TRACK_ABOVE_AMBIENT_C: f64 = 40.0;

/// Track temperature against ambient temperature
pub fn validate_temperatures(orsf: &Orsf) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let Some(ctx) = &orsf.context else {
        return errors;
    };

    if let (Some(ambient), Some(track)) = (ctx.ambient_temp_c, ctx.track_temp_c) {
        if track < ambient - TRACK_BELOW_AMBIENT_C {
            errors.push(
                ValidationError::new(
                    ValidationSeverity::Warning,
                    ValidationCode::Incompatible,
                    "context.track_temp_c",
                    "Track temperature is significantly lower than ambient temperature",
                )
                .expected(format!(">= {}", ambient - TRACK_BELOW_AMBIENT_C))
                .actual(track.to_string()),
            );
        }

        if track > ambient + TRACK_ABOVE_AMBIENT_C {
            errors.push(
                ValidationError::new(
                    ValidationSeverity::Warning,
                    ValidationCode::Incompatible,
                    "context.track_temp_c",
                    "Track temperature is unusually high compared to ambient",
                )
                .expected(format!("<= {}", ambient + TRACK_ABOVE_AMBIENT_C))
                .actual(track.to_string()),
            );
        }
    }

    errors
}
