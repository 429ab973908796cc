//! Field-specific validation logic
//!
//! One function per document part, each returning its findings in field
//! order, plus the small check helpers they share.
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

use super::{ValidationCode, ValidationError, ValidationSeverity};
use crate::timestamps::{self, ISO8601_FORMAT_HINT};
use crate::types::{
    Aerodynamics, Brakes, Car, Context, CornerSuspension, Corner, Drivetrain, Electronics, Fuel,
    Gearing, Metadata, Orsf, Suspension, Tires, SCHEMA_V1,
};

pub const KNOWN_CAR_CLASSES: &[&str] = &[
    "GT3", "GTE", "LMP2", "LMDh", "GT4", "TCR", "F1", "F2", "F3", "F4", "Formula",
];

pub const RUBBER_LEVELS: &[&str] = &["green", "low", "medium", "high", "saturated"];

const AMBIENT_TEMP_RANGE_C: (f64, f64) = (-50.0, 70.0);
const TRACK_TEMP_RANGE_C: (f64, f64) = (-20.0, 80.0);
const CAMBER_RANGE_DEG: (f64, f64) = (-10.0, 5.0);
const TIRE_PRESSURE_RANGE_KPA: (f64, f64) = (50.0, 400.0);

pub fn validate_schema(orsf: &Orsf) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if orsf.schema != SCHEMA_V1 {
        errors.push(
            ValidationError::new(
                ValidationSeverity::Error,
                ValidationCode::SchemaInvalid,
                "schema",
                "Invalid schema version",
            )
            .expected(SCHEMA_V1)
            .actual(orsf.schema.clone()),
        );
    }
    errors
}

pub fn validate_metadata(metadata: &Metadata) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_required(&mut errors, "metadata.id", &metadata.id);
    check_required(&mut errors, "metadata.name", &metadata.name);
    check_required(&mut errors, "metadata.created_at", &metadata.created_at);

    if !metadata.created_at.is_empty() {
        check_iso8601(&mut errors, "metadata.created_at", &metadata.created_at);
    }

    if let Some(updated_at) = metadata.updated_at.as_deref().filter(|s| !s.is_empty()) {
        check_iso8601(&mut errors, "metadata.updated_at", updated_at);

        let created = timestamps::parse_iso8601(&metadata.created_at);
        let updated = timestamps::parse_iso8601(updated_at);
        if let (Some(created), Some(updated)) = (created, updated) {
            if updated < created {
                errors.push(ValidationError::new(
                    ValidationSeverity::Warning,
                    ValidationCode::Incompatible,
                    "metadata.updated_at",
                    "Updated timestamp is before created timestamp",
                ));
            }
        }
    }

    errors
}

pub fn validate_car(car: &Car) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_required(&mut errors, "car.make", &car.make);
    check_required(&mut errors, "car.model", &car.model);

    if let Some(class) = &car.car_class {
        if !KNOWN_CAR_CLASSES.contains(&class.as_str()) {
            errors.push(ValidationError::new(
                ValidationSeverity::Warning,
                ValidationCode::InvalidFormat,
                "car.class",
                format!("Unknown car class: {}", class),
            ));
        }
    }

    errors
}

pub fn validate_context(context: Option<&Context>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let Some(ctx) = context else {
        return errors;
    };

    let (min, max) = AMBIENT_TEMP_RANGE_C;
    check_range(
        &mut errors,
        "context.ambient_temp_c",
        ctx.ambient_temp_c,
        min,
        max,
        ValidationSeverity::Warning,
    );
    let (min, max) = TRACK_TEMP_RANGE_C;
    check_range(
        &mut errors,
        "context.track_temp_c",
        ctx.track_temp_c,
        min,
        max,
        ValidationSeverity::Warning,
    );
    check_range(
        &mut errors,
        "context.wetness",
        ctx.wetness,
        0.0,
        1.0,
        ValidationSeverity::Error,
    );

    if let Some(rubber) = &ctx.rubber {
        if !RUBBER_LEVELS.contains(&rubber.as_str()) {
            errors.push(ValidationError::new(
                ValidationSeverity::Warning,
                ValidationCode::InvalidFormat,
                "context.rubber",
                format!("Unknown rubber level: {}", rubber),
            ));
        }
    }

    errors
}

pub fn validate_aero(aero: Option<&Aerodynamics>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let Some(a) = aero else {
        return errors;
    };

    check_positive(&mut errors, "setup.aero.front_ride_height_mm", a.front_ride_height_mm);
    check_positive(&mut errors, "setup.aero.rear_ride_height_mm", a.rear_ride_height_mm);
    check_percentage(&mut errors, "setup.aero.brake_duct_front_pct", a.brake_duct_front_pct);
    check_percentage(&mut errors, "setup.aero.brake_duct_rear_pct", a.brake_duct_rear_pct);
    check_percentage(&mut errors, "setup.aero.radiator_opening_pct", a.radiator_opening_pct);
    check_non_negative(&mut errors, "setup.aero.front_downforce_n", a.front_downforce_n);
    check_non_negative(&mut errors, "setup.aero.rear_downforce_n", a.rear_downforce_n);

    errors
}

pub fn validate_suspension(suspension: Option<&Suspension>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let Some(s) = suspension else {
        return errors;
    };

    for corner in Corner::ALL {
        if let Some(record) = s.corner(corner) {
            let prefix = format!("setup.suspension.{}", corner);
            validate_corner(&mut errors, &prefix, record);
        }
    }

    check_positive(&mut errors, "setup.suspension.heave_spring_n_mm", s.heave_spring_n_mm);

    errors
}

fn validate_corner(errors: &mut Vec<ValidationError>, prefix: &str, c: &CornerSuspension) {
    let path = |field: &str| format!("{}.{}", prefix, field);

    let (min, max) = CAMBER_RANGE_DEG;
    check_range(
        errors,
        &path("camber_deg"),
        c.camber_deg,
        min,
        max,
        ValidationSeverity::Warning,
    );
    check_positive(errors, &path("spring_rate_n_mm"), c.spring_rate_n_mm);
    check_positive(errors, &path("ride_height_mm"), c.ride_height_mm);
    check_non_negative(errors, &path("bumpstop_gap_mm"), c.bumpstop_gap_mm);
    check_positive(errors, &path("bumpstop_rate_n_mm"), c.bumpstop_rate_n_mm);
    check_non_negative(errors, &path("damper_bump_slow_n_s_m"), c.damper_bump_slow_n_s_m);
    check_non_negative(errors, &path("damper_bump_fast_n_s_m"), c.damper_bump_fast_n_s_m);
    check_non_negative(errors, &path("damper_rebound_slow_n_s_m"), c.damper_rebound_slow_n_s_m);
    check_non_negative(errors, &path("damper_rebound_fast_n_s_m"), c.damper_rebound_fast_n_s_m);
}

pub fn validate_tires(tires: Option<&Tires>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let Some(t) = tires else {
        return errors;
    };

    let (min, max) = TIRE_PRESSURE_RANGE_KPA;
    for (field, value) in [
        ("setup.tires.pressure_fl_kpa", t.pressure_fl_kpa),
        ("setup.tires.pressure_fr_kpa", t.pressure_fr_kpa),
        ("setup.tires.pressure_rl_kpa", t.pressure_rl_kpa),
        ("setup.tires.pressure_rr_kpa", t.pressure_rr_kpa),
    ] {
        check_range(&mut errors, field, value, min, max, ValidationSeverity::Warning);
    }

    errors
}

pub fn validate_drivetrain(drivetrain: Option<&Drivetrain>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let Some(d) = drivetrain else {
        return errors;
    };

    check_non_negative(&mut errors, "setup.drivetrain.diff_preload_nm", d.diff_preload_nm);
    check_percentage(&mut errors, "setup.drivetrain.diff_power_ramp_pct", d.diff_power_ramp_pct);
    check_percentage(&mut errors, "setup.drivetrain.diff_coast_ramp_pct", d.diff_coast_ramp_pct);
    check_positive(&mut errors, "setup.drivetrain.final_drive_ratio", d.final_drive_ratio);
    check_positive_count(
        &mut errors,
        "setup.drivetrain.lsd_clutch_plates",
        d.lsd_clutch_plates,
        "LSD clutch plates must be positive",
    );

    errors
}

pub fn validate_gearing(gearing: Option<&Gearing>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let Some(g) = gearing else {
        return errors;
    };

    if let Some(ratios) = &g.gear_ratios {
        if ratios.is_empty() {
            errors.push(ValidationError::new(
                ValidationSeverity::Warning,
                ValidationCode::InvalidFormat,
                "setup.gearing.gear_ratios",
                "Gear ratios list is empty",
            ));
        }

        for (index, ratio) in ratios.iter().enumerate() {
            if !ratio.is_finite() || *ratio <= 0.0 {
                errors.push(
                    ValidationError::new(
                        ValidationSeverity::Error,
                        ValidationCode::OutOfRange,
                        format!("setup.gearing.gear_{}", index),
                        "Gear ratio must be positive",
                    )
                    .expected("> 0")
                    .actual(ratio.to_string()),
                );
            }
        }
    }

    check_positive(&mut errors, "setup.gearing.reverse_ratio", g.reverse_ratio);

    errors
}

pub fn validate_brakes(brakes: Option<&Brakes>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let Some(b) = brakes else {
        return errors;
    };

    check_percentage(&mut errors, "setup.brakes.brake_bias_pct", b.brake_bias_pct);
    check_positive(&mut errors, "setup.brakes.max_force_n", b.max_force_n);

    errors
}

pub fn validate_electronics(electronics: Option<&Electronics>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Some(e) = electronics {
        check_positive(&mut errors, "setup.electronics.pit_limiter_kph", e.pit_limiter_kph);
    }
    errors
}

pub fn validate_fuel(fuel: Option<&Fuel>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let Some(f) = fuel else {
        return errors;
    };

    check_non_negative(&mut errors, "setup.fuel.start_fuel_l", f.start_fuel_l);
    check_positive(&mut errors, "setup.fuel.per_lap_consumption_l", f.per_lap_consumption_l);
    check_positive_count(
        &mut errors,
        "setup.fuel.stint_target_laps",
        f.stint_target_laps,
        "Stint target laps must be positive",
    );

    errors
}

// Helpers. Each one is a no-op for absent values.

pub(crate) fn check_required(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.is_empty() {
        errors.push(ValidationError::new(
            ValidationSeverity::Error,
            ValidationCode::Required,
            field,
            "Required field is missing",
        ));
    }
}

/// Report NaN and infinities; every comparison against them is false
fn check_finite(errors: &mut Vec<ValidationError>, field: &str, value: f64) -> bool {
    if value.is_finite() {
        return true;
    }
    errors.push(
        ValidationError::new(
            ValidationSeverity::Error,
            ValidationCode::OutOfRange,
            field,
            "Value must be a finite number",
        )
        .expected("finite number")
        .actual(value.to_string()),
    );
    false
}

pub(crate) fn check_range(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: Option<f64>,
    min: f64,
    max: f64,
    severity: ValidationSeverity,
) {
    let Some(value) = value else {
        return;
    };
    if !check_finite(errors, field, value) {
        return;
    }
    if value < min || value > max {
        errors.push(
            ValidationError::new(severity, ValidationCode::OutOfRange, field, "Value out of range")
                .expected(format!("{} to {}", min, max))
                .actual(value.to_string()),
        );
    }
}

pub(crate) fn check_percentage(errors: &mut Vec<ValidationError>, field: &str, value: Option<f64>) {
    check_range(errors, field, value, 0.0, 100.0, ValidationSeverity::Error);
}

pub(crate) fn check_positive(errors: &mut Vec<ValidationError>, field: &str, value: Option<f64>) {
    let Some(value) = value else {
        return;
    };
    if check_finite(errors, field, value) && value <= 0.0 {
        errors.push(
            ValidationError::new(
                ValidationSeverity::Error,
                ValidationCode::OutOfRange,
                field,
                "Value must be positive",
            )
            .expected("> 0")
            .actual(value.to_string()),
        );
    }
}

pub(crate) fn check_non_negative(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: Option<f64>,
) {
    let Some(value) = value else {
        return;
    };
    if check_finite(errors, field, value) && value < 0.0 {
        errors.push(
            ValidationError::new(
                ValidationSeverity::Error,
                ValidationCode::OutOfRange,
                field,
                "Value must be non-negative",
            )
            .expected(">= 0")
            .actual(value.to_string()),
        );
    }
}

fn check_positive_count(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: Option<i32>,
    message: &str,
) {
    if let Some(value) = value.filter(|v| *v <= 0) {
        errors.push(
            ValidationError::new(
                ValidationSeverity::Error,
                ValidationCode::OutOfRange,
                field,
                message,
            )
            .expected("> 0")
            .actual(value.to_string()),
        );
    }
}

pub(crate) fn check_iso8601(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if !timestamps::is_valid_iso8601(value) {
        errors.push(
            ValidationError::new(
                ValidationSeverity::Warning,
                ValidationCode::InvalidFormat,
                field,
                "Invalid ISO8601 timestamp format",
            )
            .expected(ISO8601_FORMAT_HINT)
            .actual(value),
        );
    }
}
