//! Core types and data structures for the ORSF canonical setup
//!
//! This module defines the canonical, strongly-typed setup document. Every
//! leaf is an `Option`: absent and "present but zero" stay distinguishable
//! through flattening, mapping and validation. Absent values are encoded as
//! explicit `null` in JSON.

use crate::error::{Error, Result};
use crate::timestamps;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// The only schema tag this crate reads and writes
pub const SCHEMA_V1: &str = "orsf://v1";

/// Complete ORSF setup document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Orsf {
    /// Schema tag, must be `orsf://v1`
    pub schema: String,

    /// Identification and bookkeeping
    pub metadata: Metadata,

    /// Vehicle identification
    pub car: Car,

    /// Environment and session
    pub context: Option<Context>,

    /// The tunable configuration
    pub setup: Setup,

    /// Simulator-specific passthrough data
    pub compat: Option<BTreeMap<String, Value>>,
}

impl Default for Orsf {
    fn default() -> Self {
        Self {
            schema: SCHEMA_V1.to_string(),
            metadata: Metadata::default(),
            car: Car::default(),
            context: None,
            setup: Setup::default(),
            compat: None,
        }
    }
}

impl Orsf {
    /// Create an empty setup for a car, stamped with the current time
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            metadata: Metadata {
                id: id.into(),
                name: name.into(),
                created_at: timestamps::now_iso8601(),
                ..Metadata::default()
            },
            car: Car {
                make: make.into(),
                model: model.into(),
                ..Car::default()
            },
            ..Self::default()
        }
    }

    /// Parse a document from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| Error::json("Failed to parse JSON", e))?;
        Self::from_json_value(value)
    }

    /// Decode a document from a JSON value, rejecting unknown schema tags
    pub fn from_json_value(value: Value) -> Result<Self> {
        let orsf: Orsf = serde_json::from_value(value)
            .map_err(|e| Error::json("Failed to deserialize ORSF", e))?;

        if orsf.schema != SCHEMA_V1 {
            return Err(Error::Schema {
                expected: SCHEMA_V1.to_string(),
                found: orsf.schema,
            });
        }

        Ok(orsf)
    }

    /// Encode as a JSON value
    pub fn to_json_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| Error::json("Failed to convert ORSF to JSON", e))
    }

    /// Encode as compact JSON
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::json("Failed to serialize ORSF", e))
    }

    /// Encode as indented JSON
    pub fn to_json_string_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::json("Failed to serialize ORSF", e))
    }
}

/// Setup identification and tracking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Unique identifier (UUID recommended)
    pub id: String,
    /// Human-readable setup name
    pub name: String,
    pub notes: Option<String>,
    /// ISO-8601 creation timestamp
    pub created_at: String,
    /// ISO-8601 modification timestamp
    pub updated_at: Option<String>,
    pub created_by: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Where the setup came from (e.g. a coaching service)
    pub source: Option<String>,
    /// Simulator the setup was originally authored in
    pub origin_sim: Option<String>,
}

/// Vehicle identification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Car {
    /// Manufacturer (e.g. "Porsche")
    pub make: String,
    /// Model name (e.g. "911 GT3 R")
    pub model: String,
    /// Variant or model year
    pub variant: Option<String>,
    /// Racing class (GT3, LMP2, ...)
    #[serde(rename = "class", alias = "car_class")]
    pub car_class: Option<String>,
    /// Balance of Performance identifier
    pub bop_id: Option<String>,
}

/// Environmental and session information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    pub track: Option<String>,
    pub layout: Option<String>,
    pub ambient_temp_c: Option<f64>,
    pub track_temp_c: Option<f64>,
    /// green/low/medium/high/saturated
    pub rubber: Option<String>,
    /// 0.0 (dry) to 1.0 (fully wet)
    pub wetness: Option<f64>,
    /// practice/qualifying/race
    pub session_type: Option<String>,
    pub fuel_rule: Option<String>,
}

/// All tunable sections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Setup {
    pub aero: Option<Aerodynamics>,
    pub suspension: Option<Suspension>,
    pub tires: Option<Tires>,
    pub drivetrain: Option<Drivetrain>,
    pub gearing: Option<Gearing>,
    pub brakes: Option<Brakes>,
    pub electronics: Option<Electronics>,
    pub fuel: Option<Fuel>,
    pub strategy: Option<Strategy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Aerodynamics {
    pub front_wing: Option<f64>,
    pub rear_wing: Option<f64>,
    pub front_downforce_n: Option<f64>,
    pub rear_downforce_n: Option<f64>,
    pub front_ride_height_mm: Option<f64>,
    pub rear_ride_height_mm: Option<f64>,
    pub rake_mm: Option<f64>,
    pub brake_duct_front_pct: Option<f64>,
    pub brake_duct_rear_pct: Option<f64>,
    pub radiator_opening_pct: Option<f64>,
}

/// Suspension settings for one wheel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerSuspension {
    pub camber_deg: Option<f64>,
    pub toe_deg: Option<f64>,
    /// Front corners only
    pub caster_deg: Option<f64>,
    pub spring_rate_n_mm: Option<f64>,
    pub ride_height_mm: Option<f64>,
    pub bumpstop_gap_mm: Option<f64>,
    pub bumpstop_rate_n_mm: Option<f64>,
    pub packer_mm: Option<f64>,
    pub damper_bump_slow_n_s_m: Option<f64>,
    pub damper_bump_fast_n_s_m: Option<f64>,
    pub damper_rebound_slow_n_s_m: Option<f64>,
    pub damper_rebound_fast_n_s_m: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suspension {
    pub front_left: Option<CornerSuspension>,
    pub front_right: Option<CornerSuspension>,
    pub rear_left: Option<CornerSuspension>,
    pub rear_right: Option<CornerSuspension>,
    pub front_arb: Option<f64>,
    pub rear_arb: Option<f64>,
    pub heave_spring_n_mm: Option<f64>,
    pub heave_packer_mm: Option<f64>,
}

impl Suspension {
    /// Settings for one corner, if present
    pub fn corner(&self, corner: Corner) -> Option<&CornerSuspension> {
        match corner {
            Corner::FrontLeft => self.front_left.as_ref(),
            Corner::FrontRight => self.front_right.as_ref(),
            Corner::RearLeft => self.rear_left.as_ref(),
            Corner::RearRight => self.rear_right.as_ref(),
        }
    }

    /// Settings for one corner, created empty if absent
    pub fn corner_or_default(&mut self, corner: Corner) -> &mut CornerSuspension {
        let slot = match corner {
            Corner::FrontLeft => &mut self.front_left,
            Corner::FrontRight => &mut self.front_right,
            Corner::RearLeft => &mut self.rear_left,
            Corner::RearRight => &mut self.rear_right,
        };
        slot.get_or_insert_with(CornerSuspension::default)
    }
}

/// A wheel position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::FrontLeft,
        Corner::FrontRight,
        Corner::RearLeft,
        Corner::RearRight,
    ];

    /// Path segment for this corner
    pub fn as_str(self) -> &'static str {
        match self {
            Corner::FrontLeft => "front_left",
            Corner::FrontRight => "front_right",
            Corner::RearLeft => "rear_left",
            Corner::RearRight => "rear_right",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Corner::ALL.into_iter().find(|c| c.as_str() == segment)
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tires {
    pub compound: Option<String>,
    pub pressure_fl_kpa: Option<f64>,
    pub pressure_fr_kpa: Option<f64>,
    pub pressure_rl_kpa: Option<f64>,
    pub pressure_rr_kpa: Option<f64>,
    pub stagger_mm: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Drivetrain {
    pub diff_preload_nm: Option<f64>,
    pub diff_power_ramp_pct: Option<f64>,
    pub diff_coast_ramp_pct: Option<f64>,
    pub final_drive_ratio: Option<f64>,
    pub lsd_clutch_plates: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gearing {
    /// Forward gear ratios, addressed as `gear_<index>` in paths
    pub gear_ratios: Option<Vec<f64>>,
    pub reverse_ratio: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brakes {
    pub pad_compound: Option<String>,
    pub disc_type: Option<String>,
    /// Front bias, 0-100%
    pub brake_bias_pct: Option<f64>,
    pub max_force_n: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Electronics {
    pub tc_level: Option<i32>,
    pub tc2_level: Option<i32>,
    pub abs_level: Option<i32>,
    pub engine_map: Option<i32>,
    pub engine_brake_level: Option<i32>,
    pub pit_limiter_kph: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fuel {
    pub start_fuel_l: Option<f64>,
    pub per_lap_consumption_l: Option<f64>,
    pub stint_target_laps: Option<i32>,
    pub mixture_setting: Option<i32>,
}

/// Race strategy notes; carries no numeric paths
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strategy {
    pub tire_change_policy: Option<String>,
    pub notes: Option<String>,
    pub custom: BTreeMap<String, Value>,
}
