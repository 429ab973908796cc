//! Path grammar and per-section accessor tables
//!
//! Paths have the shape `setup.<section>.<field>`,
//! `setup.suspension.<corner>.<field>` or `setup.gearing.gear_<index>`.
//! Each section owns a static table of named getters and setters; adding a
//! field to a section only needs a new table row.
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

use super::FlatSetup;
use crate::types::{
    Aerodynamics, Brakes, Corner, CornerSuspension, Drivetrain, Electronics, Fuel, Gearing,
    Setup, Suspension, Tires,
};
use std::fmt;

/// First segment of every path
pub const ROOT_SEGMENT: &str = "setup";

/// Prefix of the synthetic per-gear field names
pub const GEAR_PREFIX: &str = "gear_";

/// Gear indices at or above this are unknown leaves
pub const MAX_GEARS: usize = 16;

/// Index of a `gear_<index>` field. Only plain decimal digits without a
/// leading zero are accepted, so each gear has exactly one path.
fn gear_index(field: &str) -> Option<usize> {
    let digits = field.strip_prefix(GEAR_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse::<usize>().ok().filter(|index| *index < MAX_GEARS)
}

/// Named getter and setter for one numeric field of a record
pub struct FieldAccessor<T> {
    pub name: &'static str,
    pub get: fn(&T) -> Option<f64>,
    pub set: fn(&mut T, f64),
}

macro_rules! f64_field {
    ($ty:ty, $field:ident) => {
        FieldAccessor::<$ty> {
            name: stringify!($field),
            get: |record: &$ty| record.$field,
            set: |record: &mut $ty, value: f64| record.$field = Some(value),
        }
    };
}

// Integer leaves travel as f64 and are rounded on the way back in
macro_rules! int_field {
    ($ty:ty, $field:ident) => {
        FieldAccessor::<$ty> {
            name: stringify!($field),
            get: |record: &$ty| record.$field.map(f64::from),
            set: |record: &mut $ty, value: f64| record.$field = Some(value.round() as i32),
        }
    };
}

pub static AERO_FIELDS: &[FieldAccessor<Aerodynamics>] = &[
    f64_field!(Aerodynamics, front_wing),
    f64_field!(Aerodynamics, rear_wing),
    f64_field!(Aerodynamics, front_downforce_n),
    f64_field!(Aerodynamics, rear_downforce_n),
    f64_field!(Aerodynamics, front_ride_height_mm),
    f64_field!(Aerodynamics, rear_ride_height_mm),
    f64_field!(Aerodynamics, rake_mm),
    f64_field!(Aerodynamics, brake_duct_front_pct),
    f64_field!(Aerodynamics, brake_duct_rear_pct),
    f64_field!(Aerodynamics, radiator_opening_pct),
];

pub static SUSPENSION_FIELDS: &[FieldAccessor<Suspension>] = &[
    f64_field!(Suspension, front_arb),
    f64_field!(Suspension, rear_arb),
    f64_field!(Suspension, heave_spring_n_mm),
    f64_field!(Suspension, heave_packer_mm),
];

pub static CORNER_FIELDS: &[FieldAccessor<CornerSuspension>] = &[
    f64_field!(CornerSuspension, camber_deg),
    f64_field!(CornerSuspension, toe_deg),
    f64_field!(CornerSuspension, caster_deg),
    f64_field!(CornerSuspension, spring_rate_n_mm),
    f64_field!(CornerSuspension, ride_height_mm),
    f64_field!(CornerSuspension, bumpstop_gap_mm),
    f64_field!(CornerSuspension, bumpstop_rate_n_mm),
    f64_field!(CornerSuspension, packer_mm),
    f64_field!(CornerSuspension, damper_bump_slow_n_s_m),
    f64_field!(CornerSuspension, damper_bump_fast_n_s_m),
    f64_field!(CornerSuspension, damper_rebound_slow_n_s_m),
    f64_field!(CornerSuspension, damper_rebound_fast_n_s_m),
];

pub static TIRE_FIELDS: &[FieldAccessor<Tires>] = &[
    f64_field!(Tires, pressure_fl_kpa),
    f64_field!(Tires, pressure_fr_kpa),
    f64_field!(Tires, pressure_rl_kpa),
    f64_field!(Tires, pressure_rr_kpa),
    f64_field!(Tires, stagger_mm),
];

pub static DRIVETRAIN_FIELDS: &[FieldAccessor<Drivetrain>] = &[
    f64_field!(Drivetrain, diff_preload_nm),
    f64_field!(Drivetrain, diff_power_ramp_pct),
    f64_field!(Drivetrain, diff_coast_ramp_pct),
    f64_field!(Drivetrain, final_drive_ratio),
    int_field!(Drivetrain, lsd_clutch_plates),
];

/// Fixed gearing fields; forward gears use `gear_<index>`
pub static GEARING_FIELDS: &[FieldAccessor<Gearing>] = &[f64_field!(Gearing, reverse_ratio)];

pub static BRAKE_FIELDS: &[FieldAccessor<Brakes>] = &[
    f64_field!(Brakes, brake_bias_pct),
    f64_field!(Brakes, max_force_n),
];

pub static ELECTRONICS_FIELDS: &[FieldAccessor<Electronics>] = &[
    int_field!(Electronics, tc_level),
    int_field!(Electronics, tc2_level),
    int_field!(Electronics, abs_level),
    int_field!(Electronics, engine_map),
    int_field!(Electronics, engine_brake_level),
    f64_field!(Electronics, pit_limiter_kph),
];

pub static FUEL_FIELDS: &[FieldAccessor<Fuel>] = &[
    f64_field!(Fuel, start_fuel_l),
    f64_field!(Fuel, per_lap_consumption_l),
    int_field!(Fuel, stint_target_laps),
    int_field!(Fuel, mixture_setting),
];

fn find<T>(table: &'static [FieldAccessor<T>], name: &str) -> Option<&'static FieldAccessor<T>> {
    table.iter().find(|accessor| accessor.name == name)
}

fn read<T>(record: Option<&T>, table: &'static [FieldAccessor<T>], name: &str) -> Option<f64> {
    let accessor = find(table, name)?;
    (accessor.get)(record?)
}

/// Write through the table, creating the record only for known names
fn write<T: Default>(
    slot: &mut Option<T>,
    table: &'static [FieldAccessor<T>],
    name: &str,
    value: f64,
) -> bool {
    match find(table, name) {
        Some(accessor) => {
            (accessor.set)(slot.get_or_insert_with(T::default), value);
            true
        }
        None => false,
    }
}

/// A tunable section of the setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Aero,
    Suspension,
    Tires,
    Drivetrain,
    Gearing,
    Brakes,
    Electronics,
    Fuel,
    Strategy,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::Aero,
        Section::Suspension,
        Section::Tires,
        Section::Drivetrain,
        Section::Gearing,
        Section::Brakes,
        Section::Electronics,
        Section::Fuel,
        Section::Strategy,
    ];

    /// Path segment for this section
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Aero => "aero",
            Section::Suspension => "suspension",
            Section::Tires => "tires",
            Section::Drivetrain => "drivetrain",
            Section::Gearing => "gearing",
            Section::Brakes => "brakes",
            Section::Electronics => "electronics",
            Section::Fuel => "fuel",
            Section::Strategy => "strategy",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Section::ALL.into_iter().find(|s| s.as_str() == segment)
    }

    /// Fixed numeric field names addressable directly under this section
    pub fn field_names(self) -> Vec<&'static str> {
        fn names<T>(table: &'static [FieldAccessor<T>]) -> Vec<&'static str> {
            table.iter().map(|accessor| accessor.name).collect()
        }

        match self {
            Section::Aero => names(AERO_FIELDS),
            Section::Suspension => names(SUSPENSION_FIELDS),
            Section::Tires => names(TIRE_FIELDS),
            Section::Drivetrain => names(DRIVETRAIN_FIELDS),
            Section::Gearing => names(GEARING_FIELDS),
            Section::Brakes => names(BRAKE_FIELDS),
            Section::Electronics => names(ELECTRONICS_FIELDS),
            Section::Fuel => names(FUEL_FIELDS),
            Section::Strategy => Vec::new(),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structurally parsed path
///
/// Parsing checks the root, section, corner and gear index. Leaf names are
/// resolved against the accessor tables when the path is read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupPath<'a> {
    /// `setup.<section>.<field>`
    Field { section: Section, field: &'a str },
    /// `setup.suspension.<corner>.<field>`
    CornerField { corner: Corner, field: &'a str },
    /// `setup.gearing.gear_<index>`
    Gear(usize),
}

impl<'a> SetupPath<'a> {
    pub fn parse(path: &'a str) -> Option<Self> {
        let parts: Vec<&'a str> = path.split('.').collect();

        match parts[..] {
            [ROOT_SEGMENT, section, field] => {
                let section = Section::from_segment(section)?;
                if section == Section::Gearing {
                    if let Some(index) = gear_index(field) {
                        return Some(SetupPath::Gear(index));
                    }
                }
                Some(SetupPath::Field { section, field })
            }
            [ROOT_SEGMENT, "suspension", corner, field] => {
                let corner = Corner::from_segment(corner)?;
                Some(SetupPath::CornerField { corner, field })
            }
            _ => None,
        }
    }

    /// Whether the path names a numeric leaf that exists
    pub fn is_known(&self) -> bool {
        match *self {
            SetupPath::Field { section, field } => {
                section.field_names().iter().any(|name| *name == field)
            }
            SetupPath::CornerField { field, .. } => find(CORNER_FIELDS, field).is_some(),
            SetupPath::Gear(index) => index < MAX_GEARS,
        }
    }

    /// Read the leaf from a setup
    pub(crate) fn read(&self, setup: &Setup) -> Option<f64> {
        match *self {
            SetupPath::Field { section, field } => match section {
                Section::Aero => read(setup.aero.as_ref(), AERO_FIELDS, field),
                Section::Suspension => read(setup.suspension.as_ref(), SUSPENSION_FIELDS, field),
                Section::Tires => read(setup.tires.as_ref(), TIRE_FIELDS, field),
                Section::Drivetrain => read(setup.drivetrain.as_ref(), DRIVETRAIN_FIELDS, field),
                Section::Gearing => read(setup.gearing.as_ref(), GEARING_FIELDS, field),
                Section::Brakes => read(setup.brakes.as_ref(), BRAKE_FIELDS, field),
                Section::Electronics => {
                    read(setup.electronics.as_ref(), ELECTRONICS_FIELDS, field)
                }
                Section::Fuel => read(setup.fuel.as_ref(), FUEL_FIELDS, field),
                Section::Strategy => None,
            },
            SetupPath::CornerField { corner, field } => {
                let record = setup.suspension.as_ref()?.corner(corner);
                read(record, CORNER_FIELDS, field)
            }
            SetupPath::Gear(index) => setup
                .gearing
                .as_ref()?
                .gear_ratios
                .as_ref()?
                .get(index)
                .copied(),
        }
    }

    /// Write the leaf, creating missing sections and corners on the way.
    /// Returns `false` without touching the setup when the leaf is unknown.
    pub(crate) fn write(&self, setup: &mut Setup, value: f64) -> bool {
        match *self {
            SetupPath::Field { section, field } => match section {
                Section::Aero => write(&mut setup.aero, AERO_FIELDS, field, value),
                Section::Suspension => {
                    write(&mut setup.suspension, SUSPENSION_FIELDS, field, value)
                }
                Section::Tires => write(&mut setup.tires, TIRE_FIELDS, field, value),
                Section::Drivetrain => {
                    write(&mut setup.drivetrain, DRIVETRAIN_FIELDS, field, value)
                }
                Section::Gearing => write(&mut setup.gearing, GEARING_FIELDS, field, value),
                Section::Brakes => write(&mut setup.brakes, BRAKE_FIELDS, field, value),
                Section::Electronics => {
                    write(&mut setup.electronics, ELECTRONICS_FIELDS, field, value)
                }
                Section::Fuel => write(&mut setup.fuel, FUEL_FIELDS, field, value),
                Section::Strategy => false,
            },
            SetupPath::CornerField { corner, field } => match find(CORNER_FIELDS, field) {
                Some(accessor) => {
                    let suspension = setup.suspension.get_or_insert_with(Suspension::default);
                    (accessor.set)(suspension.corner_or_default(corner), value);
                    true
                }
                None => false,
            },
            SetupPath::Gear(index) => {
                let Some(len) = index.checked_add(1).filter(|len| *len <= MAX_GEARS) else {
                    return false;
                };
                let gearing = setup.gearing.get_or_insert_with(Gearing::default);
                let ratios = gearing.gear_ratios.get_or_insert_with(Vec::new);
                if ratios.len() < len {
                    ratios.resize(len, 0.0);
                }
                ratios[index] = value;
                true
            }
        }
    }
}

fn emit<T>(flat: &mut FlatSetup, prefix: &str, record: Option<&T>, table: &[FieldAccessor<T>]) {
    let Some(record) = record else {
        return;
    };
    for accessor in table {
        if let Some(value) = (accessor.get)(record) {
            flat.insert(format!("{}.{}", prefix, accessor.name), value);
        }
    }
}

/// Insert every present numeric leaf of `setup` into `flat`
pub(crate) fn flatten_into(setup: &Setup, flat: &mut FlatSetup) {
    emit(flat, "setup.aero", setup.aero.as_ref(), AERO_FIELDS);

    if let Some(suspension) = &setup.suspension {
        for corner in Corner::ALL {
            let prefix = format!("setup.suspension.{}", corner);
            emit(flat, &prefix, suspension.corner(corner), CORNER_FIELDS);
        }
        emit(flat, "setup.suspension", Some(suspension), SUSPENSION_FIELDS);
    }

    emit(flat, "setup.tires", setup.tires.as_ref(), TIRE_FIELDS);
    emit(flat, "setup.drivetrain", setup.drivetrain.as_ref(), DRIVETRAIN_FIELDS);

    if let Some(gearing) = &setup.gearing {
        if let Some(ratios) = &gearing.gear_ratios {
            for (index, ratio) in ratios.iter().enumerate() {
                flat.insert(format!("setup.gearing.{}{}", GEAR_PREFIX, index), *ratio);
            }
        }
        emit(flat, "setup.gearing", Some(gearing), GEARING_FIELDS);
    }

    emit(flat, "setup.brakes", setup.brakes.as_ref(), BRAKE_FIELDS);
    emit(flat, "setup.electronics", setup.electronics.as_ref(), ELECTRONICS_FIELDS);
    emit(flat, "setup.fuel", setup.fuel.as_ref(), FUEL_FIELDS);
}

/// Every fixed numeric path, section by section. Gear paths are open-ended
/// and not listed.
pub fn known_paths() -> Vec<String> {
    let mut paths = Vec::new();
    for section in Section::ALL {
        if section == Section::Suspension {
            for corner in Corner::ALL {
                paths.extend(
                    CORNER_FIELDS
                        .iter()
                        .map(|accessor| format!("setup.suspension.{}.{}", corner, accessor.name)),
                );
            }
        }
        paths.extend(
            section
                .field_names()
                .into_iter()
                .map(|name| format!("{}.{}.{}", ROOT_SEGMENT, section, name)),
        );
    }
    paths
}
