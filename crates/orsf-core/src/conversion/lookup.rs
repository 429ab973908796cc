//! Piecewise-linear lookup tables
//!
//! A [`LookupTable`] maps a scalar through a set of control points. Points
//! are sorted by input once at construction. Values outside the table are
//! clamped to the first/last output; values between two points are linearly
//! interpolated.
//!
//! Reverse lookup swaps inputs and outputs and runs the same algorithm. It
//! only yields a meaningful inverse when outputs are monotonic in input
//! order. [`LookupTable::new`] accepts any table; use
//! [`LookupTable::monotonic`] to reject tables that cannot be inverted.
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

use super::ConversionError;
use serde::{Deserialize, Serialize};

/// Bracketing pairs closer than this are treated as a single point
const SEGMENT_EPSILON: f64 = 1e-10;

/// A single control point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LutEntry {
    pub input: f64,
    pub output: f64,
}

impl LutEntry {
    pub fn new(input: f64, output: f64) -> Self {
        Self { input, output }
    }
}

impl From<(f64, f64)> for LutEntry {
    fn from((input, output): (f64, f64)) -> Self {
        Self { input, output }
    }
}

/// Sorted set of control points with linear interpolation between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<LutEntry>", into = "Vec<LutEntry>")]
pub struct LookupTable {
    entries: Vec<LutEntry>,
}

impl LookupTable {
    /// Build a table from control points in any order
    ///
    /// Duplicate inputs are kept. Monotonicity is not checked.
    pub fn new<I, E>(points: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<LutEntry>,
    {
        let mut entries: Vec<LutEntry> = points.into_iter().map(Into::into).collect();
        sort_by_input(&mut entries);
        Self { entries }
    }

    /// Build a table and reject it unless its outputs are monotonic
    pub fn monotonic<I, E>(points: I) -> Result<Self, ConversionError>
    where
        I: IntoIterator<Item = E>,
        E: Into<LutEntry>,
    {
        let table = Self::new(points);
        match table.first_direction_change() {
            Some(input) => Err(ConversionError::NonMonotonicTable { input }),
            None => Ok(table),
        }
    }

    /// Control points, sorted by input
    pub fn entries(&self) -> &[LutEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when outputs never change direction (non-decreasing or non-increasing)
    pub fn is_monotonic(&self) -> bool {
        self.first_direction_change().is_none()
    }

    /// Map an input through the table
    pub fn interpolate(&self, value: f64) -> Result<f64, ConversionError> {
        interpolate_sorted(&self.entries, value)
    }

    /// Map an output back to an input
    ///
    /// Builds the swapped `(output, input)` table on each call, sorts it by
    /// the former outputs and interpolates through it.
    pub fn reverse_lookup(&self, value: f64) -> Result<f64, ConversionError> {
        let mut reversed: Vec<LutEntry> = self
            .entries
            .iter()
            .map(|e| LutEntry::new(e.output, e.input))
            .collect();
        sort_by_input(&mut reversed);
        interpolate_sorted(&reversed, value)
    }

    /// Input at which the output trend first reverses, if any
    fn first_direction_change(&self) -> Option<f64> {
        let mut direction = 0.0_f64;
        for pair in self.entries.windows(2) {
            let delta = pair[1].output - pair[0].output;
            if delta == 0.0 {
                continue;
            }
            if direction != 0.0 && delta.signum() != direction {
                return Some(pair[1].input);
            }
            direction = delta.signum();
        }
        None
    }
}

impl From<Vec<LutEntry>> for LookupTable {
    fn from(entries: Vec<LutEntry>) -> Self {
        Self::new(entries)
    }
}

impl From<LookupTable> for Vec<LutEntry> {
    fn from(table: LookupTable) -> Self {
        table.entries
    }
}

fn sort_by_input(entries: &mut [LutEntry]) {
    entries.sort_by(|a, b| a.input.total_cmp(&b.input));
}

fn interpolate_sorted(entries: &[LutEntry], value: f64) -> Result<f64, ConversionError> {
    let (first, last) = match (entries.first(), entries.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ConversionError::EmptyLookupTable),
    };

    if value <= first.input {
        return Ok(first.output);
    }
    if value >= last.input {
        return Ok(last.output);
    }

    for pair in entries.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if value >= lo.input && value <= hi.input {
            return Ok(lerp(value, lo, hi));
        }
    }

    Ok(last.output)
}

fn lerp(x: f64, lo: LutEntry, hi: LutEntry) -> f64 {
    if (hi.input - lo.input).abs() < SEGMENT_EPSILON {
        return lo.output;
    }
    lo.output + (hi.output - lo.output) * (x - lo.input) / (hi.input - lo.input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brake_duct_table() -> LookupTable {
        LookupTable::new([(0.0, 0.0), (50.0, 25.0), (100.0, 75.0)])
    }

    #[test]
    fn test_exact_at_control_points() {
        let lut = brake_duct_table();
        assert_eq!(lut.interpolate(0.0).unwrap(), 0.0);
        assert_eq!(lut.interpolate(50.0).unwrap(), 25.0);
        assert_eq!(lut.interpolate(100.0).unwrap(), 75.0);
    }

    #[test]
    fn test_interpolates_between_points() {
        let lut = brake_duct_table();
        assert_eq!(lut.interpolate(25.0).unwrap(), 12.5);
        assert_eq!(lut.interpolate(75.0).unwrap(), 50.0);
    }

    #[test]
    fn test_clamps_outside_range() {
        let lut = brake_duct_table();
        assert_eq!(lut.interpolate(-10.0).unwrap(), 0.0);
        assert_eq!(lut.interpolate(150.0).unwrap(), 75.0);
    }

    #[test]
    fn test_reverse_lookup() {
        let lut = brake_duct_table();
        assert_eq!(lut.reverse_lookup(25.0).unwrap(), 50.0);
        assert_eq!(lut.reverse_lookup(50.0).unwrap(), 75.0);
        assert_eq!(lut.reverse_lookup(100.0).unwrap(), 100.0);
    }

    #[test]
    fn test_unsorted_points_are_canonicalized() {
        let lut = LookupTable::new([(100.0, 75.0), (0.0, 0.0), (50.0, 25.0)]);
        let inputs: Vec<f64> = lut.entries().iter().map(|e| e.input).collect();
        assert_eq!(inputs, vec![0.0, 50.0, 100.0]);
        assert_eq!(lut.interpolate(25.0).unwrap(), 12.5);
    }

    #[test]
    fn test_empty_table_fails() {
        let lut = LookupTable::new(Vec::<LutEntry>::new());
        assert_eq!(lut.interpolate(1.0), Err(ConversionError::EmptyLookupTable));
        assert_eq!(lut.reverse_lookup(1.0), Err(ConversionError::EmptyLookupTable));
    }

    #[test]
    fn test_duplicate_inputs_return_lower_output() {
        let lut = LookupTable::new([(0.0, 0.0), (10.0, 5.0), (10.0, 7.0), (20.0, 9.0)]);
        assert_eq!(lut.interpolate(10.0).unwrap(), 5.0);
    }

    #[test]
    fn test_decreasing_table_is_monotonic() {
        let lut = LookupTable::monotonic([(0.0, 10.0), (10.0, 5.0), (20.0, 0.0)]).unwrap();
        assert!(lut.is_monotonic());
        assert_eq!(lut.reverse_lookup(7.5).unwrap(), 5.0);

        let plateau = LookupTable::new([(0.0, 10.0), (5.0, 5.0), (10.0, 5.0), (20.0, 0.0)]);
        assert!(plateau.is_monotonic());
    }

    #[test]
    fn test_non_monotonic_table_rejected() {
        let err = LookupTable::monotonic([(0.0, 0.0), (1.0, 10.0), (2.0, 5.0)]).unwrap_err();
        assert_eq!(err, ConversionError::NonMonotonicTable { input: 2.0 });

        let lenient = LookupTable::new([(0.0, 0.0), (1.0, 10.0), (2.0, 5.0)]);
        assert!(!lenient.is_monotonic());
        assert!(lenient.reverse_lookup(7.0).is_ok());
    }

    #[test]
    fn test_serde_sorts_on_decode() {
        let lut: LookupTable = serde_json::from_str(
            r#"[{"input": 10.0, "output": 1.0}, {"input": 0.0, "output": 0.0}]"#,
        )
        .unwrap();
        assert_eq!(lut.entries()[0].input, 0.0);
        assert_eq!(lut.interpolate(5.0).unwrap(), 0.5);
    }
}
