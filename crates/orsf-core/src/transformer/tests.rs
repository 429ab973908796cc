//! Tests for the scalar transform pipeline
//!
//! Copyright (c) 2025 ORSF Team
//! Licensed under the Apache-2.0 license

use super::built_in;
use super::types::{Transform, TransformError};
use crate::conversion::{ConversionError, LookupTable, Unit};
use approx::assert_relative_eq;

fn halve_if_even(x: f64) -> Result<f64, TransformError> {
    if x % 2.0 == 0.0 {
        Ok(x / 2.0)
    } else {
        Err(TransformError::Custom {
            name: "halve_if_even".to_string(),
            message: format!("{} is odd", x),
        })
    }
}

#[test]
fn test_primitives() {
    assert_eq!(built_in::identity().apply(3.5).unwrap(), 3.5);
    assert_eq!(built_in::scale(2.0).apply(3.5).unwrap(), 7.0);
    assert_eq!(built_in::offset(-1.5).apply(3.5).unwrap(), 2.0);
    assert_eq!(built_in::linear(2.0, 1.0).apply(3.0).unwrap(), 7.0);
    assert_eq!(built_in::invert().apply(4.0).unwrap(), 0.25);
    assert_eq!(built_in::negate().apply(4.0).unwrap(), -4.0);
    assert_eq!(built_in::clamp(0.0, 10.0).apply(12.0).unwrap(), 10.0);
    assert_eq!(built_in::percent_to_ratio().apply(55.0).unwrap(), 0.55);
    assert_eq!(built_in::ratio_to_percent().apply(0.5).unwrap(), 50.0);
}

#[test]
fn test_clamp_does_not_snap() {
    assert_eq!(built_in::clamp(0.0, 100.0).apply(52.3).unwrap(), 52.3);
}

#[test]
fn test_invert_zero_fails() {
    let err = built_in::invert().apply(0.0).unwrap_err();
    assert_eq!(err, TransformError::DivisionByZero { value: 0.0 });
    assert!(built_in::invert().apply(1e-12).is_err());
}

#[test]
fn test_composition_order_matters() {
    let scale_then_offset = built_in::compose(vec![built_in::scale(2.0), built_in::offset(10.0)]);
    let offset_then_scale = built_in::compose(vec![built_in::offset(10.0), built_in::scale(2.0)]);

    assert_eq!(scale_then_offset.apply(5.0).unwrap(), 20.0);
    assert_eq!(offset_then_scale.apply(5.0).unwrap(), 30.0);
}

#[test]
fn test_empty_composition_is_identity() {
    assert_eq!(built_in::compose(vec![]).apply(42.0).unwrap(), 42.0);
}

#[test]
fn test_composition_is_associative_in_effect() {
    let (a, b, c) = (built_in::scale(3.0), built_in::offset(-2.0), built_in::negate());
    let left = built_in::compose(vec![built_in::compose(vec![a.clone(), b.clone()]), c.clone()]);
    let right = built_in::compose(vec![a, built_in::compose(vec![b, c])]);

    for x in [-3.0, 0.0, 1.5, 100.0] {
        assert_eq!(left.apply(x).unwrap(), right.apply(x).unwrap());
    }
}

#[test]
fn test_composition_propagates_failure() {
    let pipeline = built_in::compose(vec![built_in::offset(-5.0), built_in::invert()]);
    assert!(matches!(
        pipeline.apply(5.0),
        Err(TransformError::DivisionByZero { .. })
    ));
}

#[test]
fn test_unit_convert_transform() {
    let to_psi = built_in::pressure_kpa_to_psi();
    let to_kpa = built_in::pressure_psi_to_kpa();
    let psi = to_psi.apply(170.0).unwrap();
    assert_relative_eq!(psi, 24.656, epsilon = 1e-3);
    assert_relative_eq!(to_kpa.apply(psi).unwrap(), 170.0, epsilon = 1e-9);
}

#[test]
fn test_unit_convert_across_families_fails() {
    let err = built_in::unit_convert(Unit::Celsius, Unit::Liters)
        .apply(20.0)
        .unwrap_err();
    assert!(matches!(
        err,
        TransformError::Conversion(ConversionError::IncompatibleUnits { .. })
    ));
}

#[test]
fn test_lookup_transforms() {
    let table = LookupTable::new([(0.0, 0.0), (50.0, 25.0), (100.0, 75.0)]);
    let forward = built_in::lookup_table(table.clone());
    let reverse = built_in::reverse_lookup_table(table);

    assert_eq!(forward.apply(25.0).unwrap(), 12.5);
    assert_eq!(reverse.apply(25.0).unwrap(), 50.0);
}

#[test]
fn test_lookup_on_empty_table_fails() {
    let empty = built_in::lookup_table(LookupTable::new(Vec::<(f64, f64)>::new()));
    assert_eq!(
        empty.apply(1.0),
        Err(TransformError::Conversion(ConversionError::EmptyLookupTable))
    );
}

#[test]
fn test_custom_transform() {
    let halve = built_in::custom("halve_if_even", halve_if_even);
    assert_eq!(halve.apply(8.0).unwrap(), 4.0);
    assert!(matches!(halve.apply(3.0), Err(TransformError::Custom { .. })));
    assert_eq!(halve, built_in::custom("halve_if_even", halve_if_even));
}

#[test]
fn test_then_flattens_compositions() {
    let chained = built_in::identity()
        .then(built_in::scale(2.0))
        .then(built_in::offset(1.0))
        .then(built_in::negate());

    assert_eq!(
        chained,
        built_in::compose(vec![
            built_in::scale(2.0),
            built_in::offset(1.0),
            built_in::negate()
        ])
    );
    assert_eq!(chained.apply(2.0).unwrap(), -5.0);
}

#[test]
fn test_describe() {
    let pipeline = built_in::compose(vec![
        built_in::unit_convert(Unit::Kpa, Unit::Psi),
        built_in::clamp(10.0, 40.0),
    ]);
    assert_eq!(pipeline.to_string(), "[kPa -> psi | clamp(10, 40)]");
}

#[test]
fn test_transforms_deserialize_from_config() {
    let yaml = r#"
type: compose
steps:
  - type: unit_convert
    from: kpa
    to: psi
  - type: lookup_table
    points:
      - { input: 0.0, output: 0.0 }
      - { input: 100.0, output: 10.0 }
"#;
    let transform: Transform = serde_yaml::from_str(yaml).unwrap();
    let expected = built_in::compose(vec![
        built_in::unit_convert(Unit::Kpa, Unit::Psi),
        built_in::lookup_table(LookupTable::new([(0.0, 0.0), (100.0, 10.0)])),
    ]);
    assert_eq!(transform, expected);
}

#[test]
fn test_custom_transform_cannot_be_serialized() {
    let halve = built_in::custom("halve_if_even", halve_if_even);
    assert!(serde_json::to_string(&halve).is_err());
    assert_eq!(
        serde_json::to_value(built_in::scale(2.0)).unwrap(),
        serde_json::json!({"type": "scale", "factor": 2.0})
    );
}
