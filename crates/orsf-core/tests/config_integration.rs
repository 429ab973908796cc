//! Loading engine configuration and building adapters from it


use approx::assert_relative_eq;
use orsf_core::conversion::Unit;
use orsf_core::transformer::built_in;
use orsf_core::{AdapterRegistry, EngineConfig, Error, FieldMapping, ValidationMode};
use std::fs;
use tempfile::TempDir;

const YAML_CONFIG: &str = r#"
validation:
  mode: lenient
adapters:
  - id: acc
    version: "1.9"
    car_key: porsche_992_gt3_r
    description: Assetto Corsa Competizione
    file_extension: json
    mappings:
      - canonical_path: setup.tires.pressure_fl_kpa
        native_key: tyrePressureLF
        forward_transform: { type: unit_convert, from: kpa, to: psi }
        reverse_transform: { type: unit_convert, from: psi, to: kpa }
        required: true
      - canonical_path: setup.brakes.brake_bias_pct
        native_key: brakeBias
        forward_transform:
          type: compose
          steps:
            - { type: offset, amount: -50.0 }
            - { type: scale, factor: 5.0 }
        reverse_transform:
          type: compose
          steps:
            - { type: scale, factor: 0.2 }
            - { type: offset, amount: 50.0 }
  - id: lfs
    version: "0.7"
    car_key: generic
"#;

#[test]
fn test_defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.validation.mode, ValidationMode::Strict);
    assert!(config.adapters.is_empty());

    let empty = EngineConfig::from_yaml_str("{}").unwrap();
    assert_eq!(empty, config);
}

#[test]
fn test_yaml_config() {
    let config = EngineConfig::from_yaml_str(YAML_CONFIG).unwrap();
    assert_eq!(config.validation.mode, ValidationMode::Lenient);
    assert_eq!(config.adapters.len(), 2);

    let acc = &config.adapters[0];
    assert_eq!(acc.metadata.description, "Assetto Corsa Competizione");
    assert_eq!(acc.file_extension, "json");
    assert_eq!(
        acc.mappings[0],
        FieldMapping::new("setup.tires.pressure_fl_kpa", "tyrePressureLF")
            .with_forward(built_in::unit_convert(Unit::Kpa, Unit::Psi))
            .with_reverse(built_in::unit_convert(Unit::Psi, Unit::Kpa))
            .required()
    );

    let lfs = &config.adapters[1];
    assert_eq!(lfs.file_extension, "ini");
    assert!(lfs.mappings.is_empty());
}

#[test]
fn test_registry_from_config() {
    let config = EngineConfig::from_yaml_str(YAML_CONFIG).unwrap();
    let registry = AdapterRegistry::from_config(&config).unwrap();
    assert_eq!(registry.len(), 2);

    let acc = registry.resolve("acc", Some("1.9"), None).unwrap();
    assert_eq!(acc.file_extension(), "json");
    assert_eq!(acc.suggested_filename(), "setup_acc.json");

    let native = acc.to_flat(&test_support::race_setup()).unwrap();
    assert_relative_eq!(native["brakeBias"], 27.5, epsilon = 1e-9);

    let decoded = acc
        .from_native(b"tyrePressureLF = 26.0\nbrakeBias = 30\n")
        .unwrap();
    let brakes = decoded.setup.brakes.unwrap();
    assert_relative_eq!(brakes.brake_bias_pct.unwrap(), 56.0, epsilon = 1e-9);
}

#[test]
fn test_config_mode_drives_validator() {
    let config = EngineConfig::from_yaml_str(YAML_CONFIG).unwrap();
    let mut orsf = test_support::race_setup();
    orsf.car.car_class = Some("Kart".to_string());

    assert!(config.validator().validate(&orsf).is_empty());
    assert_eq!(EngineConfig::default().validator().validate(&orsf).len(), 1);
}

#[test]
fn test_rejects_invalid_config() {
    let unknown_path = r#"
adapters:
  - id: acc
    version: "1"
    car_key: generic
    mappings:
      - { canonical_path: setup.aero.wing_angle, native_key: wing }
"#;
    assert!(matches!(
        EngineConfig::from_yaml_str(unknown_path),
        Err(Error::Configuration { .. })
    ));

    let duplicate = r#"
adapters:
  - { id: acc, version: "1", car_key: generic }
  - { id: acc, version: "1", car_key: generic }
"#;
    assert!(EngineConfig::from_yaml_str(duplicate).is_err());

    let mixed_units = r#"
adapters:
  - id: acc
    version: "1"
    car_key: generic
    mappings:
      - canonical_path: setup.aero.front_wing
        native_key: wing
        forward_transform: { type: unit_convert, from: kpa, to: mm }
"#;
    assert!(EngineConfig::from_yaml_str(mixed_units).is_err());

    assert!(matches!(
        EngineConfig::from_yaml_str("adapters: 3"),
        Err(Error::Configuration { source: Some(_), .. })
    ));
}

#[test]
fn test_load_from_files() {
    let dir = TempDir::new().unwrap();

    let yaml_path = dir.path().join("engine.yaml");
    fs::write(&yaml_path, YAML_CONFIG).unwrap();
    let from_yaml = EngineConfig::from_file(&yaml_path).unwrap();

    let json_path = dir.path().join("engine.json");
    from_yaml.save(&json_path).unwrap();
    let from_json = EngineConfig::from_file(&json_path).unwrap();
    assert_eq!(from_json, from_yaml);

    let yml_path = dir.path().join("engine.yml");
    from_json.save(&yml_path).unwrap();
    assert_eq!(EngineConfig::from_file(&yml_path).unwrap(), from_yaml);
}

#[test]
fn test_file_errors() {
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("missing.yaml");
    assert!(matches!(
        EngineConfig::from_file(&missing),
        Err(Error::Io { .. })
    ));

    let toml = dir.path().join("engine.toml");
    fs::write(&toml, "mode = 'strict'").unwrap();
    assert!(matches!(
        EngineConfig::from_file(&toml),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn test_save_rejects_unloadable_extensions() {
    let dir = TempDir::new().unwrap();
    let config = EngineConfig::from_yaml_str(YAML_CONFIG).unwrap();

    for name in ["engine.toml", "engine.cfg", "engine"] {
        let path = dir.path().join(name);
        assert!(matches!(
            config.save(&path),
            Err(Error::Configuration { .. })
        ));
        assert!(!path.exists(), "{name} should not be written");
    }
}

#[test]
fn test_rejects_keys_that_break_key_value_lines() {
    for key in ["Wing=Front", "'#Wing'", "';Wing'", "\"Wing\\nFront\""] {
        let yaml = format!(
            r#"
adapters:
  - id: sim
    version: "1"
    car_key: car
    mappings:
      - canonical_path: setup.aero.front_wing
        native_key: {}
"#,
            key
        );
        assert!(
            matches!(EngineConfig::from_yaml_str(&yaml), Err(Error::Configuration { .. })),
            "{key} should be rejected"
        );
    }

    let accepted = r#"
adapters:
  - id: sim
    version: "1"
    car_key: car
    mappings:
      - { canonical_path: setup.aero.front_wing, native_key: Wing.Front }
"#;
    let config = EngineConfig::from_yaml_str(accepted).unwrap();
    let registry = AdapterRegistry::from_config(&config).unwrap();
    let adapter = registry.resolve("sim", None, None).unwrap();

    let mut orsf = test_support::race_setup();
    orsf.setup.aero.as_mut().unwrap().front_wing = Some(4.0);
    let decoded = adapter.from_native(&adapter.to_native(&orsf).unwrap()).unwrap();
    assert_eq!(decoded.setup.aero.unwrap().front_wing, Some(4.0));
}
