//! Adapters and the adapter registry


use approx::assert_relative_eq;
use orsf_core::{
    Adapter, AdapterMetadata, AdapterRegistry, Error, FieldMapping, JsonAdapter,
    KeyValueAdapter, MappingEngine, Orsf, ValidationCode,
};
use std::sync::Arc;
use std::thread;

fn demo_adapter() -> KeyValueAdapter {
    KeyValueAdapter::new(test_support::sim_metadata(), test_support::sim_mappings())
        .with_extension("cfg")
}

fn named_adapter(id: &str, version: &str, car: &str) -> Arc<dyn Adapter> {
    Arc::new(KeyValueAdapter::new(
        AdapterMetadata::new(id, version, car),
        vec![FieldMapping::new("setup.aero.front_wing", "wing")],
    ))
}

#[test]
fn test_json_adapter_round_trip() {
    let adapter = JsonAdapter::new();
    let orsf = test_support::race_setup();

    let bytes = adapter.to_native(&orsf).unwrap();
    let text = String::from_utf8(bytes.clone()).unwrap();
    assert!(text.contains("\"schema\": \"orsf://v1\""));

    assert_eq!(adapter.from_native(&bytes).unwrap(), orsf);
    assert_eq!(adapter.suggested_filename(), "setup_json.json");
}

#[test]
fn test_json_adapter_rejects_bad_input() {
    let adapter = JsonAdapter::new();
    assert!(matches!(
        adapter.from_native(&[0xff, 0xfe]),
        Err(Error::Adapter { .. })
    ));
    assert!(matches!(
        adapter.from_native(br#"{"schema": "orsf://v2"}"#),
        Err(Error::Schema { .. })
    ));
}

#[test]
fn test_json_adapter_mappings() {
    let adapter = JsonAdapter::new();
    let flat = adapter.to_flat(&test_support::race_setup()).unwrap();

    assert_eq!(flat["aero_front"], 3.0);
    assert_eq!(flat["brake_balance"], 55.5);
    assert_relative_eq!(flat["tire_fl_pressure"], 24.946, epsilon = 1e-3);
}

#[test]
fn test_key_value_round_trip() {
    let adapter = demo_adapter();
    let orsf = test_support::race_setup();

    let text = String::from_utf8(adapter.to_native(&orsf).unwrap()).unwrap();
    assert!(text.starts_with("# demosim 2.1 porsche_992_gt3_r\n"));
    assert!(text.contains("TC = 4\n"));
    assert!(text.contains("BrakeBias = 0.555"));

    let decoded = adapter.from_native(text.as_bytes()).unwrap();
    for rule in adapter.field_mappings() {
        assert_relative_eq!(
            MappingEngine::get_value(&decoded, &rule.canonical_path).unwrap(),
            MappingEngine::get_value(&orsf, &rule.canonical_path).unwrap(),
            epsilon = 1e-9
        );
    }
    assert_eq!(adapter.suggested_filename(), "setup_demosim.cfg");
}

#[test]
fn test_key_value_parsing() {
    let adapter = demo_adapter();
    let text = "; exported\n\n RearWing = 9 \n# comment\nTC=2\nUnknownKey = 1.5\n";

    let native = adapter.parse(text).unwrap();
    assert_eq!(native.len(), 3);
    assert_eq!(native["RearWing"], 9.0);

    let decoded = adapter.from_native(text.as_bytes()).unwrap();
    assert_eq!(MappingEngine::get_value(&decoded, "setup.aero.rear_wing"), Some(9.0));
    assert_eq!(decoded.setup.electronics.unwrap().tc_level, Some(2));
}

#[test]
fn test_key_value_parse_errors() {
    let adapter = demo_adapter();

    for text in ["RearWing 9", "= 4", "RearWing = high"] {
        match adapter.parse(text) {
            Err(Error::Adapter { adapter, message }) => {
                assert_eq!(adapter, "demosim");
                assert!(message.starts_with("Line 1"), "{message}");
            }
            other => panic!("expected adapter error for {text:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_key_value_rejects_non_finite_values() {
    let adapter = demo_adapter();

    for text in ["BrakeBias = NaN\n", "RearWing = 9\nBrakeBias = inf\n", "RearWing = -infinity\n"] {
        match adapter.from_native(text.as_bytes()) {
            Err(Error::Adapter { message, .. }) => {
                assert!(message.contains("is not a finite number"), "{message}");
            }
            other => panic!("expected adapter error for {text:?}, got {other:?}"),
        }
    }

    let err = adapter.parse("RearWing = 9\nBrakeBias = NaN").unwrap_err();
    assert!(err.to_string().contains("Line 2"), "{err}");
}

#[test]
fn test_key_value_required_key_missing() {
    let adapter = demo_adapter();
    let err = adapter.from_native(b"TC = 3\n").unwrap_err();
    assert!(matches!(err, Error::Mapping(_)));
    assert!(err.to_string().contains("RearWing"));
}

#[test]
fn test_key_value_template() {
    let template = test_support::race_setup();
    let adapter = demo_adapter().with_template(template.clone());

    let decoded = adapter.from_native(b"RearWing = 11\n").unwrap();
    assert_eq!(decoded.metadata, template.metadata);
    assert_eq!(MappingEngine::get_value(&decoded, "setup.aero.rear_wing"), Some(11.0));
    assert_eq!(MappingEngine::get_value(&decoded, "setup.aero.front_wing"), Some(3.0));
}

#[test]
fn test_default_adapter_validation() {
    let adapter = demo_adapter();
    let mut orsf = test_support::race_setup();
    assert!(adapter.validate(&orsf).is_empty());

    orsf.car.model.clear();
    let findings = adapter.validate(&orsf);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, ValidationCode::Required);
}

#[test]
fn test_registry_resolution() {
    let registry = AdapterRegistry::new();
    registry.register(named_adapter("acc", "1.8", "generic"));
    registry.register(named_adapter("acc", "1.9", "bmw_m4_gt3"));
    registry.register(named_adapter("iracing", "2024", "generic"));

    let exact = registry.resolve("acc", Some("1.9"), Some("bmw_m4_gt3")).unwrap();
    assert_eq!(exact.metadata().version, "1.9");

    let by_version = registry.resolve("acc", Some("1.9"), None).unwrap();
    assert_eq!(by_version.metadata().car_key, "bmw_m4_gt3");

    // Unknown version falls back to the first adapter with the id
    let fallback = registry.resolve("acc", Some("3.0"), None).unwrap();
    assert_eq!(fallback.metadata().version, "1.8");

    assert!(registry.resolve("rfactor2", None, None).is_none());
    assert_eq!(registry.adapters_for("acc").len(), 2);
    assert_eq!(registry.all().len(), 3);
}

#[test]
fn test_registry_unregister_and_clear() {
    let registry = AdapterRegistry::new();
    registry.register(named_adapter("acc", "1.8", "generic"));
    registry.register(named_adapter("acc", "1.9", "generic"));

    assert_eq!(registry.unregister("acc", "1.8", "other"), 0);
    assert_eq!(registry.unregister("acc", "1.8", "generic"), 1);
    assert_eq!(registry.len(), 1);
    assert_eq!(
        registry.resolve("acc", Some("1.8"), None).unwrap().metadata().version,
        "1.9"
    );

    registry.clear();
    assert!(registry.is_empty());
}

#[test]
fn test_registry_shared_across_threads() {
    let registry = Arc::new(AdapterRegistry::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry.register(named_adapter("acc", &format!("1.{}", i), "generic"));
                registry.resolve("acc", None, None).is_some()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert_eq!(registry.len(), 8);
}

#[test]
fn test_resolved_adapter_converts() {
    let registry = AdapterRegistry::new();
    registry.register(Arc::new(demo_adapter()));
    registry.register(Arc::new(JsonAdapter::new()));

    let adapter = registry
        .resolve("demosim", None, Some("porsche_992_gt3_r"))
        .unwrap();
    let bytes = adapter.to_native(&test_support::race_setup()).unwrap();
    let decoded = adapter.from_native(&bytes).unwrap();
    assert_eq!(
        MappingEngine::get_value(&decoded, "setup.fuel.stint_target_laps"),
        Some(28.0)
    );
    assert_eq!(decoded.schema, Orsf::default().schema);
}
