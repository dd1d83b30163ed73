//! End-to-end pipeline generation against the fake devices.

use std::sync::Arc;

use serde_json::json;

use kairo_compile::{
    CompileError, Condition, ConfigResolver, DerivedField, FieldSource, LayoutMethod,
    OptimizationLevel, PartialConfig, RoutingMethod, SchedulingMethod, StageKind,
    generate_pipeline, parse_overrides,
};
use kairo_device::{
    BasisGates, CouplingMap, DeviceDescriptor, LegacyBackend, Target, fake_backend, fake_target,
};

fn london_backend() -> LegacyBackend {
    fake_backend("fake_london").unwrap()
}

fn montreal_target() -> Arc<Target> {
    Arc::new(fake_target("fake_montreal").unwrap())
}

#[test]
fn test_every_level_yields_a_pipeline() {
    for level in 0..=3 {
        let pipeline =
            generate_pipeline(level, None, Some(montreal_target()), PartialConfig::new()).unwrap();
        assert!(!pipeline.is_empty());
        assert_eq!(i64::from(pipeline.level().as_u8()), level);
    }
}

#[test]
fn test_every_level_without_any_device() {
    for level in 0..=3 {
        let pipeline = generate_pipeline(level, None, None, PartialConfig::new()).unwrap();
        assert_eq!(pipeline.stages()[0].kind(), StageKind::Init);
    }
}

#[test]
fn test_level_seven_is_rejected() {
    let err = generate_pipeline(7, Some(&london_backend()), None, PartialConfig::new()).unwrap_err();
    assert!(matches!(err, CompileError::InvalidLevel(7)));
    assert!(err.to_string().contains('7'));
}

#[test]
fn test_london_level0_routing_respects_device_edges() {
    let backend = london_backend();
    let pipeline = generate_pipeline(0, Some(&backend), None, PartialConfig::new()).unwrap();

    let routing = pipeline.stage(StageKind::Routing).unwrap();
    let swap = routing.pass("StochasticSwap").unwrap();
    assert_eq!(swap.condition(), Some(Condition::NotMapped));
    assert_eq!(swap.arg("trials"), Some(&json!(20)));

    let expected = CouplingMap::bidirectional(5, [(0, 1), (1, 2), (1, 3), (3, 4)]);
    assert_eq!(swap.arg("coupling_map"), Some(&json!(expected.edges())));
    assert_eq!(
        routing.pass("CheckMap").unwrap().arg("coupling_map"),
        Some(&json!(expected.edges()))
    );

    // Level 0 never optimizes and London has no calibrations.
    assert!(!pipeline.has_stage(StageKind::Optimization));
    assert!(!pipeline.has_stage(StageKind::Scheduling));
}

#[test]
fn test_montreal_level3_is_scheduled() {
    let pipeline =
        generate_pipeline(3, None, Some(montreal_target()), PartialConfig::new()).unwrap();
    assert_eq!(
        pipeline.stage_kinds(),
        vec![
            StageKind::Init,
            StageKind::Layout,
            StageKind::Routing,
            StageKind::Translation,
            StageKind::Optimization,
            StageKind::Scheduling,
        ]
    );

    let scheduling = pipeline.stage(StageKind::Scheduling).unwrap();
    assert_eq!(
        scheduling.pass_names(),
        vec!["TimeUnitConversion", "ValidatePulseGates"]
    );
    assert_eq!(
        scheduling.pass("ValidatePulseGates").unwrap().arg("granularity"),
        Some(&json!(16))
    );
    assert!(pipeline.find_pass("PulseGates").is_some());
}

#[test]
fn test_montreal_backend_is_scheduled_too() {
    let backend = fake_backend("fake_montreal").unwrap();
    let pipeline = generate_pipeline(3, Some(&backend), None, PartialConfig::new()).unwrap();
    assert!(pipeline.has_stage(StageKind::Scheduling));
}

#[test]
fn test_explicit_scheduling_method() {
    let overrides = PartialConfig::new().with_scheduling_method(SchedulingMethod::Alap);
    let pipeline = generate_pipeline(1, None, Some(montreal_target()), overrides).unwrap();
    let scheduling = pipeline.stage(StageKind::Scheduling).unwrap();
    assert_eq!(
        scheduling.pass_names(),
        vec![
            "TimeUnitConversion",
            "ALAPScheduleAnalysis",
            "PadDelay",
            "ValidatePulseGates",
            "ConstrainedReschedule"
        ]
    );
}

#[test]
fn test_scheduling_without_device_fails() {
    let overrides = PartialConfig::new().with_scheduling_method(SchedulingMethod::Asap);
    let err = generate_pipeline(0, None, None, overrides).unwrap_err();
    assert!(matches!(
        err,
        CompileError::UnresolvedRequirement {
            stage: StageKind::Scheduling,
            field: "durations",
            ..
        }
    ));
}

#[test]
fn test_explicit_routing_without_connectivity_fails() {
    let overrides = PartialConfig::new().with_routing_method(RoutingMethod::Sabre);
    let err = generate_pipeline(2, None, None, overrides).unwrap_err();
    match err {
        CompileError::UnresolvedRequirement { stage, field, reason } => {
            assert_eq!(stage, StageKind::Routing);
            assert_eq!(field, "connectivity");
            assert!(reason.contains("sabre"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_explicit_basis_reaches_translation() {
    let basis = BasisGates::new(["rz", "sx", "cz"]);
    let overrides = PartialConfig::new().with_basis_gates(basis.clone());
    let pipeline = generate_pipeline(1, None, Some(montreal_target()), overrides).unwrap();
    let translator = pipeline.find_pass("BasisTranslator").unwrap();
    assert_eq!(translator.arg("basis_gates"), Some(&json!(basis.to_vec())));
}

#[test]
fn test_initial_layout_outside_device() {
    let overrides = parse_overrides("initial_layout: [0, 5]").unwrap();
    let err = generate_pipeline(1, Some(&london_backend()), None, overrides).unwrap_err();
    assert!(matches!(err, CompileError::InvalidLayout(_)));
}

#[test]
fn test_noise_adaptive_uses_device_properties() {
    let overrides = PartialConfig::new().with_layout_method(LayoutMethod::NoiseAdaptive);
    let pipeline = generate_pipeline(2, Some(&london_backend()), None, overrides).unwrap();
    assert!(pipeline.find_pass("NoiseAdaptiveLayout").is_some());
    assert!(pipeline.find_pass("CSPLayout").is_none());
}

#[test]
fn test_variants_resolve_to_the_same_connectivity() {
    let backend = london_backend();
    let target = Arc::new(fake_target("fake_london").unwrap());
    let resolver = ConfigResolver::new();

    let from_backend = resolver.resolve(None, Some(&backend), PartialConfig::new());
    let from_target = resolver.resolve(Some(target), None, PartialConfig::new());
    assert_eq!(from_backend.coupling_map, from_target.coupling_map);
    assert_eq!(from_backend.instruction_durations, from_target.instruction_durations);
    assert_eq!(
        from_backend.provenance.source(DerivedField::Connectivity),
        FieldSource::Backend
    );
    assert_eq!(
        from_target.provenance.source(DerivedField::Connectivity),
        FieldSource::Target
    );
}

#[test]
fn test_target_then_backend_layering_in_pipeline() {
    let backend = fake_backend("fake_montreal").unwrap();
    let target = Arc::new(fake_target("fake_london").unwrap());
    let pipeline = generate_pipeline(0, Some(&backend), Some(target.clone()), PartialConfig::new())
        .unwrap();
    let swap = pipeline.find_pass("StochasticSwap").unwrap();
    assert_eq!(
        swap.arg("coupling_map"),
        Some(&json!(target.coupling_map().unwrap().edges()))
    );
    assert_eq!(pipeline.level(), OptimizationLevel::Level0);
}
