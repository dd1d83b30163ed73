//! Integration tests for the fake device records and both descriptor flavors.

use kairo_device::{
    CouplingMap, DeviceDescriptor, FAKE_DEVICES, TimingConstraints, fake_backend, fake_record,
    fake_target,
};

#[test]
fn test_london_topology() {
    let backend = fake_backend("fake_london").unwrap();
    let map = backend.coupling_map().unwrap();

    assert_eq!(map.num_qubits(), 5);
    assert_eq!(
        map,
        CouplingMap::bidirectional(5, [(0, 1), (1, 2), (1, 3), (3, 4)])
    );
    assert!(map.is_symmetric());
    assert!(!map.is_adjacent(0, 2));
    assert!(!map.is_adjacent(2, 3));
}

#[test]
fn test_london_has_no_calibrations() {
    let backend = fake_backend("fake_london").unwrap();
    assert!(backend.instruction_schedule_map().is_none());

    let target = fake_target("fake_london").unwrap();
    assert!(target.instruction_schedule_map().unwrap().is_empty());
}

#[test]
fn test_montreal_records() {
    let backend = fake_backend("fake_montreal").unwrap();
    assert_eq!(backend.num_qubits(), 27);

    let map = backend.coupling_map().unwrap();
    assert!(map.is_symmetric());
    assert!(map.edges().iter().all(|&(a, b)| a < 27 && b < 27));
    assert_eq!(map.edges().len(), 56);

    let calibrations = backend.instruction_schedule_map().unwrap();
    assert!(calibrations.has("cx", &[0, 1]));
    assert!(calibrations.has("measure", &[26]));

    let timing = backend.timing_constraints().unwrap();
    assert_eq!(timing.granularity, 16);
    assert_eq!(timing.acquire_alignment, 16);
    assert!(!timing.is_unconstrained());
}

#[test]
fn test_variants_share_semantic_content() {
    for record in FAKE_DEVICES {
        let backend = record.backend().unwrap();
        let target = record.target().unwrap();

        assert_eq!(backend.coupling_map(), target.coupling_map(), "{}", record.name);
        assert_eq!(backend.durations(), target.durations(), "{}", record.name);
        assert_eq!(
            backend.timing_constraints(),
            target.timing_constraints(),
            "{}",
            record.name
        );

        let backend_gates = backend.operation_names().unwrap();
        let target_gates = target.operation_names().unwrap();
        assert!(backend_gates.iter().all(|g| target_gates.contains(g)));
        assert!(target_gates.contains("measure"));

        let backend_props = backend.properties().unwrap();
        let target_props = target.properties().unwrap();
        assert_eq!(
            backend_props.gate_error("cx", &[0, 1]),
            target_props.gate_error("cx", &[0, 1])
        );
        assert_eq!(backend_props.readout_error(3), target_props.readout_error(3));
    }
}

#[test]
fn test_montreal_calibrations_match_across_variants() {
    let backend = fake_backend("fake_montreal").unwrap();
    let target = fake_target("fake_montreal_v2").unwrap();
    assert_eq!(
        backend.instruction_schedule_map(),
        target.instruction_schedule_map()
    );
}

#[test]
fn test_cx_durations_follow_calibrations() {
    let backend = fake_backend("fake_montreal").unwrap();
    let durations = backend.durations().unwrap();
    let calibrations = backend.instruction_schedule_map().unwrap();

    for &(a, b) in backend.coupling_map().unwrap().edges() {
        let from_props = durations.get_dt("cx", &[a, b]).unwrap();
        let from_pulses = calibrations.get("cx", &[a, b]).unwrap().duration();
        assert_eq!(from_props, from_pulses, "cx({a}, {b})");
    }
}

#[test]
fn test_default_timing_for_london() {
    let target = fake_target("fake_london").unwrap();
    assert_eq!(target.timing_constraints(), Some(TimingConstraints::default()));
    assert_eq!(fake_record("fake_london").unwrap().topology, "T-shape: 0-1-2, 1-3-4");
}
