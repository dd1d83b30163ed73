//! Structured device descriptor.
//!
//! A [`Target`] stores, for each operation the device supports, the qubit
//! tuples it runs on together with per-tuple [`InstructionProperties`]
//! (duration, error, calibration). Every derived field is computed from
//! that one table:
//!
//! - the coupling map is the set of qargs of two-qubit instructions,
//! - the basis is the set of instruction names,
//! - durations, schedules and the property table are projections of the
//!   per-tuple records.

use std::collections::BTreeMap;

use crate::backend::LegacyBackend;
use crate::calibration::{InstructionScheduleMap, Schedule};
use crate::coupling::CouplingMap;
use crate::descriptor::DeviceDescriptor;
use crate::durations::InstructionDurations;
use crate::operations::BasisGates;
use crate::properties::{BackendProperties, GateProperties, QubitProperties};
use crate::timing::TimingConstraints;

/// Characteristics of one instruction on one qubit tuple.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstructionProperties {
    /// Duration in seconds.
    pub duration: Option<f64>,
    /// Error probability.
    pub error: Option<f64>,
    /// Pulse schedule implementing the instruction.
    pub calibration: Option<Schedule>,
}

/// Structured description of a compilation target.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    name: String,
    num_qubits: u32,
    /// Sample time in seconds.
    dt: Option<f64>,
    timing: TimingConstraints,
    instructions: BTreeMap<String, BTreeMap<Vec<u32>, InstructionProperties>>,
    qubit_properties: Vec<QubitProperties>,
}

impl Target {
    /// Create an empty target.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            dt: None,
            timing: TimingConstraints::default(),
            instructions: BTreeMap::new(),
            qubit_properties: vec![],
        }
    }

    /// Set the sample time.
    #[must_use]
    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = Some(dt);
        self
    }

    /// Set the timing constraints.
    #[must_use]
    pub fn with_timing_constraints(mut self, timing: TimingConstraints) -> Self {
        self.timing = timing;
        self
    }

    /// Set per-qubit properties, indexed by physical qubit.
    #[must_use]
    pub fn with_qubit_properties(mut self, qubit_properties: Vec<QubitProperties>) -> Self {
        self.qubit_properties = qubit_properties;
        self
    }

    /// Register an instruction on a qubit tuple.
    pub fn add_instruction(
        &mut self,
        name: impl Into<String>,
        qubits: Vec<u32>,
        properties: InstructionProperties,
    ) {
        self.instructions
            .entry(name.into())
            .or_default()
            .insert(qubits, properties);
    }

    /// Convert a record-shaped backend into a structured target.
    ///
    /// Single-qubit basis gates are registered on every qubit, two-qubit
    /// basis gates on every coupling edge, and `measure` on every qubit when
    /// readout data exists. Errors, lengths and calibrations are copied from
    /// the backend's records.
    pub fn from_backend(backend: &LegacyBackend) -> Self {
        let conf = backend.configuration();
        let props = backend.raw_properties();
        let calibrations = backend
            .defaults()
            .map(|d| d.instruction_schedule_map())
            .unwrap_or_default();

        let mut target = Self::new(format!("{}_v2", conf.backend_name), conf.n_qubits)
            .with_timing_constraints(conf.timing_constraints.unwrap_or_default());
        target.dt = conf.dt;
        if let Some(props) = props {
            target.qubit_properties = props.qubits().to_vec();
        }

        let record = |name: &str, qubits: &[u32]| InstructionProperties {
            duration: props.and_then(|p| p.gate_length(name, qubits)),
            error: props.and_then(|p| p.gate_error(name, qubits)),
            calibration: calibrations.get(name, qubits).cloned(),
        };

        let edges = conf.coupling_map.clone().unwrap_or_default();
        for gate in &conf.basis_gates {
            let two_qubit = props.is_some_and(|p| {
                p.gates()
                    .iter()
                    .any(|g| &g.gate == gate && g.qubits.len() == 2)
            });
            if two_qubit {
                for &(a, b) in &edges {
                    target.add_instruction(gate.clone(), vec![a, b], record(gate, &[a, b]));
                }
            } else {
                for q in 0..conf.n_qubits {
                    target.add_instruction(gate.clone(), vec![q], record(gate, &[q]));
                }
            }
        }

        if let Some(props) = props {
            for (index, qubit) in props.qubits().iter().enumerate() {
                let q = index as u32;
                target.add_instruction(
                    "measure",
                    vec![q],
                    InstructionProperties {
                        duration: qubit.readout_length,
                        error: qubit.readout_error,
                        calibration: calibrations.get("measure", &[q]).cloned(),
                    },
                );
            }
        }

        target
    }

    /// Qubit tuples an instruction is registered on.
    pub fn qargs_for(&self, name: &str) -> Vec<&[u32]> {
        self.instructions
            .get(name)
            .map(|by_qubits| by_qubits.keys().map(Vec::as_slice).collect())
            .unwrap_or_default()
    }

    /// Properties of an instruction on a qubit tuple.
    pub fn instruction_properties(&self, name: &str, qubits: &[u32]) -> Option<&InstructionProperties> {
        self.instructions.get(name)?.get(qubits)
    }

    /// Sample time in seconds.
    pub fn dt(&self) -> Option<f64> {
        self.dt
    }

    /// Connectivity from the qargs of two-qubit instructions.
    ///
    /// Returns `None` when the target has no two-qubit instructions.
    pub fn build_coupling_map(&self) -> Option<CouplingMap> {
        let edges: Vec<(u32, u32)> = self
            .instructions
            .values()
            .flat_map(BTreeMap::keys)
            .filter(|qargs| qargs.len() == 2)
            .map(|qargs| (qargs[0], qargs[1]))
            .collect();
        if edges.is_empty() {
            None
        } else {
            Some(CouplingMap::from_edges(self.num_qubits, edges))
        }
    }

    /// Durations of every instruction with a known duration.
    pub fn instruction_durations(&self) -> InstructionDurations {
        let mut durations = InstructionDurations::new(self.dt);
        for (name, by_qubits) in &self.instructions {
            for (qubits, props) in by_qubits {
                if let Some(duration) = props.duration {
                    durations.insert(name, qubits.clone(), duration);
                }
            }
        }
        durations
    }

    /// Schedules of every calibrated instruction.
    pub fn calibrations(&self) -> InstructionScheduleMap {
        let mut map = InstructionScheduleMap::new();
        for (name, by_qubits) in &self.instructions {
            for (qubits, props) in by_qubits {
                if let Some(schedule) = &props.calibration {
                    map.add(name.clone(), qubits.clone(), schedule.clone());
                }
            }
        }
        map
    }

    /// Project the instruction table into a property table.
    ///
    /// Measurement errors and lengths become per-qubit readout data; every
    /// other instruction becomes a gate row. Returns `None` when the target
    /// carries neither qubit data nor any error or duration.
    pub fn to_backend_properties(&self) -> Option<BackendProperties> {
        let mut qubits = self.qubit_properties.clone();
        let mut gates = vec![];

        for (name, by_qubits) in &self.instructions {
            for (qargs, props) in by_qubits {
                if props.error.is_none() && props.duration.is_none() {
                    continue;
                }
                if name == "measure" {
                    if let [q] = qargs.as_slice() {
                        let q = *q as usize;
                        if qubits.len() <= q {
                            qubits.resize(q + 1, QubitProperties::default());
                        }
                        qubits[q].readout_error = props.error;
                        qubits[q].readout_length = props.duration;
                    }
                    continue;
                }
                gates.push(GateProperties {
                    gate: name.clone(),
                    qubits: qargs.clone(),
                    gate_error: props.error,
                    gate_length: props.duration,
                });
            }
        }

        if qubits.is_empty() && gates.is_empty() {
            None
        } else {
            Some(BackendProperties::new(self.name.clone(), qubits, gates))
        }
    }
}

impl DeviceDescriptor for Target {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    fn coupling_map(&self) -> Option<CouplingMap> {
        self.build_coupling_map()
    }

    fn operation_names(&self) -> Option<BasisGates> {
        Some(BasisGates::new(self.instructions.keys().cloned()))
    }

    fn durations(&self) -> Option<InstructionDurations> {
        Some(self.instruction_durations())
    }

    fn instruction_schedule_map(&self) -> Option<InstructionScheduleMap> {
        Some(self.calibrations())
    }

    fn timing_constraints(&self) -> Option<TimingConstraints> {
        Some(self.timing)
    }

    fn properties(&self) -> Option<BackendProperties> {
        self.to_backend_properties()
    }
}
