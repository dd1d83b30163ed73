//! Record-shaped ("legacy") device descriptor.
//!
//! A [`LegacyBackend`] wraps the companion records a device publishes
//! as-is: a configuration record, a calibration-properties record, and
//! optionally a pulse-defaults record. Derived fields are computed from
//! those records on demand.

use serde::{Deserialize, Serialize};

use crate::calibration::{InstructionScheduleMap, Pulse, Schedule};
use crate::coupling::CouplingMap;
use crate::descriptor::DeviceDescriptor;
use crate::durations::InstructionDurations;
use crate::error::{DeviceError, DeviceResult};
use crate::operations::BasisGates;
use crate::properties::BackendProperties;
use crate::timing::TimingConstraints;

/// Static configuration record of a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfiguration {
    /// Device name.
    pub backend_name: String,
    /// Device version string.
    #[serde(default)]
    pub backend_version: String,
    /// Number of physical qubits.
    pub n_qubits: u32,
    /// Native operation names.
    pub basis_gates: Vec<String>,
    /// Directed coupling edges. Absent for all-to-all devices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupling_map: Option<Vec<(u32, u32)>>,
    /// Whether this is a simulator.
    #[serde(default)]
    pub simulator: bool,
    /// Whether pulse-level control is offered.
    #[serde(default)]
    pub open_pulse: bool,
    /// Sample time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt: Option<f64>,
    /// Pulse alignment restrictions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing_constraints: Option<TimingConstraints>,
}

/// One calibrated command in a pulse-defaults record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Operation name.
    pub name: String,
    /// Physical qubits.
    pub qubits: Vec<u32>,
    /// Pulse sequence.
    pub sequence: Vec<Pulse>,
}

/// Pulse-defaults record of a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseDefaults {
    /// Estimated qubit drive frequencies, GHz.
    #[serde(default)]
    pub qubit_freq_est: Vec<f64>,
    /// Estimated measurement frequencies, GHz.
    #[serde(default)]
    pub meas_freq_est: Vec<f64>,
    /// Calibrated commands.
    pub cmd_def: Vec<Command>,
}

impl PulseDefaults {
    /// Collect the calibrated commands into a schedule map.
    pub fn instruction_schedule_map(&self) -> InstructionScheduleMap {
        let mut map = InstructionScheduleMap::new();
        for cmd in &self.cmd_def {
            map.add(
                cmd.name.clone(),
                cmd.qubits.clone(),
                Schedule::new(cmd.sequence.clone()),
            );
        }
        map
    }
}

/// Device descriptor backed by the raw configuration/properties/defaults records.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyBackend {
    configuration: BackendConfiguration,
    properties: Option<BackendProperties>,
    defaults: Option<PulseDefaults>,
}

impl LegacyBackend {
    /// Assemble a backend from its records, checking they agree.
    pub fn new(
        configuration: BackendConfiguration,
        properties: Option<BackendProperties>,
        defaults: Option<PulseDefaults>,
    ) -> DeviceResult<Self> {
        let n = configuration.n_qubits;
        let invalid = |reason: String| DeviceError::InvalidRecord {
            device: configuration.backend_name.clone(),
            reason,
        };

        if let Some(edges) = &configuration.coupling_map {
            if let Some(&(a, b)) = edges.iter().find(|&&(a, b)| a >= n || b >= n) {
                return Err(invalid(format!(
                    "coupling edge ({a}, {b}) outside {n} qubits"
                )));
            }
        }
        if let Some(props) = &properties {
            if props.qubits().len() != n as usize {
                return Err(invalid(format!(
                    "properties describe {} qubits, configuration has {n}",
                    props.qubits().len()
                )));
            }
        }
        if let Some(defaults) = &defaults {
            if let Some(cmd) = defaults.cmd_def.iter().find(|c| c.qubits.iter().any(|&q| q >= n)) {
                return Err(invalid(format!(
                    "calibration '{}' on {:?} outside {n} qubits",
                    cmd.name, cmd.qubits
                )));
            }
        }

        Ok(Self {
            configuration,
            properties,
            defaults,
        })
    }

    /// The configuration record.
    pub fn configuration(&self) -> &BackendConfiguration {
        &self.configuration
    }

    /// The pulse-defaults record, if the device publishes one.
    pub fn defaults(&self) -> Option<&PulseDefaults> {
        self.defaults.as_ref()
    }

    /// The calibration-properties record, if the device publishes one.
    pub fn raw_properties(&self) -> Option<&BackendProperties> {
        self.properties.as_ref()
    }
}

impl DeviceDescriptor for LegacyBackend {
    fn name(&self) -> &str {
        &self.configuration.backend_name
    }

    fn num_qubits(&self) -> u32 {
        self.configuration.n_qubits
    }

    fn coupling_map(&self) -> Option<CouplingMap> {
        self.configuration
            .coupling_map
            .as_ref()
            .map(|edges| CouplingMap::from_edges(self.configuration.n_qubits, edges.iter().copied()))
    }

    fn operation_names(&self) -> Option<BasisGates> {
        Some(BasisGates::new(self.configuration.basis_gates.iter().cloned()))
    }

    fn durations(&self) -> Option<InstructionDurations> {
        self.properties
            .as_ref()
            .map(|props| InstructionDurations::from_properties(props, self.configuration.dt))
    }

    fn instruction_schedule_map(&self) -> Option<InstructionScheduleMap> {
        self.defaults
            .as_ref()
            .map(PulseDefaults::instruction_schedule_map)
    }

    fn timing_constraints(&self) -> Option<TimingConstraints> {
        Some(self.configuration.timing_constraints.unwrap_or_default())
    }

    fn properties(&self) -> Option<BackendProperties> {
        self.properties.clone()
    }
}
