//! Calibration-derived property tables.
//!
//! [`BackendProperties`] mirrors the calibration-properties record a device
//! publishes: per-qubit coherence and readout data plus per-gate error rates
//! and lengths. Times are in **seconds**, frequencies in **Hz**, errors are
//! probabilities in `[0.0, 1.0]`.

use serde::{Deserialize, Serialize};

/// Per-qubit calibration data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QubitProperties {
    /// Energy relaxation time.
    #[serde(rename = "T1", default, skip_serializing_if = "Option::is_none")]
    pub t1: Option<f64>,
    /// Dephasing time.
    #[serde(rename = "T2", default, skip_serializing_if = "Option::is_none")]
    pub t2: Option<f64>,
    /// Qubit drive frequency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
    /// Measurement misclassification probability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readout_error: Option<f64>,
    /// Measurement duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readout_length: Option<f64>,
}

/// Per-gate calibration data for one qubit tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateProperties {
    /// Operation name.
    pub gate: String,
    /// Physical qubits the entry applies to.
    pub qubits: Vec<u32>,
    /// Gate error probability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate_error: Option<f64>,
    /// Gate length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate_length: Option<f64>,
}

/// Error rates and coherence data for a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendProperties {
    /// Device the properties describe.
    pub backend_name: String,
    /// Device version string.
    #[serde(default)]
    pub backend_version: String,
    /// When the calibration was taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_date: Option<String>,
    /// Indexed by physical qubit.
    qubits: Vec<QubitProperties>,
    gates: Vec<GateProperties>,
}

impl BackendProperties {
    /// Create a property table from its parts.
    pub fn new(
        backend_name: impl Into<String>,
        qubits: Vec<QubitProperties>,
        gates: Vec<GateProperties>,
    ) -> Self {
        Self {
            backend_name: backend_name.into(),
            backend_version: String::new(),
            last_update_date: None,
            qubits,
            gates,
        }
    }

    /// Per-qubit records, indexed by physical qubit.
    pub fn qubits(&self) -> &[QubitProperties] {
        &self.qubits
    }

    /// Per-gate records.
    pub fn gates(&self) -> &[GateProperties] {
        &self.gates
    }

    /// Data for one qubit.
    pub fn qubit(&self, qubit: u32) -> Option<&QubitProperties> {
        self.qubits.get(qubit as usize)
    }

    /// Data for one gate on one qubit tuple.
    pub fn gate(&self, name: &str, qubits: &[u32]) -> Option<&GateProperties> {
        self.gates
            .iter()
            .find(|g| g.gate == name && g.qubits == qubits)
    }

    /// Error probability of a gate on the given qubits.
    pub fn gate_error(&self, name: &str, qubits: &[u32]) -> Option<f64> {
        self.gate(name, qubits).and_then(|g| g.gate_error)
    }

    /// Length of a gate on the given qubits, in seconds.
    pub fn gate_length(&self, name: &str, qubits: &[u32]) -> Option<f64> {
        self.gate(name, qubits).and_then(|g| g.gate_length)
    }

    /// Readout error of a qubit.
    pub fn readout_error(&self, qubit: u32) -> Option<f64> {
        self.qubit(qubit).and_then(|q| q.readout_error)
    }

    /// T1 of a qubit, in seconds.
    pub fn t1(&self, qubit: u32) -> Option<f64> {
        self.qubit(qubit).and_then(|q| q.t1)
    }

    /// T2 of a qubit, in seconds.
    pub fn t2(&self, qubit: u32) -> Option<f64> {
        self.qubit(qubit).and_then(|q| q.t2)
    }

    /// Mean reported error of a gate over all qubit tuples.
    #[allow(clippy::cast_precision_loss)]
    pub fn average_gate_error(&self, name: &str) -> Option<f64> {
        let errors: Vec<f64> = self
            .gates
            .iter()
            .filter(|g| g.gate == name)
            .filter_map(|g| g.gate_error)
            .collect();
        if errors.is_empty() {
            None
        } else {
            Some(errors.iter().sum::<f64>() / errors.len() as f64)
        }
    }
}
