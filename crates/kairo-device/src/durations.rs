//! Per-instruction duration table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::properties::BackendProperties;

/// One row of a duration table as it appears in override files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DurationEntry {
    name: String,
    /// Empty means "any qubits".
    #[serde(default)]
    qubits: Vec<u32>,
    /// Seconds.
    duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DurationsRecord {
    #[serde(default)]
    dt: Option<f64>,
    entries: Vec<DurationEntry>,
}

/// Instruction durations in seconds, keyed by operation name and qubits.
///
/// An entry with an empty qubit list applies to every qubit tuple that has
/// no entry of its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "DurationsRecord", into = "DurationsRecord")]
pub struct InstructionDurations {
    /// Device sample time in seconds, when known.
    dt: Option<f64>,
    table: BTreeMap<String, BTreeMap<Vec<u32>, f64>>,
}

impl InstructionDurations {
    /// Create an empty table.
    pub fn new(dt: Option<f64>) -> Self {
        Self {
            dt,
            table: BTreeMap::new(),
        }
    }

    /// Build a table from reported gate lengths and readout lengths.
    ///
    /// Gates without a reported length are left out. Readout lengths become
    /// `measure` entries.
    pub fn from_properties(properties: &BackendProperties, dt: Option<f64>) -> Self {
        let mut durations = Self::new(dt);
        for gate in properties.gates() {
            if let Some(length) = gate.gate_length {
                durations.insert(&gate.gate, gate.qubits.clone(), length);
            }
        }
        for (index, qubit) in properties.qubits().iter().enumerate() {
            if let Some(length) = qubit.readout_length {
                durations.insert("measure", vec![index as u32], length);
            }
        }
        durations
    }

    /// Insert or replace a duration (seconds).
    pub fn insert(&mut self, name: &str, qubits: Vec<u32>, seconds: f64) {
        self.table
            .entry(name.to_string())
            .or_default()
            .insert(qubits, seconds);
    }

    /// Duration in seconds, falling back to the qubit-agnostic entry.
    pub fn get(&self, name: &str, qubits: &[u32]) -> Option<f64> {
        let by_qubits = self.table.get(name)?;
        by_qubits
            .get(qubits)
            .or_else(|| by_qubits.get(&[][..]))
            .copied()
    }

    /// Duration in units of `dt`, rounded to the nearest sample.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn get_dt(&self, name: &str, qubits: &[u32]) -> Option<u64> {
        let dt = self.dt?;
        self.get(name, qubits).map(|s| (s / dt).round() as u64)
    }

    /// Device sample time in seconds.
    pub fn dt(&self) -> Option<f64> {
        self.dt
    }

    /// Operation names with at least one entry.
    pub fn instructions(&self) -> impl Iterator<Item = &str> + '_ {
        self.table.keys().map(String::as_str)
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.table.values().map(BTreeMap::len).sum()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<DurationsRecord> for InstructionDurations {
    fn from(record: DurationsRecord) -> Self {
        let mut durations = Self::new(record.dt);
        for entry in record.entries {
            durations.insert(&entry.name, entry.qubits, entry.duration);
        }
        durations
    }
}

impl From<InstructionDurations> for DurationsRecord {
    fn from(durations: InstructionDurations) -> Self {
        let entries = durations
            .table
            .into_iter()
            .flat_map(|(name, by_qubits)| {
                by_qubits.into_iter().map(move |(qubits, duration)| DurationEntry {
                    name: name.clone(),
                    qubits,
                    duration,
                })
            })
            .collect();
        Self {
            dt: durations.dt,
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 2.222_222_222_222_222e-10;

    #[test]
    fn test_lookup_with_fallback() {
        let mut durations = InstructionDurations::new(Some(DT));
        durations.insert("x", vec![], 160.0 * DT);
        durations.insert("x", vec![3], 320.0 * DT);

        assert_eq!(durations.get_dt("x", &[0]), Some(160));
        assert_eq!(durations.get_dt("x", &[3]), Some(320));
        assert_eq!(durations.get("cx", &[0, 1]), None);
        assert_eq!(durations.len(), 2);
    }

    #[test]
    fn test_get_dt_requires_dt() {
        let mut durations = InstructionDurations::new(None);
        durations.insert("x", vec![0], 3.5e-8);
        assert_eq!(durations.get("x", &[0]), Some(3.5e-8));
        assert_eq!(durations.get_dt("x", &[0]), None);
    }

    #[test]
    fn test_override_record_format() {
        let yaml = r#"{"dt": 1e-9, "entries": [{"name": "cx", "qubits": [0, 1], "duration": 3e-7}, {"name": "sx", "duration": 3.5e-8}]}"#;
        let durations: InstructionDurations = serde_json::from_str(yaml).unwrap();
        assert_eq!(durations.get_dt("cx", &[0, 1]), Some(300));
        assert_eq!(durations.get_dt("sx", &[7]), Some(35));
        assert_eq!(durations.instructions().collect::<Vec<_>>(), vec!["cx", "sx"]);
    }
}
