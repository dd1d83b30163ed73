//! Calibration schedule map.
//!
//! Maps an operation on specific qubits to the timed pulse sequence that
//! implements it on hardware. Pulse times are in units of `dt`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One pulse (or frame change, or acquisition) on a hardware channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pulse {
    /// Pulse or waveform name.
    pub name: String,
    /// Channel the pulse plays on (`d0`, `u3`, `m1`, `a1`, ...).
    #[serde(rename = "ch")]
    pub channel: String,
    /// Start time.
    pub t0: u64,
    /// Length. Zero for frame changes.
    #[serde(default)]
    pub duration: u64,
}

/// A timed pulse sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    pulses: Vec<Pulse>,
}

impl Schedule {
    /// Create a schedule from pulses.
    pub fn new(pulses: Vec<Pulse>) -> Self {
        Self { pulses }
    }

    /// The pulses in this schedule.
    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    /// End time of the last pulse.
    pub fn duration(&self) -> u64 {
        self.pulses
            .iter()
            .map(|p| p.t0 + p.duration)
            .max()
            .unwrap_or(0)
    }

    /// Channels touched by this schedule, sorted.
    pub fn channels(&self) -> Vec<&str> {
        let mut channels: Vec<&str> = self.pulses.iter().map(|p| p.channel.as_str()).collect();
        channels.sort_unstable();
        channels.dedup();
        channels
    }
}

/// Operation → qubits → pulse schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionScheduleMap {
    map: BTreeMap<String, BTreeMap<Vec<u32>, Schedule>>,
}

impl InstructionScheduleMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the schedule for an operation on a qubit tuple.
    pub fn add(&mut self, name: impl Into<String>, qubits: Vec<u32>, schedule: Schedule) {
        self.map
            .entry(name.into())
            .or_default()
            .insert(qubits, schedule);
    }

    /// The schedule for an operation on a qubit tuple.
    pub fn get(&self, name: &str, qubits: &[u32]) -> Option<&Schedule> {
        self.map.get(name)?.get(qubits)
    }

    /// Whether a schedule exists for an operation on a qubit tuple.
    pub fn has(&self, name: &str, qubits: &[u32]) -> bool {
        self.get(name, qubits).is_some()
    }

    /// Operation names with at least one schedule, sorted.
    pub fn instructions(&self) -> impl Iterator<Item = &str> + '_ {
        self.map.keys().map(String::as_str)
    }

    /// Qubit tuples that have a schedule for the operation.
    pub fn qubits_with_instruction(&self, name: &str) -> Vec<&[u32]> {
        self.map
            .get(name)
            .map(|by_qubits| by_qubits.keys().map(Vec::as_slice).collect())
            .unwrap_or_default()
    }

    /// Total number of schedules.
    pub fn len(&self) -> usize {
        self.map.values().map(BTreeMap::len).sum()
    }

    /// Whether the map holds no schedules.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
