//! Hardware timing constraints.

use serde::{Deserialize, Serialize};

/// Alignment restrictions a device places on pulse-level schedules.
///
/// All values are in units of the device sample time `dt`. The unit
/// constraints (every field `1`) impose no restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConstraints {
    /// Every pulse length must be a multiple of this value.
    pub granularity: u32,
    /// Minimum pulse length.
    pub min_length: u32,
    /// Start times of gate pulses must be a multiple of this value.
    pub pulse_alignment: u32,
    /// Start times of acquisitions must be a multiple of this value.
    pub acquire_alignment: u32,
}

impl TimingConstraints {
    /// Whether these constraints restrict anything.
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for TimingConstraints {
    fn default() -> Self {
        Self {
            granularity: 1,
            min_length: 1,
            pulse_alignment: 1,
            acquire_alignment: 1,
        }
    }
}
