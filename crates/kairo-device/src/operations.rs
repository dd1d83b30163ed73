//! Operation-name sets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The set of operation names a device executes natively.
///
/// Stored as an ordered set, so two sets built from the same names in a
/// different order compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasisGates {
    gates: BTreeSet<String>,
}

impl BasisGates {
    /// Create a basis from gate names.
    pub fn new(gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            gates: gates.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a gate is in the basis.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.contains(gate)
    }

    /// Iterate over gate names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.gates.iter().map(String::as_str)
    }

    /// Gate names as an owned, sorted list.
    pub fn to_vec(&self) -> Vec<String> {
        self.gates.iter().cloned().collect()
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether the basis is empty.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// IBM Falcon basis (RZ + SX + X + CX).
    pub fn ibm() -> Self {
        Self::new(["id", "rz", "sx", "x", "cx", "reset"])
    }

    /// IQM basis (PRX + CZ).
    pub fn iqm() -> Self {
        Self::new(["prx", "cz", "measure", "barrier"])
    }
}

impl<S: Into<String>> FromIterator<S> for BasisGates {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
