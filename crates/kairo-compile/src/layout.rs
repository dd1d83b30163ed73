//! Initial virtual-to-physical qubit layouts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CompileError, CompileResult};

/// A one-to-one mapping from virtual (circuit) qubits to physical (device)
/// qubits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(u32, u32)>", into = "Vec<(u32, u32)>")]
pub struct Layout {
    virtual_to_physical: BTreeMap<u32, u32>,
    physical_to_virtual: BTreeMap<u32, u32>,
}

impl Layout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual qubit `i` on physical qubit `i`.
    pub fn trivial(num_qubits: u32) -> Self {
        let mut layout = Self::new();
        for i in 0..num_qubits {
            layout.add(i, i);
        }
        layout
    }

    /// Virtual qubit `i` on `physical[i]`.
    ///
    /// Fails if a physical qubit appears twice.
    pub fn from_physical(physical: &[u32]) -> CompileResult<Self> {
        Self::from_pairs((0u32..).zip(physical.iter().copied()))
    }

    /// Build from explicit `(virtual, physical)` pairs.
    ///
    /// Fails if either side repeats.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, u32)>) -> CompileResult<Self> {
        let mut layout = Self::new();
        for (v, p) in pairs {
            if let Some(&other) = layout.physical_to_virtual.get(&p) {
                return Err(CompileError::InvalidLayout(format!(
                    "physical qubit {p} assigned to both virtual {other} and {v}"
                )));
            }
            if layout.virtual_to_physical.contains_key(&v) {
                return Err(CompileError::InvalidLayout(format!(
                    "virtual qubit {v} assigned twice"
                )));
            }
            layout.add(v, p);
        }
        Ok(layout)
    }

    /// Map a virtual qubit to a physical qubit.
    ///
    /// Any existing mapping of either qubit is dropped so the layout stays
    /// one-to-one.
    pub fn add(&mut self, virt: u32, physical: u32) {
        if let Some(old_virtual) = self.physical_to_virtual.remove(&physical) {
            self.virtual_to_physical.remove(&old_virtual);
        }
        if let Some(old_physical) = self.virtual_to_physical.remove(&virt) {
            self.physical_to_virtual.remove(&old_physical);
        }
        self.virtual_to_physical.insert(virt, physical);
        self.physical_to_virtual.insert(physical, virt);
    }

    /// Physical qubit of a virtual qubit.
    pub fn physical(&self, virt: u32) -> Option<u32> {
        self.virtual_to_physical.get(&virt).copied()
    }

    /// Virtual qubit placed on a physical qubit.
    pub fn virtual_qubit(&self, physical: u32) -> Option<u32> {
        self.physical_to_virtual.get(&physical).copied()
    }

    /// `(virtual, physical)` pairs in virtual order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.virtual_to_physical.iter().map(|(&v, &p)| (v, p))
    }

    /// Highest physical qubit used.
    pub fn max_physical(&self) -> Option<u32> {
        self.physical_to_virtual.keys().next_back().copied()
    }

    /// Number of mapped qubits.
    pub fn len(&self) -> usize {
        self.virtual_to_physical.len()
    }

    /// Whether nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.virtual_to_physical.is_empty()
    }

    /// Check the layout fits on a device with `num_qubits` physical qubits.
    pub fn check_fits(&self, num_qubits: u32) -> CompileResult<()> {
        match self.max_physical() {
            Some(p) if p >= num_qubits => Err(CompileError::InvalidLayout(format!(
                "physical qubit {p} does not exist on a {num_qubits}-qubit device"
            ))),
            _ => Ok(()),
        }
    }
}

impl From<Vec<(u32, u32)>> for Layout {
    fn from(pairs: Vec<(u32, u32)>) -> Self {
        let mut layout = Self::new();
        for (v, p) in pairs {
            layout.add(v, p);
        }
        layout
    }
}

impl From<Layout> for Vec<(u32, u32)> {
    fn from(layout: Layout) -> Self {
        layout.iter().collect()
    }
}
