//! Device connectivity graph.
//!
//! A [`CouplingMap`] lists the two-qubit interactions a device allows.
//! Edges are **directed**: `(a, b)` means a two-qubit gate may be applied
//! with `a` as control and `b` as target. Devices that allow both directions
//! list both edges; [`CouplingMap::is_symmetric`] reports whether that holds
//! for every edge.
//!
//! The edge list is kept sorted, so lookups are a binary search and no
//! per-map tables are built.

use serde::{Deserialize, Serialize};

use crate::error::{DeviceError, DeviceResult};

/// Serialized shape of a coupling map: the qubit count and its edge list.
///
/// When `num_qubits` is given every edge must fall inside it; otherwise the
/// count is taken from the highest qubit an edge names.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CouplingMapRecord {
    #[serde(default)]
    num_qubits: Option<u32>,
    edges: Vec<(u32, u32)>,
}

/// Directed connectivity graph over physical qubit indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CouplingMapRecord", into = "CouplingMapRecord")]
pub struct CouplingMap {
    /// Directed edges, sorted and free of duplicates.
    edges: Vec<(u32, u32)>,
    /// Number of physical qubits.
    num_qubits: u32,
}

/// Qubit count needed to hold every endpoint, or `None` past `u32::MAX`.
fn width(edges: &[(u32, u32)]) -> Option<u32> {
    edges
        .iter()
        .map(|&(a, b)| a.max(b).checked_add(1))
        .try_fold(0, |acc, w| w.map(|w| acc.max(w)))
}

fn sorted(edges: impl IntoIterator<Item = (u32, u32)>) -> Vec<(u32, u32)> {
    let mut edges: Vec<_> = edges.into_iter().collect();
    edges.sort_unstable();
    edges.dedup();
    edges
}

impl CouplingMap {
    /// Create a coupling map over `num_qubits` qubits with no edges.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            edges: vec![],
            num_qubits,
        }
    }

    /// Build a coupling map from directed edges.
    ///
    /// The qubit count is widened to cover every qubit an edge mentions.
    /// Fails when an edge names qubit `u32::MAX`, which no count can cover.
    pub fn try_from_edges(
        num_qubits: u32,
        edges: impl IntoIterator<Item = (u32, u32)>,
    ) -> DeviceResult<Self> {
        let edges = sorted(edges);
        let highest = width(&edges).ok_or_else(|| DeviceError::InvalidCouplingMap {
            reason: format!("qubit index {} is out of range", u32::MAX),
        })?;
        Ok(Self {
            edges,
            num_qubits: num_qubits.max(highest),
        })
    }

    /// Build a coupling map from edges already known to lie inside the device.
    ///
    /// Like [`try_from_edges`](Self::try_from_edges), but an edge on qubit
    /// `u32::MAX` is dropped instead of reported. Use the fallible form for
    /// user-supplied edges.
    pub fn from_edges(num_qubits: u32, edges: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let edges = sorted(
            edges
                .into_iter()
                .filter(|&(a, b)| a != u32::MAX && b != u32::MAX),
        );
        let highest = width(&edges).unwrap_or(0);
        Self {
            edges,
            num_qubits: num_qubits.max(highest),
        }
    }

    /// Build a coupling map where every undirected edge is allowed both ways.
    pub fn bidirectional(num_qubits: u32, edges: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Self::from_edges(
            num_qubits,
            edges.into_iter().flat_map(|(a, b)| [(a, b), (b, a)]),
        )
    }

    /// Create a linear coupling map (0-1-2-3-...), both directions allowed.
    pub fn linear(n: u32) -> Self {
        Self::bidirectional(n, (0..n.saturating_sub(1)).map(|i| (i, i + 1)))
    }

    /// Number of physical qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Directed edges in sorted order.
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Whether a two-qubit gate may run from `from` to `to`.
    #[inline]
    pub fn is_connected(&self, from: u32, to: u32) -> bool {
        self.edges.binary_search(&(from, to)).is_ok()
    }

    /// Whether the two qubits share an edge in either direction.
    #[inline]
    pub fn is_adjacent(&self, q1: u32, q2: u32) -> bool {
        self.is_connected(q1, q2) || self.is_connected(q2, q1)
    }

    /// Whether every edge also appears reversed.
    pub fn is_symmetric(&self) -> bool {
        self.edges.iter().all(|&(a, b)| self.is_connected(b, a))
    }
}

impl TryFrom<CouplingMapRecord> for CouplingMap {
    type Error = DeviceError;

    fn try_from(record: CouplingMapRecord) -> DeviceResult<Self> {
        let Some(n) = record.num_qubits else {
            return Self::try_from_edges(0, record.edges);
        };
        if let Some(&(a, b)) = record.edges.iter().find(|&&(a, b)| a >= n || b >= n) {
            return Err(DeviceError::InvalidCouplingMap {
                reason: format!("edge ({a}, {b}) outside {n} qubits"),
            });
        }
        Self::try_from_edges(n, record.edges)
    }
}

impl From<CouplingMap> for CouplingMapRecord {
    fn from(map: CouplingMap) -> Self {
        Self {
            num_qubits: Some(map.num_qubits),
            edges: map.edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coupling_map_linear() {
        let map = CouplingMap::linear(5);
        assert!(map.is_connected(0, 1));
        assert!(map.is_connected(1, 0));
        assert!(!map.is_connected(0, 2));
        assert_eq!(map.edges().len(), 8);
        assert!(map.is_symmetric());
        assert_eq!(CouplingMap::linear(0), CouplingMap::new(0));
    }

    #[test]
    fn test_directed_edges() {
        let map = CouplingMap::from_edges(3, [(0, 1), (2, 1)]);
        assert!(map.is_connected(0, 1));
        assert!(!map.is_connected(1, 0));
        assert!(map.is_adjacent(1, 0));
        assert!(!map.is_adjacent(0, 2));
        assert!(!map.is_symmetric());
    }

    #[test]
    fn test_edges_sorted_and_deduplicated() {
        let a = CouplingMap::from_edges(3, [(1, 2), (0, 1), (1, 2)]);
        let b = CouplingMap::from_edges(3, [(0, 1), (1, 2)]);
        assert_eq!(a.edges(), &[(0, 1), (1, 2)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_num_qubits_widened_by_edges() {
        let map = CouplingMap::from_edges(2, [(0, 4)]);
        assert_eq!(map.num_qubits(), 5);
        let map = CouplingMap::try_from_edges(0, [(3, 1)]).unwrap();
        assert_eq!(map.num_qubits(), 4);
    }

    #[test]
    fn test_top_qubit_index_rejected() {
        let err = CouplingMap::try_from_edges(0, [(0, u32::MAX)]).unwrap_err();
        assert!(matches!(err, DeviceError::InvalidCouplingMap { .. }));

        let map = CouplingMap::from_edges(2, [(0, 1), (u32::MAX, 0)]);
        assert_eq!(map.edges(), &[(0, 1)]);
        assert_eq!(map.num_qubits(), 2);
    }

    #[test]
    fn test_serde_round_trip() {
        let london = CouplingMap::bidirectional(5, [(0, 1), (1, 2), (1, 3), (3, 4)]);
        let json = serde_json::to_string(&london).unwrap();
        let back: CouplingMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, london);

        let bare: CouplingMap = serde_json::from_str(r#"{"edges": [[0, 1], [1, 2]]}"#).unwrap();
        assert_eq!(bare.num_qubits(), 3);
    }

    #[test]
    fn test_serde_rejects_edges_outside_declared_width() {
        let err = serde_json::from_str::<CouplingMap>(r#"{"num_qubits": 2, "edges": [[0, 2]]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("(0, 2)"));

        let err = serde_json::from_str::<CouplingMap>(r#"{"edges": [[0, 4294967295]]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
