//! Target description: basis gate set and coupling map.
//!
//! Both are plain data carried through configuration. The basis gate set
//! decides which decomposition the synthesizer uses; the coupling map is
//! validated against the circuit size and otherwise passed through for the
//! backend that eventually runs the templates.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};

/// Basis gates for the target device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasisGates {
    /// List of gate names in the basis.
    gates: Vec<String>,
}

impl BasisGates {
    /// Create a new basis gates set. Names are lowercased.
    pub fn new(gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            gates: gates
                .into_iter()
                .map(|g| g.into().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Check if a gate is in the basis.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }

    /// Check if all listed gates are in the basis.
    pub fn contains_all(&self, gates: &[&str]) -> bool {
        gates.iter().all(|g| self.contains(g))
    }

    /// Get the basis gates.
    pub fn gates(&self) -> &[String] {
        &self.gates
    }

    /// IBM basis gates (RZ + SX + X + CX).
    pub fn ibm() -> Self {
        Self::new(["rz", "sx", "x", "cx", "id"])
    }

    /// Generic U3 + CX basis.
    pub fn u3() -> Self {
        Self::new(["u", "cx"])
    }

    /// Rotation basis (RZ + RY + CX).
    pub fn zyz() -> Self {
        Self::new(["rz", "ry", "cx"])
    }

    /// Look up a named preset: `ibm`, `u3`, `zyz`.
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ibm" => Some(Self::ibm()),
            "u3" | "u" => Some(Self::u3()),
            "zyz" => Some(Self::zyz()),
            _ => None,
        }
    }
}

/// Target device coupling map.
///
/// The coupling map defines which pairs of physical qubits can
/// interact with two-qubit gates.
///
/// Maps are built with [`CouplingMap::from_edges`] or
/// [`CouplingMap::add_edge`], which keep the adjacency index in step with
/// the edge list.
#[derive(Debug, Clone)]
pub struct CouplingMap {
    /// List of connected qubit pairs (bidirectional).
    edges: Vec<(u32, u32)>,
    /// Number of physical qubits.
    num_qubits: u32,
    /// Adjacency list for fast lookup.
    adjacency: FxHashMap<u32, Vec<u32>>,
}

impl CouplingMap {
    /// Create a new coupling map with the given number of qubits.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            edges: vec![],
            num_qubits,
            adjacency: FxHashMap::default(),
        }
    }

    /// Build a coupling map from an edge list, rejecting edges that refer
    /// to qubits outside the device.
    pub fn from_edges(num_qubits: u32, edges: &[[u32; 2]]) -> SynthResult<Self> {
        let mut map = Self::new(num_qubits);
        for &[q1, q2] in edges {
            if q1 >= num_qubits || q2 >= num_qubits {
                return Err(SynthError::InvalidEdge(q1, q2, num_qubits));
            }
            map.add_edge(q1, q2);
        }
        Ok(map)
    }

    /// Add an edge between two qubits (bidirectional).
    ///
    /// Duplicate edges (including reversed pairs) are silently ignored.
    pub fn add_edge(&mut self, q1: u32, q2: u32) {
        if self.is_connected(q1, q2) {
            return;
        }
        self.edges.push((q1, q2));
        self.adjacency.entry(q1).or_default().push(q2);
        self.adjacency.entry(q2).or_default().push(q1);
    }

    /// Check if two qubits are directly connected.
    #[inline]
    pub fn is_connected(&self, q1: u32, q2: u32) -> bool {
        self.adjacency
            .get(&q1)
            .is_some_and(|neighbors| neighbors.contains(&q2))
    }

    /// Get the number of physical qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the coupling edges.
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Create a linear coupling map (0-1-2-3-...).
    pub fn linear(n: u32) -> Self {
        let mut map = Self::new(n);
        for i in 0..n.saturating_sub(1) {
            map.add_edge(i, i + 1);
        }
        map
    }
}
