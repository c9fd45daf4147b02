//! Gates bound to the qubits they act on.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// A gate applied to specific qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate.
    pub gate: StandardGate,
    /// Qubits this instruction operates on, in gate order.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self {
            gate,
            qubits: vec![qubit],
        }
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self {
            gate,
            qubits: vec![q1, q2],
        }
    }

    /// Get the name of the gate.
    pub fn name(&self) -> &'static str {
        self.gate.name()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qubits: Vec<String> = self.qubits.iter().map(ToString::to_string).collect();
        write!(f, "{} {}", self.gate, qubits.join(", "))
    }
}
