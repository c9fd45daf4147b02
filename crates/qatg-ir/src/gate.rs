//! Quantum gate types.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::unitary::{GateMatrix, Unitary2x2, Unitary4x4};

/// Standard gates with bound numeric parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate", content = "params", rename_all = "lowercase")]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate.
    P(f64),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(f64, f64, f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate, first qubit is the control.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
}

/// Parameter-free tag identifying what kind of gate an operation is.
///
/// Faults attach to a gate type; every synthesized gate of that type is
/// replaced by its faulty counterpart during simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateType {
    I,
    X,
    Y,
    Z,
    H,
    SX,
    SXdg,
    Rx,
    Ry,
    Rz,
    P,
    U,
    CX,
    CZ,
    Swap,
}

impl GateType {
    /// Gate name as used in basis gate lists.
    pub fn name(&self) -> &'static str {
        match self {
            GateType::I => "id",
            GateType::X => "x",
            GateType::Y => "y",
            GateType::Z => "z",
            GateType::H => "h",
            GateType::SX => "sx",
            GateType::SXdg => "sxdg",
            GateType::Rx => "rx",
            GateType::Ry => "ry",
            GateType::Rz => "rz",
            GateType::P => "p",
            GateType::U => "u",
            GateType::CX => "cx",
            GateType::CZ => "cz",
            GateType::Swap => "swap",
        }
    }

    /// Look a gate type up by name. `u3` and `cnot` are accepted aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let gate_type = match name.to_ascii_lowercase().as_str() {
            "id" | "i" => GateType::I,
            "x" => GateType::X,
            "y" => GateType::Y,
            "z" => GateType::Z,
            "h" => GateType::H,
            "sx" => GateType::SX,
            "sxdg" => GateType::SXdg,
            "rx" => GateType::Rx,
            "ry" => GateType::Ry,
            "rz" => GateType::Rz,
            "p" => GateType::P,
            "u" | "u3" => GateType::U,
            "cx" | "cnot" => GateType::CX,
            "cz" => GateType::CZ,
            "swap" => GateType::Swap,
            _ => return None,
        };
        Some(gate_type)
    }

    /// Number of qubits a gate of this type acts on.
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateType::CX | GateType::CZ | GateType::Swap => 2,
            _ => 1,
        }
    }

    /// Number of numeric parameters a gate of this type takes.
    pub fn num_params(&self) -> usize {
        match self {
            GateType::Rx | GateType::Ry | GateType::Rz | GateType::P => 1,
            GateType::U => 3,
            _ => 0,
        }
    }

    /// Build a concrete gate of this type from its parameters.
    pub fn with_params(&self, params: &[f64]) -> IrResult<StandardGate> {
        if params.len() != self.num_params() {
            return Err(IrError::ParameterCountMismatch {
                gate_name: self.name().to_string(),
                expected: self.num_params(),
                got: params.len(),
            });
        }
        let gate = match self {
            GateType::I => StandardGate::I,
            GateType::X => StandardGate::X,
            GateType::Y => StandardGate::Y,
            GateType::Z => StandardGate::Z,
            GateType::H => StandardGate::H,
            GateType::SX => StandardGate::SX,
            GateType::SXdg => StandardGate::SXdg,
            GateType::Rx => StandardGate::Rx(params[0]),
            GateType::Ry => StandardGate::Ry(params[0]),
            GateType::Rz => StandardGate::Rz(params[0]),
            GateType::P => StandardGate::P(params[0]),
            GateType::U => StandardGate::U(params[0], params[1], params[2]),
            GateType::CX => StandardGate::CX,
            GateType::CZ => StandardGate::CZ,
            GateType::Swap => StandardGate::Swap,
        };
        Ok(gate)
    }
}

impl std::fmt::Display for GateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl StandardGate {
    /// Get the type tag of this gate.
    #[inline]
    pub fn gate_type(&self) -> GateType {
        match self {
            StandardGate::I => GateType::I,
            StandardGate::X => GateType::X,
            StandardGate::Y => GateType::Y,
            StandardGate::Z => GateType::Z,
            StandardGate::H => GateType::H,
            StandardGate::SX => GateType::SX,
            StandardGate::SXdg => GateType::SXdg,
            StandardGate::Rx(_) => GateType::Rx,
            StandardGate::Ry(_) => GateType::Ry,
            StandardGate::Rz(_) => GateType::Rz,
            StandardGate::P(_) => GateType::P,
            StandardGate::U(_, _, _) => GateType::U,
            StandardGate::CX => GateType::CX,
            StandardGate::CZ => GateType::CZ,
            StandardGate::Swap => GateType::Swap,
        }
    }

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.gate_type().name()
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.gate_type().num_qubits()
    }

    /// Get parameters of this gate.
    pub fn params(&self) -> Vec<f64> {
        match *self {
            StandardGate::Rx(p) | StandardGate::Ry(p) | StandardGate::Rz(p) | StandardGate::P(p) => {
                vec![p]
            }
            StandardGate::U(theta, phi, lambda) => vec![theta, phi, lambda],
            _ => vec![],
        }
    }

    /// The unitary matrix of this gate.
    pub fn matrix(&self) -> GateMatrix {
        match *self {
            StandardGate::I => Unitary2x2::identity().into(),
            StandardGate::X => Unitary2x2::x().into(),
            StandardGate::Y => Unitary2x2::y().into(),
            StandardGate::Z => Unitary2x2::z().into(),
            StandardGate::H => Unitary2x2::h().into(),
            StandardGate::SX => Unitary2x2::sx().into(),
            StandardGate::SXdg => Unitary2x2::sxdg().into(),
            StandardGate::Rx(t) => Unitary2x2::rx(t).into(),
            StandardGate::Ry(t) => Unitary2x2::ry(t).into(),
            StandardGate::Rz(t) => Unitary2x2::rz(t).into(),
            StandardGate::P(l) => Unitary2x2::p(l).into(),
            StandardGate::U(theta, phi, lambda) => Unitary2x2::u(theta, phi, lambda).into(),
            StandardGate::CX => Unitary4x4::cx().into(),
            StandardGate::CZ => Unitary4x4::cz().into(),
            StandardGate::Swap => Unitary4x4::swap().into(),
        }
    }
}

impl std::fmt::Display for StandardGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self.params();
        if params.is_empty() {
            return f.write_str(self.name());
        }
        let rendered: Vec<String> = params.iter().map(|p| format!("{p:.6}")).collect();
        write!(f, "{}({})", self.name(), rendered.join(", "))
    }
}
