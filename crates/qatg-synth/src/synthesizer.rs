//! Synthesis of `U(θ, φ, λ)` into a restricted basis.
//!
//! Every decomposition emits a fixed gate pattern regardless of the angles:
//! no gate is dropped when an angle happens to be close to zero. The
//! activation search scores thousands of nearby parameter vectors, and a
//! fixed pattern keeps the set of gates a fault can attach to stable across
//! the whole search.

use std::f64::consts::{FRAC_PI_2, PI};

use qatg_ir::{GateMatrix, StandardGate, Unitary2x2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SynthError, SynthResult};
use crate::target::BasisGates;

/// Rotation parameters (theta, phi, lambda) of `U(θ, φ, λ)`.
pub type RotationParams = [f64; 3];

/// Maps rotation parameters to a concrete gate sequence.
///
/// Implementations must be deterministic and the composed unitary of the
/// returned sequence must equal `U(θ, φ, λ)` up to global phase.
pub trait GateSynthesizer: Send + Sync {
    /// Get the name of this synthesizer.
    fn name(&self) -> &str;

    /// Synthesize the rotation, first gate in the sequence applied first.
    fn synthesize(&self, params: RotationParams) -> SynthResult<Vec<StandardGate>>;
}

/// Decomposition pattern used for `U(θ, φ, λ)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decomposition {
    /// A single `U` gate.
    U,
    /// `RZ(λ) · SX · RZ(θ+π) · SX · RZ(φ+π)` (IBM native).
    ZSX,
    /// `RZ(λ) · RY(θ) · RZ(φ)`.
    ZYZ,
    /// `RZ(λ−π/2) · RX(θ) · RZ(φ+π/2)`.
    ZXZ,
}

impl Decomposition {
    /// Preference order when picking a decomposition for a basis.
    pub const PREFERENCE: [Decomposition; 4] = [
        Decomposition::U,
        Decomposition::ZSX,
        Decomposition::ZYZ,
        Decomposition::ZXZ,
    ];

    /// Get the name of this decomposition.
    pub fn name(&self) -> &'static str {
        match self {
            Decomposition::U => "u",
            Decomposition::ZSX => "zsx",
            Decomposition::ZYZ => "zyz",
            Decomposition::ZXZ => "zxz",
        }
    }

    /// Gate names this decomposition emits.
    pub fn required_gates(&self) -> &'static [&'static str] {
        match self {
            Decomposition::U => &["u"],
            Decomposition::ZSX => &["rz", "sx"],
            Decomposition::ZYZ => &["rz", "ry"],
            Decomposition::ZXZ => &["rz", "rx"],
        }
    }

    /// Gates in application order.
    pub fn gates(&self, [theta, phi, lambda]: RotationParams) -> Vec<StandardGate> {
        match self {
            Decomposition::U => vec![StandardGate::U(theta, phi, lambda)],
            Decomposition::ZSX => vec![
                StandardGate::Rz(lambda),
                StandardGate::SX,
                StandardGate::Rz(theta + PI),
                StandardGate::SX,
                StandardGate::Rz(phi + PI),
            ],
            Decomposition::ZYZ => vec![
                StandardGate::Rz(lambda),
                StandardGate::Ry(theta),
                StandardGate::Rz(phi),
            ],
            Decomposition::ZXZ => vec![
                StandardGate::Rz(lambda - FRAC_PI_2),
                StandardGate::Rx(theta),
                StandardGate::Rz(phi + FRAC_PI_2),
            ],
        }
    }
}

impl std::fmt::Display for Decomposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Synthesizer for a configured basis gate set.
#[derive(Debug, Clone)]
pub struct BasisSynthesizer {
    basis: BasisGates,
    decomposition: Decomposition,
}

impl BasisSynthesizer {
    /// Create a synthesizer, picking the first decomposition in
    /// [`Decomposition::PREFERENCE`] the basis supports.
    pub fn new(basis: BasisGates) -> SynthResult<Self> {
        let decomposition = Decomposition::PREFERENCE
            .into_iter()
            .find(|d| basis.contains_all(d.required_gates()))
            .ok_or_else(|| SynthError::UnsupportedBasis(basis.gates().to_vec()))?;
        debug!(%decomposition, basis = ?basis.gates(), "selected decomposition");
        Ok(Self {
            basis,
            decomposition,
        })
    }

    /// Create a synthesizer with an explicit decomposition.
    pub fn with_decomposition(basis: BasisGates, decomposition: Decomposition) -> SynthResult<Self> {
        let missing: Vec<&'static str> = decomposition
            .required_gates()
            .iter()
            .copied()
            .filter(|g| !basis.contains(g))
            .collect();
        if !missing.is_empty() {
            return Err(SynthError::MissingGates {
                decomposition: decomposition.name(),
                missing,
            });
        }
        Ok(Self {
            basis,
            decomposition,
        })
    }

    /// The basis gate set.
    pub fn basis(&self) -> &BasisGates {
        &self.basis
    }

    /// The decomposition in use.
    pub fn decomposition(&self) -> Decomposition {
        self.decomposition
    }
}

impl GateSynthesizer for BasisSynthesizer {
    fn name(&self) -> &str {
        self.decomposition.name()
    }

    fn synthesize(&self, params: RotationParams) -> SynthResult<Vec<StandardGate>> {
        if let Some((index, &value)) = params.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(SynthError::NonFiniteParameter { index, value });
        }
        Ok(self.decomposition.gates(params))
    }
}

/// Composed unitary of a single-qubit gate sequence, first gate applied
/// first. Returns `None` if the sequence contains a multi-qubit gate.
pub fn sequence_unitary(gates: &[StandardGate]) -> Option<Unitary2x2> {
    gates
        .iter()
        .try_fold(Unitary2x2::identity(), |acc, gate| match gate.matrix() {
            GateMatrix::Single(u) => Some(u * acc),
            GateMatrix::Two(_) => None,
        })
}
