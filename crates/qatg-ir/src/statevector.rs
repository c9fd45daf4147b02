//! Dense statevector propagation.
//!
//! Templates act on at most two qubits, so states are short dense vectors
//! and gates are applied by plain matrix-vector multiplication. Every
//! operation returns a new [`Statevector`]; nothing is updated in place.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::unitary::GateMatrix;

/// A quantum state of one or two qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Complex64>", into = "Vec<Complex64>")]
pub struct Statevector {
    /// The state amplitudes (2 or 4 complex numbers).
    amplitudes: Vec<Complex64>,
}

impl Statevector {
    /// Create a statevector initialized to |0...0⟩.
    pub fn zero(num_qubits: u32) -> IrResult<Self> {
        let dim = match num_qubits {
            1 => 2,
            2 => 4,
            _ => return Err(IrError::UnsupportedDimension(1usize << num_qubits.min(16))),
        };
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); dim];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self { amplitudes })
    }

    /// Wrap explicit amplitudes. The length must be 2 or 4; normalization is
    /// the caller's concern (see [`Statevector::norm`]).
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> IrResult<Self> {
        match amplitudes.len() {
            2 | 4 => Ok(Self { amplitudes }),
            n => Err(IrError::UnsupportedDimension(n)),
        }
    }

    /// Build from real amplitudes, e.g. `[1.0, 0.0]` for |0⟩.
    pub fn from_real(amplitudes: &[f64]) -> IrResult<Self> {
        Self::from_amplitudes(amplitudes.iter().map(|&a| Complex64::new(a, 0.0)).collect())
    }

    /// Number of amplitudes.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.amplitudes.len().trailing_zeros()
    }

    /// The amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt()
    }

    /// Whether every amplitude is finite.
    pub fn is_finite(&self) -> bool {
        self.amplitudes.iter().all(|a| a.re.is_finite() && a.im.is_finite())
    }

    /// Apply one gate matrix.
    pub fn apply_gate(&self, gate: &GateMatrix) -> IrResult<Self> {
        let dim = self.dim();
        if gate.dim() != dim {
            return Err(IrError::DimensionMismatch {
                gate_dim: gate.dim(),
                state_dim: dim,
            });
        }
        let m = gate.elements();
        let amplitudes: Vec<Complex64> = (0..dim)
            .map(|row| {
                (0..dim)
                    .map(|col| m[dim * row + col] * self.amplitudes[col])
                    .sum::<Complex64>()
            })
            .collect();
        Ok(Self { amplitudes })
    }

    /// Apply an ordered sequence of gate matrices, first element first.
    pub fn apply<'a>(&self, gates: impl IntoIterator<Item = &'a GateMatrix>) -> IrResult<Self> {
        gates
            .into_iter()
            .try_fold(self.clone(), |state, gate| state.apply_gate(gate))
    }

    /// Euclidean distance `||self - other||`.
    pub fn distance(&self, other: &Self) -> IrResult<f64> {
        if self.dim() != other.dim() {
            return Err(IrError::StateDimensionMismatch {
                left: self.dim(),
                right: other.dim(),
            });
        }
        Ok(self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| (a - b).norm_sqr())
            .sum::<f64>()
            .sqrt())
    }
}

impl TryFrom<Vec<Complex64>> for Statevector {
    type Error = IrError;

    fn try_from(amplitudes: Vec<Complex64>) -> Result<Self, Self::Error> {
        Self::from_amplitudes(amplitudes)
    }
}

impl From<Statevector> for Vec<Complex64> {
    fn from(state: Statevector) -> Self {
        state.amplitudes
    }
}
