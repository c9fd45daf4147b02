//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A gate matrix does not match the dimension of the state it is applied to.
    #[error("Cannot apply {gate_dim}x{gate_dim} gate to a state of dimension {state_dim}")]
    DimensionMismatch {
        /// Dimension of the gate matrix.
        gate_dim: usize,
        /// Dimension of the state vector.
        state_dim: usize,
    },

    /// Two state vectors of different dimension were compared.
    #[error("State dimensions differ: {left} vs {right}")]
    StateDimensionMismatch {
        /// Dimension of the left operand.
        left: usize,
        /// Dimension of the right operand.
        right: usize,
    },

    /// State vector length is not a supported power of two.
    #[error("Unsupported state dimension {0} (expected 2 or 4)")]
    UnsupportedDimension(usize),

    /// Gate was rebuilt with the wrong number of parameters.
    #[error("Gate '{gate_name}' takes {expected} parameters, got {got}")]
    ParameterCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of parameters.
        expected: usize,
        /// Actual number of parameters provided.
        got: usize,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
