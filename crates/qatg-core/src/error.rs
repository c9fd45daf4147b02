//! Error types for template generation.

use qatg_ir::IrError;
use qatg_synth::SynthError;
use thiserror::Error;

/// Errors that can occur while generating test templates.
///
/// Reaching the maximum template length without clearing the effect-size
/// threshold is not an error; see [`crate::GenerationState::Capped`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QatgError {
    /// Configuration rejected at construction time.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A fault does not satisfy the fault-model contract.
    #[error("Fault '{fault}' violates the fault-model contract: {reason}")]
    FaultContract {
        /// Name of the fault.
        fault: String,
        /// What was violated.
        reason: String,
    },

    /// The initial state handed to the generator is unusable.
    #[error("Invalid initial state: {0}")]
    InvalidInitialState(String),

    /// A score or effect size evaluated to NaN or infinity.
    #[error("Non-finite score {score} at parameters {params:?}")]
    NonFiniteScore {
        /// The offending value.
        score: f64,
        /// Parameters it was evaluated at.
        params: Vec<f64>,
    },

    /// Run file could not be read.
    #[error("Failed to read run file: {0}")]
    Io(#[from] std::io::Error),

    /// Run file could not be parsed.
    #[error("Failed to parse run file: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// Matrix or state error.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Gate synthesis error.
    #[error(transparent)]
    Synth(#[from] SynthError),
}

impl QatgError {
    /// Create a fault contract error.
    pub fn fault_contract(fault: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FaultContract {
            fault: fault.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for template generation.
pub type QatgResult<T> = Result<T, QatgError>;
