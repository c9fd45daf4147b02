//! Error types for gate synthesis.

use thiserror::Error;

/// Errors that can occur while synthesizing rotations into a basis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// No known decomposition fits the basis gate set.
    #[error("Cannot synthesize U(theta, phi, lambda) in basis [{}]", .0.join(", "))]
    UnsupportedBasis(Vec<String>),

    /// A requested decomposition needs gates the basis does not provide.
    #[error("Decomposition {decomposition} needs gates missing from the basis: {}", missing.join(", "))]
    MissingGates {
        /// Name of the decomposition.
        decomposition: &'static str,
        /// Gate names not present in the basis.
        missing: Vec<&'static str>,
    },

    /// A rotation parameter is NaN or infinite.
    #[error("Rotation parameter {index} is not finite: {value}")]
    NonFiniteParameter {
        /// Position in (theta, phi, lambda).
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Coupling map edge refers to a qubit outside the device.
    #[error("Coupling edge ({0}, {1}) is outside a {2}-qubit device")]
    InvalidEdge(u32, u32, u32),
}

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;
