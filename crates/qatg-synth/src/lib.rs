//! QATG Gate Synthesis
//!
//! This crate turns the three rotation parameters of a general single-qubit
//! unitary `U(θ, φ, λ)` into a concrete gate sequence drawn from a
//! restricted hardware basis, and describes the target the templates are
//! generated for.
//!
//! # Decompositions
//!
//! | Basis contains | Decomposition | Sequence (applied left to right) |
//! |----------------|---------------|----------------------------------|
//! | `u` | U | `U(θ, φ, λ)` |
//! | `rz`, `sx` | ZSX | `RZ(λ) SX RZ(θ+π) SX RZ(φ+π)` |
//! | `rz`, `ry` | ZYZ | `RZ(λ) RY(θ) RZ(φ)` |
//! | `rz`, `rx` | ZXZ | `RZ(λ−π/2) RX(θ) RZ(φ+π/2)` |
//!
//! # Example
//!
//! ```rust
//! use qatg_synth::{BasisGates, BasisSynthesizer, GateSynthesizer, sequence_unitary};
//! use qatg_ir::Unitary2x2;
//!
//! let synth = BasisSynthesizer::new(BasisGates::ibm()).unwrap();
//! let gates = synth.synthesize([0.4, -1.2, 2.0]).unwrap();
//! assert_eq!(gates.len(), 5);
//!
//! let composed = sequence_unitary(&gates).unwrap();
//! assert!(composed.approx_eq_up_to_phase(&Unitary2x2::u(0.4, -1.2, 2.0), 1e-9));
//! ```

pub mod error;
pub mod synthesizer;
pub mod target;

pub use error::{SynthError, SynthResult};
pub use synthesizer::{
    BasisSynthesizer, Decomposition, GateSynthesizer, RotationParams, sequence_unitary,
};
pub use target::{BasisGates, CouplingMap};
