//! QATG Gate and State Representation
//!
//! This crate provides the small linear-algebra layer the test generator is
//! built on: concrete gates, their unitary matrices, and dense statevectors
//! of one or two qubits.
//!
//! # Core Components
//!
//! - **Gates**: [`StandardGate`] for concrete gates with bound parameters and
//!   [`GateType`] for the parameter-free tag a fault attaches to
//! - **Matrices**: [`Unitary2x2`], [`Unitary4x4`] and [`GateMatrix`]
//! - **Instructions**: [`Instruction`] binding a gate to its qubits
//! - **States**: [`Statevector`] with sequential gate application and a
//!   Euclidean distance between states
//!
//! # Example: Propagating a State
//!
//! ```rust
//! use qatg_ir::{StandardGate, Statevector};
//!
//! let zero = Statevector::zero(1).unwrap();
//! let gates = [StandardGate::H.matrix(), StandardGate::Z.matrix()];
//! let minus = zero.apply(&gates).unwrap();
//!
//! assert!((minus.norm() - 1.0).abs() < 1e-12);
//! assert!((zero.distance(&minus).unwrap() - 0.765_366_864_730_18).abs() < 1e-9);
//! ```
//!
//! # Two-Qubit Ordering
//!
//! The first qubit of a pair is the most significant bit of the state index:
//! `|q0 q1⟩` is amplitude `2 * q0 + q1`. `CX` uses the first qubit as control.

pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod statevector;
pub mod unitary;

pub use error::{IrError, IrResult};
pub use gate::{GateType, StandardGate};
pub use instruction::Instruction;
pub use qubit::QubitId;
pub use statevector::Statevector;
pub use unitary::{GateMatrix, Unitary2x2, Unitary4x4};
