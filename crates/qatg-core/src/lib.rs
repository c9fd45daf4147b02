//! QATG Core
//!
//! Generates activation test templates for faulty quantum gates. For every
//! fault a template is grown element by element: each element is a
//! synthesized rotation ("activation gates") followed by the target gate,
//! with the rotation chosen to drive the faulty and fault-free states apart.
//! Growth stops once the effect size clears a threshold or the template
//! reaches its length cap.
//!
//! # Components
//!
//! - [`GridHillClimber`]: grid search over `[-π, π]` followed by
//!   coordinate-wise hill-climbing.
//! - [`ActivationFinder`]: scores rotations for single- and two-qubit faults
//!   and builds template elements.
//! - [`TemplateGenerator`]: the growth loop.
//! - [`Qatg`]: validates configuration and faults and drives generation.
//!
//! # Example
//!
//! ```rust
//! use std::f64::consts::FRAC_PI_2;
//!
//! use qatg_core::{ActivationKind, BiasFault, Qatg, QatgConfig, SearchConfig};
//! use qatg_ir::{StandardGate, Statevector};
//! use qatg_synth::BasisGates;
//!
//! let config = QatgConfig::new(1)
//!     .with_basis_gates(BasisGates::u3())
//!     .with_search(SearchConfig { grid_slices: 5, max_rounds: 50, step: 0.01 })
//!     .with_stopping(5, 3.0);
//! let qatg = Qatg::new(config).unwrap();
//!
//! let fault = BiasFault::new("rx-bias", StandardGate::Rx(FRAC_PI_2), vec![0.3]).unwrap();
//! let zero = Statevector::zero(1).unwrap();
//! let template = qatg.test_template(&fault, &zero, ActivationKind::Single).unwrap();
//!
//! assert!(!template.is_empty() && template.len() <= 5);
//! assert!(template.effect_size >= 0.1);
//! ```

pub mod activation;
pub mod config;
pub mod effect;
pub mod error;
pub mod fault;
pub mod generator;
pub mod optimizer;
pub mod template;

pub use activation::{ActivationFinder, ActivationKind, ActivationOutcome};
pub use config::{QatgConfig, RunFile, SearchConfig};
pub use effect::{EFFECT_SIZE_FLOOR, effect_size, vector_distance};
pub use error::{QatgError, QatgResult};
pub use fault::{
    BiasFault, Fault, FaultSpec, OverRotationFault, RatioFault, RotationAxis, check_fault_contract,
};
pub use generator::{Qatg, TestConfiguration, validate_initial_state};
pub use optimizer::{GridHillClimber, SearchOutcome};
pub use template::{GenerationState, TemplateElement, TemplateGenerator, TestTemplate};
