//! Configuration for template generation.
//!
//! [`QatgConfig`] is the generator configuration: target description,
//! search budget, and stopping criteria. It is immutable for the lifetime of
//! a [`crate::Qatg`]. [`RunFile`] wraps it together with the fault lists and
//! initial states so a complete generation run can be described in YAML:
//!
//! ```yaml
//! generator:
//!   circuit_size: 2
//!   basis_gates: [rz, sx, x, cx]
//!   coupling_map: [[0, 1]]
//!   search:
//!     grid_slices: 21
//!     max_rounds: 800
//!     step: 0.01
//!   max_test_template_size: 50
//!   min_required_effect_size: 3.0
//! single_faults:
//!   - type: bias
//!     name: u-bias
//!     gate: u
//!     params: [0.5, 0.2, 0.1]
//!     bias: [0.05, 0.05, 0.05]
//! two_faults:
//!   - type: two_qubit_over_rotation
//!     name: cx-x-drift
//!     gate: cx
//!     axis: x
//!     angle: 0.1
//!     qubit: 1
//! ```

use qatg_ir::Statevector;
use qatg_synth::{BasisGates, CouplingMap};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{QatgError, QatgResult};
use crate::fault::FaultSpec;

/// Grid resolution and hill-climbing budget of the parameter optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Samples per axis of the coarse grid over [-π, π].
    #[serde(default = "default_grid_slices")]
    pub grid_slices: usize,

    /// Maximum number of hill-climbing rounds.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,

    /// Hill-climbing step size.
    #[serde(default = "default_step")]
    pub step: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            grid_slices: default_grid_slices(),
            max_rounds: default_max_rounds(),
            step: default_step(),
        }
    }
}

impl SearchConfig {
    /// Validate the search parameters.
    pub fn validate(&self) -> QatgResult<()> {
        if self.grid_slices == 0 {
            return Err(QatgError::InvalidConfig(
                "search.grid_slices must be at least 1".into(),
            ));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(QatgError::InvalidConfig(format!(
                "search.step must be a positive finite number, got {}",
                self.step
            )));
        }
        Ok(())
    }
}

/// Generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QatgConfig {
    /// Number of qubits of the circuit under test.
    pub circuit_size: u32,

    /// Hardware basis gate set the activation gates are synthesized into.
    #[serde(default = "BasisGates::ibm")]
    pub basis_gates: BasisGates,

    /// Qubit pairs two-qubit gates may act on.
    #[serde(default)]
    pub coupling_map: Vec<[u32; 2]>,

    /// Target probability of accepting a fault-free gate.
    #[serde(default = "default_target_alpha")]
    pub target_alpha: f64,

    /// Target probability of rejecting a faulty gate.
    #[serde(default = "default_target_beta")]
    pub target_beta: f64,

    /// Optimizer settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Maximum number of elements per template.
    #[serde(default = "default_max_test_template_size")]
    pub max_test_template_size: usize,

    /// Effect size a template must exceed to stop growing.
    #[serde(default = "default_min_required_effect_size")]
    pub min_required_effect_size: f64,

    /// Shots budget per template on the device under test. Reported only.
    #[serde(default = "default_test_sample_time")]
    pub test_sample_time: u64,
}

impl Default for QatgConfig {
    fn default() -> Self {
        Self {
            circuit_size: 2,
            basis_gates: BasisGates::ibm(),
            coupling_map: vec![[0, 1]],
            target_alpha: default_target_alpha(),
            target_beta: default_target_beta(),
            search: SearchConfig::default(),
            max_test_template_size: default_max_test_template_size(),
            min_required_effect_size: default_min_required_effect_size(),
            test_sample_time: default_test_sample_time(),
        }
    }
}

impl QatgConfig {
    /// Create a configuration with default settings for `circuit_size` qubits.
    pub fn new(circuit_size: u32) -> Self {
        Self {
            circuit_size,
            coupling_map: CouplingMap::linear(circuit_size)
                .edges()
                .iter()
                .map(|&(a, b)| [a, b])
                .collect(),
            ..Self::default()
        }
    }

    /// Set the basis gate set.
    #[must_use]
    pub fn with_basis_gates(mut self, basis_gates: BasisGates) -> Self {
        self.basis_gates = basis_gates;
        self
    }

    /// Set the optimizer settings.
    #[must_use]
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Set the template length cap and the effect-size threshold.
    #[must_use]
    pub fn with_stopping(mut self, max_test_template_size: usize, min_required_effect_size: f64) -> Self {
        self.max_test_template_size = max_test_template_size;
        self.min_required_effect_size = min_required_effect_size;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> QatgResult<()> {
        if self.circuit_size == 0 {
            return Err(QatgError::InvalidConfig(
                "circuit_size must be positive".into(),
            ));
        }
        for (name, value) in [
            ("target_alpha", self.target_alpha),
            ("target_beta", self.target_beta),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(QatgError::InvalidConfig(format!(
                    "{name} must lie in (0, 1), got {value}"
                )));
            }
        }
        self.search.validate()?;
        if self.max_test_template_size == 0 {
            return Err(QatgError::InvalidConfig(
                "max_test_template_size must be at least 1".into(),
            ));
        }
        if !self.min_required_effect_size.is_finite() {
            return Err(QatgError::InvalidConfig(format!(
                "min_required_effect_size must be finite, got {}",
                self.min_required_effect_size
            )));
        }
        self.coupling()?;
        Ok(())
    }

    /// Build the coupling map, rejecting edges outside the circuit.
    pub fn coupling(&self) -> QatgResult<CouplingMap> {
        Ok(CouplingMap::from_edges(self.circuit_size, &self.coupling_map)?)
    }
}

/// A complete generation run: configuration, faults and initial states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunFile {
    /// Generator configuration.
    pub generator: QatgConfig,

    /// Faults on single-qubit gates.
    #[serde(default)]
    pub single_faults: Vec<FaultSpec>,

    /// Faults on two-qubit gates.
    #[serde(default)]
    pub two_faults: Vec<FaultSpec>,

    /// Initial state for single-qubit templates (defaults to |0⟩).
    #[serde(default)]
    pub single_initial_state: Option<Statevector>,

    /// Initial state for two-qubit templates (defaults to |00⟩).
    #[serde(default)]
    pub two_initial_state: Option<Statevector>,
}

impl RunFile {
    /// Load a run file from YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> QatgResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&contents)
    }

    /// Parse a run file from a YAML string.
    pub fn from_yaml(contents: &str) -> QatgResult<Self> {
        let run: RunFile = serde_yaml_ng::from_str(contents)?;
        run.generator.validate()?;
        Ok(run)
    }

    /// Initial state for single-qubit templates.
    pub fn single_initial_state(&self) -> QatgResult<Statevector> {
        match &self.single_initial_state {
            Some(state) => Ok(state.clone()),
            None => Ok(Statevector::zero(1)?),
        }
    }

    /// Initial state for two-qubit templates.
    pub fn two_initial_state(&self) -> QatgResult<Statevector> {
        match &self.two_initial_state {
            Some(state) => Ok(state.clone()),
            None => Ok(Statevector::zero(2)?),
        }
    }
}

// Default value functions

fn default_grid_slices() -> usize {
    21
}

fn default_max_rounds() -> usize {
    800
}

fn default_step() -> f64 {
    0.01
}

fn default_target_alpha() -> f64 {
    0.99
}

fn default_target_beta() -> f64 {
    0.999
}

fn default_max_test_template_size() -> usize {
    50
}

fn default_min_required_effect_size() -> f64 {
    3.0
}

fn default_test_sample_time() -> u64 {
    10_000
}
