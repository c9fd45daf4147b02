//! The generation driver.

use qatg_ir::Statevector;
use qatg_synth::{BasisSynthesizer, GateSynthesizer};
use serde::Serialize;
use tracing::{debug, info};

use crate::activation::{ActivationFinder, ActivationKind};
use crate::config::QatgConfig;
use crate::error::{QatgError, QatgResult};
use crate::fault::{Fault, check_fault_contract};
use crate::optimizer::GridHillClimber;
use crate::template::{GenerationState, TemplateGenerator, TestTemplate};

/// Tolerance on the norm of caller-supplied initial states.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// The test template for one fault, with the targets it was generated for.
#[derive(Debug, Clone, Serialize)]
pub struct TestConfiguration {
    /// Name of the fault.
    pub fault: String,
    /// Search strategy used.
    pub kind: ActivationKind,
    /// The generated template.
    pub template: TestTemplate,
    /// Target probability of accepting a fault-free gate.
    pub target_alpha: f64,
    /// Target probability of rejecting a faulty gate.
    pub target_beta: f64,
    /// Shot budget per template.
    pub test_sample_time: u64,
}

impl TestConfiguration {
    /// Terminal state of the template.
    pub fn state(&self) -> GenerationState {
        self.template.state
    }
}

/// Activation test template generator.
///
/// The configuration is validated and the synthesizer built once in
/// [`Qatg::new`]; afterwards the generator is immutable and every call is
/// independent.
pub struct Qatg {
    config: QatgConfig,
    synthesizer: Box<dyn GateSynthesizer>,
}

impl std::fmt::Debug for Qatg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Qatg")
            .field("config", &self.config)
            .field("synthesizer", &self.synthesizer.name())
            .finish()
    }
}

impl Qatg {
    /// Create a generator, synthesizing into the configured basis.
    pub fn new(config: QatgConfig) -> QatgResult<Self> {
        config.validate()?;
        let synthesizer = BasisSynthesizer::new(config.basis_gates.clone())?;
        Ok(Self {
            config,
            synthesizer: Box::new(synthesizer),
        })
    }

    /// Create a generator with a custom synthesizer.
    pub fn with_synthesizer(
        config: QatgConfig,
        synthesizer: Box<dyn GateSynthesizer>,
    ) -> QatgResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            synthesizer,
        })
    }

    /// The configuration.
    pub fn config(&self) -> &QatgConfig {
        &self.config
    }

    /// The gate synthesizer.
    pub fn synthesizer(&self) -> &dyn GateSynthesizer {
        self.synthesizer.as_ref()
    }

    fn generator(&self) -> TemplateGenerator<'_> {
        let finder = ActivationFinder::new(
            self.synthesizer.as_ref(),
            GridHillClimber::new(self.config.search),
        );
        TemplateGenerator::new(
            finder,
            self.config.max_test_template_size,
            self.config.min_required_effect_size,
        )
    }

    /// Generate the test template for one fault.
    pub fn test_template(
        &self,
        fault: &dyn Fault,
        initial_state: &Statevector,
        kind: ActivationKind,
    ) -> QatgResult<TestTemplate> {
        self.check_kind(kind)?;
        check_fault_contract(fault, kind.num_qubits())?;
        validate_initial_state(initial_state, kind.num_qubits())?;
        self.generator().generate(fault, kind, initial_state)
    }

    /// Generate templates for every fault.
    ///
    /// All faults are checked against the fault contract before any
    /// template is generated. Results are in input order, single-qubit
    /// faults first.
    pub fn test_configuration(
        &self,
        single_faults: &[Box<dyn Fault>],
        two_faults: &[Box<dyn Fault>],
        single_initial_state: &Statevector,
        two_initial_state: &Statevector,
    ) -> QatgResult<Vec<TestConfiguration>> {
        self.test_configuration_with(
            single_faults,
            two_faults,
            single_initial_state,
            two_initial_state,
            |_| {},
        )
    }

    /// [`Qatg::test_configuration`], calling `on_done` after each fault.
    pub fn test_configuration_with<F>(
        &self,
        single_faults: &[Box<dyn Fault>],
        two_faults: &[Box<dyn Fault>],
        single_initial_state: &Statevector,
        two_initial_state: &Statevector,
        mut on_done: F,
    ) -> QatgResult<Vec<TestConfiguration>>
    where
        F: FnMut(&TestConfiguration),
    {
        let batches = [
            (ActivationKind::Single, single_faults, single_initial_state),
            (ActivationKind::Two, two_faults, two_initial_state),
        ];

        for (kind, faults, initial_state) in batches {
            if faults.is_empty() {
                continue;
            }
            self.check_kind(kind)?;
            validate_initial_state(initial_state, kind.num_qubits())?;
            for fault in faults {
                check_fault_contract(fault.as_ref(), kind.num_qubits())?;
            }
        }
        debug!(
            single = single_faults.len(),
            two = two_faults.len(),
            "fault contracts checked"
        );

        let generator = self.generator();
        let mut configurations = Vec::with_capacity(single_faults.len() + two_faults.len());
        for (kind, faults, initial_state) in batches {
            for fault in faults {
                let template = generator.generate(fault.as_ref(), kind, initial_state)?;
                info!(
                    fault = fault.name(),
                    %kind,
                    state = %template.state,
                    elements = template.len(),
                    effect_size = template.effect_size,
                    "generated test template"
                );
                let configuration = TestConfiguration {
                    fault: fault.name().to_string(),
                    kind,
                    template,
                    target_alpha: self.config.target_alpha,
                    target_beta: self.config.target_beta,
                    test_sample_time: self.config.test_sample_time,
                };
                on_done(&configuration);
                configurations.push(configuration);
            }
        }
        Ok(configurations)
    }

    fn check_kind(&self, kind: ActivationKind) -> QatgResult<()> {
        if kind.num_qubits() > self.config.circuit_size {
            return Err(QatgError::InvalidConfig(format!(
                "{kind}-qubit faults need at least {} qubits, circuit_size is {}",
                kind.num_qubits(),
                self.config.circuit_size
            )));
        }
        Ok(())
    }
}

/// Check that `state` is a finite, unit-norm state on `num_qubits` qubits.
pub fn validate_initial_state(state: &Statevector, num_qubits: u32) -> QatgResult<()> {
    if state.num_qubits() != num_qubits {
        return Err(QatgError::InvalidInitialState(format!(
            "expected {} amplitudes, got {}",
            1usize << num_qubits,
            state.dim()
        )));
    }
    if !state.is_finite() {
        return Err(QatgError::InvalidInitialState(
            "amplitudes must be finite".into(),
        ));
    }
    let norm = state.norm();
    if (norm - 1.0).abs() > NORM_TOLERANCE {
        return Err(QatgError::InvalidInitialState(format!(
            "state must be normalized, norm is {norm}"
        )));
    }
    Ok(())
}
