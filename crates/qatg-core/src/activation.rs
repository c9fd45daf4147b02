//! Activation gate search.
//!
//! An activation finder turns the current pair of states and a fault into
//! one template element: it searches rotation parameters that push the
//! faulty and fault-free states furthest apart once the target gate has
//! been applied, synthesizes the winning rotation, and returns the element
//! together with the propagated states.

use qatg_ir::{
    GateMatrix, Instruction, IrError, QubitId, StandardGate, Statevector, Unitary2x2, Unitary4x4,
};
use qatg_synth::{GateSynthesizer, RotationParams, sequence_unitary};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QatgError, QatgResult};
use crate::fault::Fault;
use crate::optimizer::{GridHillClimber, SearchOutcome};
use crate::template::TemplateElement;

/// Which search strategy applies to a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationKind {
    /// Fault on a single-qubit gate; one rotation before the target.
    Single,
    /// Fault on a two-qubit gate; one rotation per qubit before the target.
    Two,
}

impl ActivationKind {
    /// Number of qubits the templates act on.
    pub fn num_qubits(&self) -> u32 {
        match self {
            ActivationKind::Single => 1,
            ActivationKind::Two => 2,
        }
    }

    /// Parameter block sizes handed to the optimizer.
    pub fn blocks(&self) -> &'static [usize] {
        match self {
            ActivationKind::Single => &[3],
            ActivationKind::Two => &[3, 3],
        }
    }
}

impl std::fmt::Display for ActivationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivationKind::Single => f.pad("single"),
            ActivationKind::Two => f.pad("two"),
        }
    }
}

/// A new template element and the states after it.
#[derive(Debug, Clone)]
pub struct ActivationOutcome {
    /// The element to append.
    pub element: TemplateElement,
    /// Faulty state after the element.
    pub faulty_state: Statevector,
    /// Fault-free state after the element.
    pub faultfree_state: Statevector,
    /// Optimizer result for the element's rotation parameters.
    pub search: SearchOutcome,
}

/// Searches activation gates for one element at a time.
pub struct ActivationFinder<'a> {
    synthesizer: &'a dyn GateSynthesizer,
    optimizer: GridHillClimber,
}

impl<'a> ActivationFinder<'a> {
    /// Create a finder.
    pub fn new(synthesizer: &'a dyn GateSynthesizer, optimizer: GridHillClimber) -> Self {
        Self {
            synthesizer,
            optimizer,
        }
    }

    /// Find the next element for `fault`.
    pub fn find(
        &self,
        fault: &dyn Fault,
        kind: ActivationKind,
        faulty: &Statevector,
        faultfree: &Statevector,
    ) -> QatgResult<ActivationOutcome> {
        let target = Target::new(fault)?;
        let propagate = |params: &[f64]| match kind {
            ActivationKind::Single => self.propagate_single(fault, &target, params, faulty, faultfree),
            ActivationKind::Two => self.propagate_two(&target, params, faulty, faultfree),
        };

        let search = self.optimizer.maximize(kind.blocks(), |params: &[f64]| -> QatgResult<f64> {
            let (f, g) = propagate(params)?;
            let distance = f.distance(&g)?;
            if !distance.is_finite() {
                return Err(QatgError::NonFiniteScore {
                    score: distance,
                    params: params.to_vec(),
                });
            }
            Ok(distance)
        })?;

        let (faulty_state, faultfree_state) = propagate(&search.params)?;
        let element = match kind {
            ActivationKind::Single => self.single_element(fault, &search.params)?,
            ActivationKind::Two => self.two_element(fault, &search.params)?,
        };
        debug!(
            fault = fault.name(),
            %kind,
            score = search.score,
            rounds = search.rounds,
            gates = element.len(),
            "found activation"
        );

        Ok(ActivationOutcome {
            element,
            faulty_state,
            faultfree_state,
            search,
        })
    }

    fn synthesize(&self, params: &[f64]) -> QatgResult<Vec<StandardGate>> {
        Ok(self.synthesizer.synthesize(rotation(params))?)
    }

    /// Propagate both states through one single-qubit element with rotation
    /// `params`. Every gate of the fault's type is faulty on the faulty side.
    fn propagate_single(
        &self,
        fault: &dyn Fault,
        target: &Target,
        params: &[f64],
        faulty: &Statevector,
        faultfree: &Statevector,
    ) -> QatgResult<(Statevector, Statevector)> {
        let gates = self.synthesize(params)?;

        let mut nominal: Vec<GateMatrix> = gates.iter().map(StandardGate::matrix).collect();
        nominal.push(target.nominal);

        let mut substituted = gates
            .iter()
            .map(|gate| {
                if gate.gate_type() == fault.gate_type() {
                    fault.faulty_matrix(&gate.params())
                } else {
                    Ok(gate.matrix())
                }
            })
            .collect::<QatgResult<Vec<_>>>()?;
        substituted.push(target.faulty);

        Ok((faulty.apply(&substituted)?, faultfree.apply(&nominal)?))
    }

    /// Propagate both states through `kron(upper, lower)` followed by the
    /// two-qubit target. Only the target is faulty.
    fn propagate_two(
        &self,
        target: &Target,
        params: &[f64],
        faulty: &Statevector,
        faultfree: &Statevector,
    ) -> QatgResult<(Statevector, Statevector)> {
        let upper = self.composed(&params[..3])?;
        let lower = self.composed(&params[3..])?;
        let layer = GateMatrix::Two(Unitary4x4::kron(&upper, &lower));
        Ok((
            faulty.apply([&layer, &target.faulty])?,
            faultfree.apply([&layer, &target.nominal])?,
        ))
    }

    fn composed(&self, params: &[f64]) -> QatgResult<Unitary2x2> {
        let gates = self.synthesize(params)?;
        sequence_unitary(&gates).ok_or_else(|| {
            QatgError::from(IrError::DimensionMismatch {
                gate_dim: 4,
                state_dim: 2,
            })
        })
    }

    fn single_element(&self, fault: &dyn Fault, params: &[f64]) -> QatgResult<TemplateElement> {
        let q = QubitId(0);
        let activation = self
            .synthesize(params)?
            .into_iter()
            .map(|gate| Instruction::single_qubit_gate(gate, q))
            .collect();
        Ok(TemplateElement {
            activation,
            target: Instruction::single_qubit_gate(fault.original_gate(), q),
            rotation: params.to_vec(),
        })
    }

    fn two_element(&self, fault: &dyn Fault, params: &[f64]) -> QatgResult<TemplateElement> {
        let (q0, q1) = (QubitId(0), QubitId(1));
        let mut activation: Vec<Instruction> = self
            .synthesize(&params[..3])?
            .into_iter()
            .map(|gate| Instruction::single_qubit_gate(gate, q0))
            .collect();
        activation.extend(
            self.synthesize(&params[3..])?
                .into_iter()
                .map(|gate| Instruction::single_qubit_gate(gate, q1)),
        );
        Ok(TemplateElement {
            activation,
            target: Instruction::two_qubit_gate(fault.original_gate(), q0, q1),
            rotation: params.to_vec(),
        })
    }
}

/// Nominal and faulty matrices of the target gate.
struct Target {
    nominal: GateMatrix,
    faulty: GateMatrix,
}

impl Target {
    fn new(fault: &dyn Fault) -> QatgResult<Self> {
        Ok(Self {
            nominal: fault.original_gate().matrix(),
            faulty: fault.faulty_matrix(&fault.original_parameters())?,
        })
    }
}

fn rotation(params: &[f64]) -> RotationParams {
    [params[0], params[1], params[2]]
}
