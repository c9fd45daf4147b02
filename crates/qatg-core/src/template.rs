//! Template growth.
//!
//! A template is grown one element at a time. After every element the
//! effect size is recomputed from the freshest faulty/fault-free pair; the
//! template is finished once it clears the threshold or reaches the length
//! cap.

use std::fmt;

use qatg_ir::{Instruction, Statevector};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::activation::{ActivationFinder, ActivationKind};
use crate::effect::effect_size;
use crate::error::QatgResult;
use crate::fault::Fault;

/// One unit of test stimulus: activation gates followed by the target gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateElement {
    /// Synthesized activation gates, in application order.
    pub activation: Vec<Instruction>,
    /// The nominal target gate.
    pub target: Instruction,
    /// Rotation parameters the activation gates were synthesized from.
    pub rotation: Vec<f64>,
}

impl TemplateElement {
    /// Number of instructions, target included.
    pub fn len(&self) -> usize {
        self.activation.len() + 1
    }

    /// Always false; an element holds at least its target gate.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Instructions in application order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.activation.iter().chain(std::iter::once(&self.target))
    }
}

/// Where template growth stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationState {
    /// Still appending elements.
    Growing,
    /// The effect size cleared the threshold.
    Converged,
    /// The length cap was reached first.
    Capped,
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationState::Growing => f.pad("growing"),
            GenerationState::Converged => f.pad("converged"),
            GenerationState::Capped => f.pad("capped"),
        }
    }
}

/// A finished test template for one fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestTemplate {
    /// Elements in application order.
    pub elements: Vec<TemplateElement>,
    /// Terminal state, `Converged` or `Capped`.
    pub state: GenerationState,
    /// Effect size after the last element.
    pub effect_size: f64,
    /// Faulty state after the last element.
    pub faulty_state: Statevector,
    /// Fault-free state after the last element.
    pub faultfree_state: Statevector,
}

impl TestTemplate {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the template has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether the effect-size threshold was met.
    pub fn converged(&self) -> bool {
        self.state == GenerationState::Converged
    }

    /// All instructions of all elements in application order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.elements.iter().flat_map(|element| element.instructions())
    }

    /// Total number of gates.
    pub fn num_gates(&self) -> usize {
        self.elements.iter().map(TemplateElement::len).sum()
    }
}

/// Grows templates element by element.
pub struct TemplateGenerator<'a> {
    finder: ActivationFinder<'a>,
    max_size: usize,
    min_effect_size: f64,
}

impl<'a> TemplateGenerator<'a> {
    /// Create a generator that stops after `max_size` elements or once the
    /// effect size exceeds `min_effect_size`. A `max_size` of zero yields
    /// empty, capped templates.
    pub fn new(finder: ActivationFinder<'a>, max_size: usize, min_effect_size: f64) -> Self {
        Self {
            finder,
            max_size,
            min_effect_size,
        }
    }

    /// Grow a template for `fault` starting from `initial_state`.
    pub fn generate(
        &self,
        fault: &dyn Fault,
        kind: ActivationKind,
        initial_state: &Statevector,
    ) -> QatgResult<TestTemplate> {
        let mut faulty = initial_state.clone();
        let mut faultfree = initial_state.clone();
        let mut elements = Vec::new();
        let mut effect = effect_size(&faulty, &faultfree)?;
        let mut state = if self.max_size == 0 {
            GenerationState::Capped
        } else {
            GenerationState::Growing
        };

        while state == GenerationState::Growing {
            let outcome = self.finder.find(fault, kind, &faulty, &faultfree)?;
            (faulty, faultfree) = (outcome.faulty_state, outcome.faultfree_state);
            elements.push(outcome.element);

            effect = effect_size(&faulty, &faultfree)?;
            state = if effect > self.min_effect_size {
                GenerationState::Converged
            } else if elements.len() >= self.max_size {
                GenerationState::Capped
            } else {
                GenerationState::Growing
            };
            trace!(
                fault = fault.name(),
                element = elements.len(),
                effect_size = effect,
                score = outcome.search.score,
                "appended element"
            );
        }

        debug!(
            fault = fault.name(),
            %state,
            elements = elements.len(),
            effect_size = effect,
            "template finished"
        );

        Ok(TestTemplate {
            elements,
            state,
            effect_size: effect,
            faulty_state: faulty,
            faultfree_state: faultfree,
        })
    }
}
