//! End-to-end template generation tests.

use std::f64::consts::PI;

use qatg_core::{
    ActivationKind, BiasFault, Fault, GenerationState, OverRotationFault, Qatg, QatgConfig,
    QatgError, QatgResult, RotationAxis, SearchConfig,
};
use qatg_ir::{GateMatrix, GateType, StandardGate, Statevector, Unitary2x2};
use qatg_synth::BasisGates;
use num_complex::Complex64;

fn small_search() -> SearchConfig {
    SearchConfig {
        grid_slices: 5,
        max_rounds: 20,
        step: 0.01,
    }
}

fn qatg(basis: BasisGates, max_size: usize, min_effect: f64) -> Qatg {
    let config = QatgConfig::new(2)
        .with_basis_gates(basis)
        .with_search(small_search())
        .with_stopping(max_size, min_effect);
    Qatg::new(config).unwrap()
}

/// X gate whose faulty version is `-X`.
#[derive(Debug)]
struct NegatedX;

impl Fault for NegatedX {
    fn name(&self) -> &str {
        "negated-x"
    }

    fn gate_type(&self) -> GateType {
        GateType::X
    }

    fn original_gate(&self) -> StandardGate {
        StandardGate::X
    }

    fn faulty_matrix(&self, _params: &[f64]) -> QatgResult<GateMatrix> {
        let (zero, minus_one) = (Complex64::new(0.0, 0.0), Complex64::new(-1.0, 0.0));
        Ok(Unitary2x2::new(zero, minus_one, minus_one, zero).into())
    }
}

/// Rz gate whose faulty matrix is undefined away from its nominal angle.
#[derive(Debug)]
struct UnstableRz;

impl Fault for UnstableRz {
    fn name(&self) -> &str {
        "unstable-rz"
    }

    fn gate_type(&self) -> GateType {
        GateType::Rz
    }

    fn original_gate(&self) -> StandardGate {
        StandardGate::Rz(0.5)
    }

    fn faulty_matrix(&self, params: &[f64]) -> QatgResult<GateMatrix> {
        if params == [0.5] {
            Ok(StandardGate::Rz(0.5).matrix())
        } else {
            Ok(Unitary2x2::rz(f64::NAN).into())
        }
    }
}

fn boxed(fault: impl Fault + 'static) -> Box<dyn Fault> {
    Box::new(fault)
}

#[test]
fn test_generation_is_deterministic() {
    let generator = qatg(BasisGates::ibm(), 3, 3.0);
    let fault = BiasFault::new("rz-bias", StandardGate::Rz(0.9), vec![0.2]).unwrap();
    let zero = Statevector::zero(1).unwrap();

    let first = generator.test_template(&fault, &zero, ActivationKind::Single).unwrap();
    let second = generator.test_template(&fault, &zero, ActivationKind::Single).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_noop_fault_is_capped() {
    let generator = qatg(BasisGates::u3(), 6, 3.0);
    let gate = StandardGate::U(0.7, -0.3, 1.1);
    let fault = BiasFault::new("noop", gate, vec![0.0; 3]).unwrap();
    let zero = Statevector::zero(1).unwrap();

    let template = generator.test_template(&fault, &zero, ActivationKind::Single).unwrap();
    assert_eq!(template.state, GenerationState::Capped);
    assert_eq!(template.len(), 6);
    assert_eq!(template.effect_size, 0.1);
    assert_eq!(template.faulty_state, template.faultfree_state);
}

#[test]
fn test_flat_search_keeps_rotation_in_range() {
    let config = QatgConfig::new(1)
        .with_basis_gates(BasisGates::u3())
        .with_search(SearchConfig {
            grid_slices: 5,
            max_rounds: 800,
            step: 0.01,
        })
        .with_stopping(1, 3.0);
    let generator = Qatg::new(config).unwrap();
    let fault = BiasFault::new("noop", StandardGate::U(0.3, 0.1, 0.2), vec![0.0; 3]).unwrap();
    let zero = Statevector::zero(1).unwrap();

    let template = generator.test_template(&fault, &zero, ActivationKind::Single).unwrap();
    let rotation = &template.elements[0].rotation;
    assert_eq!(rotation.len(), 3);
    assert!(rotation.iter().all(|p| (-PI..=PI).contains(p)), "{rotation:?}");
}

#[test]
fn test_negated_gate_converges_immediately() {
    let generator = qatg(BasisGates::u3(), 10, 1.5);
    let zero = Statevector::zero(1).unwrap();

    let template = generator.test_template(&NegatedX, &zero, ActivationKind::Single).unwrap();
    assert_eq!(template.state, GenerationState::Converged);
    assert_eq!(template.len(), 1);
    assert!(template.effect_size >= 2.0 - 1e-9);

    let element = &template.elements[0];
    assert_eq!(element.activation.len(), 1);
    assert_eq!(element.target.gate, StandardGate::X);
}

#[test]
fn test_terminal_state_matches_length() {
    let generator = qatg(BasisGates::ibm(), 4, 0.5);
    let fault = BiasFault::new("rz-bias", StandardGate::Rz(0.4), vec![0.05]).unwrap();
    let plus = Statevector::from_real(&[1.0 / 2f64.sqrt(), 1.0 / 2f64.sqrt()]).unwrap();

    let template = generator.test_template(&fault, &plus, ActivationKind::Single).unwrap();
    match template.state {
        GenerationState::Converged => {
            assert!(template.effect_size > 0.5);
            assert!(template.len() <= 4);
        }
        GenerationState::Capped => assert_eq!(template.len(), 4),
        GenerationState::Growing => panic!("template returned while growing"),
    }
    assert!((template.faulty_state.norm() - 1.0).abs() < 1e-9);
    assert!((template.faultfree_state.norm() - 1.0).abs() < 1e-9);
}

#[test]
fn test_two_qubit_fault() {
    let generator = qatg(BasisGates::ibm(), 2, 3.0);
    let fault = OverRotationFault::new("cx-flip", StandardGate::CX, RotationAxis::X, PI / 2.0, 1)
        .unwrap();
    let zero = Statevector::zero(2).unwrap();

    let template = generator.test_template(&fault, &zero, ActivationKind::Two).unwrap();
    assert!(!template.is_empty());
    let element = &template.elements[0];
    assert_eq!(element.activation.len(), 10);
    assert_eq!(element.target.gate, StandardGate::CX);
    assert!(template.effect_size > 0.1);
}

#[test]
fn test_configuration_runs_every_fault() {
    let generator = qatg(BasisGates::u3(), 2, 1.5);
    let singles = vec![
        boxed(NegatedX),
        boxed(BiasFault::new("noop", StandardGate::Ry(0.3), vec![0.0]).unwrap()),
    ];
    let twos = vec![boxed(
        OverRotationFault::new("cx-drift", StandardGate::CX, RotationAxis::Z, 0.3, 0).unwrap(),
    )];

    let mut seen = Vec::new();
    let configurations = generator
        .test_configuration_with(
            &singles,
            &twos,
            &Statevector::zero(1).unwrap(),
            &Statevector::zero(2).unwrap(),
            |c| seen.push(c.fault.clone()),
        )
        .unwrap();

    assert_eq!(seen, vec!["negated-x", "noop", "cx-drift"]);
    assert_eq!(configurations.len(), 3);
    assert_eq!(configurations[0].state(), GenerationState::Converged);
    assert_eq!(configurations[1].state(), GenerationState::Capped);
    assert_eq!(configurations[2].kind, ActivationKind::Two);
    assert!((configurations[0].target_beta - 0.999).abs() < 1e-15);
}

#[test]
fn test_contract_violation_stops_before_generation() {
    let generator = qatg(BasisGates::u3(), 2, 3.0);
    let singles = vec![
        boxed(NegatedX),
        boxed(OverRotationFault::new("cx-in-wrong-list", StandardGate::CX, RotationAxis::X, 0.1, 1).unwrap()),
    ];

    let mut calls = 0;
    let err = generator
        .test_configuration_with(
            &singles,
            &[],
            &Statevector::zero(1).unwrap(),
            &Statevector::zero(2).unwrap(),
            |_| calls += 1,
        )
        .unwrap_err();

    assert!(matches!(err, QatgError::FaultContract { ref fault, .. } if fault == "cx-in-wrong-list"));
    assert_eq!(calls, 0);
}

#[test]
fn test_two_qubit_fault_needs_two_qubits() {
    let config = QatgConfig::new(1).with_search(small_search());
    let generator = Qatg::new(config).unwrap();
    let fault = OverRotationFault::new("cx", StandardGate::CX, RotationAxis::Y, 0.2, 1).unwrap();
    let err = generator
        .test_template(&fault, &Statevector::zero(2).unwrap(), ActivationKind::Two)
        .unwrap_err();
    assert!(matches!(err, QatgError::InvalidConfig(_)));
}

#[test]
fn test_invalid_initial_state() {
    let generator = qatg(BasisGates::u3(), 2, 3.0);
    let unnormalized = Statevector::from_real(&[1.0, 1.0]).unwrap();
    let err = generator
        .test_template(&NegatedX, &unnormalized, ActivationKind::Single)
        .unwrap_err();
    assert!(matches!(err, QatgError::InvalidInitialState(_)));
}

#[test]
fn test_non_finite_score_propagates() {
    let generator = qatg(BasisGates::ibm(), 2, 3.0);
    let err = generator
        .test_template(&UnstableRz, &Statevector::zero(1).unwrap(), ActivationKind::Single)
        .unwrap_err();
    assert!(matches!(err, QatgError::NonFiniteScore { .. }));
}
