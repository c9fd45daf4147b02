//! Fault models.
//!
//! A fault attaches to one gate type. During the activation search every
//! gate of that type, whether it is the target gate or part of a synthesized
//! activation sequence, is replaced by the matrix returned from
//! [`Fault::faulty_matrix`] for that gate's own parameters.
//!
//! Three parameterized models are provided and can be built from
//! configuration through [`FaultSpec`]:
//!
//! | Model | Faulty matrix |
//! |-------|---------------|
//! | [`BiasFault`] | gate with `param_i + bias_i` |
//! | [`RatioFault`] | gate with `param_i * ratio_i` |
//! | [`OverRotationFault`] | two-qubit gate followed by an unwanted rotation on one qubit |

use std::fmt;

use qatg_ir::{GateMatrix, GateType, StandardGate, Unitary2x2, Unitary4x4};
use serde::{Deserialize, Serialize};

use crate::error::{QatgError, QatgResult};

/// Tolerance used when checking that a faulty matrix is unitary.
pub const UNITARY_TOLERANCE: f64 = 1e-8;

/// A hypothesized defect of one gate type.
///
/// Implementations must be pure: the same parameters always give the same
/// faulty matrix.
pub trait Fault: Send + Sync + fmt::Debug {
    /// Human-readable name used in logs and reports.
    fn name(&self) -> &str;

    /// Gate type the fault attaches to.
    fn gate_type(&self) -> GateType;

    /// The nominal target gate.
    fn original_gate(&self) -> StandardGate;

    /// Parameters of the nominal target gate.
    fn original_parameters(&self) -> Vec<f64> {
        self.original_gate().params()
    }

    /// Faulty matrix for a gate of the attached type with `params`.
    fn faulty_matrix(&self, params: &[f64]) -> QatgResult<GateMatrix>;
}

/// Check that `fault` can be used for `num_qubits`-qubit templates.
///
/// The attached gate must act on `num_qubits` qubits, the original gate must
/// be of the attached type, and the faulty matrix of the original gate must
/// be a unitary of matching dimension.
pub fn check_fault_contract(fault: &dyn Fault, num_qubits: u32) -> QatgResult<()> {
    let gate_type = fault.gate_type();
    if gate_type.num_qubits() != num_qubits {
        return Err(QatgError::fault_contract(
            fault.name(),
            format!(
                "attached gate '{gate_type}' acts on {} qubit(s), expected {num_qubits}",
                gate_type.num_qubits()
            ),
        ));
    }

    let original = fault.original_gate();
    if original.gate_type() != gate_type {
        return Err(QatgError::fault_contract(
            fault.name(),
            format!("original gate '{original}' is not of attached type '{gate_type}'"),
        ));
    }

    let params = fault.original_parameters();
    if params.len() != gate_type.num_params() {
        return Err(QatgError::fault_contract(
            fault.name(),
            format!(
                "{} original parameter(s) for '{gate_type}', expected {}",
                params.len(),
                gate_type.num_params()
            ),
        ));
    }

    let faulty = fault.faulty_matrix(&params)?;
    let dim = 1usize << num_qubits;
    if faulty.dim() != dim {
        return Err(QatgError::fault_contract(
            fault.name(),
            format!("faulty matrix is {0}x{0}, expected {dim}x{dim}", faulty.dim()),
        ));
    }
    if !faulty.is_unitary(UNITARY_TOLERANCE) {
        return Err(QatgError::fault_contract(
            fault.name(),
            "faulty matrix is not unitary",
        ));
    }
    Ok(())
}

fn check_len(name: &str, what: &str, values: &[f64], gate_type: GateType) -> QatgResult<()> {
    if values.len() != gate_type.num_params() {
        return Err(QatgError::fault_contract(
            name,
            format!(
                "{what} has {} value(s), gate '{gate_type}' takes {}",
                values.len(),
                gate_type.num_params()
            ),
        ));
    }
    Ok(())
}

/// Adds a constant bias to every parameter of the gate.
#[derive(Debug, Clone, PartialEq)]
pub struct BiasFault {
    name: String,
    gate: StandardGate,
    bias: Vec<f64>,
}

impl BiasFault {
    /// Create a bias fault. `bias` needs one entry per gate parameter.
    pub fn new(name: impl Into<String>, gate: StandardGate, bias: Vec<f64>) -> QatgResult<Self> {
        let name = name.into();
        check_len(&name, "bias", &bias, gate.gate_type())?;
        Ok(Self { name, gate, bias })
    }

    /// The per-parameter bias.
    pub fn bias(&self) -> &[f64] {
        &self.bias
    }
}

impl Fault for BiasFault {
    fn name(&self) -> &str {
        &self.name
    }

    fn gate_type(&self) -> GateType {
        self.gate.gate_type()
    }

    fn original_gate(&self) -> StandardGate {
        self.gate
    }

    fn faulty_matrix(&self, params: &[f64]) -> QatgResult<GateMatrix> {
        let shifted: Vec<f64> = params.iter().zip(&self.bias).map(|(p, b)| p + b).collect();
        Ok(self.gate_type().with_params(&shifted)?.matrix())
    }
}

/// Scales every parameter of the gate.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioFault {
    name: String,
    gate: StandardGate,
    ratio: Vec<f64>,
}

impl RatioFault {
    /// Create a ratio fault. `ratio` needs one entry per gate parameter.
    pub fn new(name: impl Into<String>, gate: StandardGate, ratio: Vec<f64>) -> QatgResult<Self> {
        let name = name.into();
        check_len(&name, "ratio", &ratio, gate.gate_type())?;
        Ok(Self { name, gate, ratio })
    }

    /// The per-parameter scale factor.
    pub fn ratio(&self) -> &[f64] {
        &self.ratio
    }
}

impl Fault for RatioFault {
    fn name(&self) -> &str {
        &self.name
    }

    fn gate_type(&self) -> GateType {
        self.gate.gate_type()
    }

    fn original_gate(&self) -> StandardGate {
        self.gate
    }

    fn faulty_matrix(&self, params: &[f64]) -> QatgResult<GateMatrix> {
        let scaled: Vec<f64> = params.iter().zip(&self.ratio).map(|(p, r)| p * r).collect();
        Ok(self.gate_type().with_params(&scaled)?.matrix())
    }
}

/// Rotation axis of an [`OverRotationFault`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationAxis {
    X,
    Y,
    Z,
}

impl RotationAxis {
    /// Rotation by `angle` about this axis.
    pub fn rotation(&self, angle: f64) -> Unitary2x2 {
        match self {
            RotationAxis::X => Unitary2x2::rx(angle),
            RotationAxis::Y => Unitary2x2::ry(angle),
            RotationAxis::Z => Unitary2x2::rz(angle),
        }
    }
}

/// A two-qubit gate followed by an unwanted rotation on one of its qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct OverRotationFault {
    name: String,
    gate: StandardGate,
    axis: RotationAxis,
    angle: f64,
    qubit: u8,
}

impl OverRotationFault {
    /// Create an over-rotation fault. `qubit` is 0 for the first qubit of
    /// the gate and 1 for the second.
    pub fn new(
        name: impl Into<String>,
        gate: StandardGate,
        axis: RotationAxis,
        angle: f64,
        qubit: u8,
    ) -> QatgResult<Self> {
        let name = name.into();
        if gate.num_qubits() != 2 {
            return Err(QatgError::fault_contract(
                name,
                format!("over-rotation needs a two-qubit gate, got '{gate}'"),
            ));
        }
        if qubit > 1 {
            return Err(QatgError::fault_contract(
                name,
                format!("qubit must be 0 or 1, got {qubit}"),
            ));
        }
        Ok(Self {
            name,
            gate,
            axis,
            angle,
            qubit,
        })
    }
}

impl Fault for OverRotationFault {
    fn name(&self) -> &str {
        &self.name
    }

    fn gate_type(&self) -> GateType {
        self.gate.gate_type()
    }

    fn original_gate(&self) -> StandardGate {
        self.gate
    }

    fn faulty_matrix(&self, params: &[f64]) -> QatgResult<GateMatrix> {
        let nominal = match self.gate_type().with_params(params)?.matrix() {
            GateMatrix::Two(u) => u,
            GateMatrix::Single(_) => {
                return Err(QatgError::fault_contract(
                    &self.name,
                    "over-rotation attached to a single-qubit gate",
                ));
            }
        };
        let rotation = self.axis.rotation(self.angle);
        let identity = Unitary2x2::identity();
        let layer = if self.qubit == 0 {
            Unitary4x4::kron(&rotation, &identity)
        } else {
            Unitary4x4::kron(&identity, &rotation)
        };
        Ok((layer * nominal).into())
    }
}

fn default_qubit() -> u8 {
    1
}

/// Serializable description of a fault, as found in run files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FaultSpec {
    /// See [`BiasFault`].
    Bias {
        name: String,
        gate: GateType,
        #[serde(default)]
        params: Vec<f64>,
        bias: Vec<f64>,
    },
    /// See [`RatioFault`].
    Ratio {
        name: String,
        gate: GateType,
        #[serde(default)]
        params: Vec<f64>,
        ratio: Vec<f64>,
    },
    /// See [`OverRotationFault`].
    TwoQubitOverRotation {
        name: String,
        gate: GateType,
        axis: RotationAxis,
        angle: f64,
        #[serde(default = "default_qubit")]
        qubit: u8,
    },
}

impl FaultSpec {
    /// Name of the described fault.
    pub fn name(&self) -> &str {
        match self {
            FaultSpec::Bias { name, .. }
            | FaultSpec::Ratio { name, .. }
            | FaultSpec::TwoQubitOverRotation { name, .. } => name,
        }
    }

    /// Instantiate the fault.
    pub fn build(&self) -> QatgResult<Box<dyn Fault>> {
        let fault: Box<dyn Fault> = match self {
            FaultSpec::Bias {
                name,
                gate,
                params,
                bias,
            } => Box::new(BiasFault::new(
                name.clone(),
                gate.with_params(params)?,
                bias.clone(),
            )?),
            FaultSpec::Ratio {
                name,
                gate,
                params,
                ratio,
            } => Box::new(RatioFault::new(
                name.clone(),
                gate.with_params(params)?,
                ratio.clone(),
            )?),
            FaultSpec::TwoQubitOverRotation {
                name,
                gate,
                axis,
                angle,
                qubit,
            } => Box::new(OverRotationFault::new(
                name.clone(),
                gate.with_params(&[])?,
                *axis,
                *angle,
                *qubit,
            )?),
        };
        Ok(fault)
    }
}
