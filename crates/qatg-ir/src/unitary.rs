//! Dense unitary matrices for one- and two-qubit gates.
//!
//! Matrices are stored row-major in fixed-size arrays. Two-qubit matrices
//! treat the first qubit of the pair as the most significant index bit, so
//! `|q0 q1⟩` maps to index `2 * q0 + q1` and a layer of independent
//! single-qubit gates is `Unitary4x4::kron(&upper, &lower)`.

use num_complex::Complex64;
use std::f64::consts::PI;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        Self::new(ONE, ZERO, ZERO, ONE)
    }

    /// Create a Hadamard matrix.
    pub fn h() -> Self {
        let s = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        Self::new(s, s, s, -s)
    }

    /// Create a Pauli-X matrix.
    pub fn x() -> Self {
        Self::new(ZERO, ONE, ONE, ZERO)
    }

    /// Create a Pauli-Y matrix.
    pub fn y() -> Self {
        Self::new(ZERO, Complex64::new(0.0, -1.0), Complex64::new(0.0, 1.0), ZERO)
    }

    /// Create a Pauli-Z matrix.
    pub fn z() -> Self {
        Self::new(ONE, ZERO, ZERO, -ONE)
    }

    /// Create an SX gate (sqrt(X)).
    pub fn sx() -> Self {
        let half = Complex64::new(0.5, 0.0);
        let half_i = Complex64::new(0.0, 0.5);
        Self::new(half + half_i, half - half_i, half - half_i, half + half_i)
    }

    /// Create an SX-dagger gate.
    pub fn sxdg() -> Self {
        Self::sx().dagger()
    }

    /// Create an RX rotation matrix.
    pub fn rx(theta: f64) -> Self {
        let c = Complex64::new((theta / 2.0).cos(), 0.0);
        let s = Complex64::new(0.0, -(theta / 2.0).sin());
        Self::new(c, s, s, c)
    }

    /// Create an RY rotation matrix.
    pub fn ry(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(-s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(c, 0.0),
        )
    }

    /// Create an RZ rotation matrix.
    pub fn rz(theta: f64) -> Self {
        Self::new(
            Complex64::from_polar(1.0, -theta / 2.0),
            ZERO,
            ZERO,
            Complex64::from_polar(1.0, theta / 2.0),
        )
    }

    /// Create a phase gate P(lambda).
    pub fn p(lambda: f64) -> Self {
        Self::new(ONE, ZERO, ZERO, Complex64::from_polar(1.0, lambda))
    }

    /// Create a U gate U(theta, phi, lambda).
    pub fn u(theta: f64, phi: f64, lambda: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda),
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        )
    }

    /// Multiply this matrix by another: self * other.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Check `U · U† ≈ I` within `tol`.
    pub fn is_unitary(&self, tol: f64) -> bool {
        let product = self.mul(&self.dagger());
        product
            .data
            .iter()
            .zip(Self::identity().data.iter())
            .all(|(got, want)| (got - want).norm() < tol)
    }

    /// Check whether `self = e^{iα} · other` for some global phase `α`.
    pub fn approx_eq_up_to_phase(&self, other: &Self, tol: f64) -> bool {
        let pivot = (0..4)
            .max_by(|&i, &j| other.data[i].norm().total_cmp(&other.data[j].norm()))
            .unwrap_or(0);
        if other.data[pivot].norm() < tol {
            return false;
        }
        let phase = self.data[pivot] / other.data[pivot];
        if (phase.norm() - 1.0).abs() > tol {
            return false;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - phase * b).norm() < tol)
    }

    /// Wrap an angle into [-π, π]. Non-finite angles map to zero.
    pub fn normalize_angle(angle: f64) -> f64 {
        if !angle.is_finite() {
            return 0.0;
        }
        let mut a = angle.rem_euclid(2.0 * PI);
        if a > PI {
            a -= 2.0 * PI;
        }
        a
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}

/// A 4x4 two-qubit unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary4x4 {
    /// Row-major elements, `data[4 * row + col]`.
    pub data: [Complex64; 16],
}

impl Unitary4x4 {
    /// Create the identity matrix.
    pub fn identity() -> Self {
        Self::permutation([0, 1, 2, 3])
    }

    /// Permutation matrix sending basis state `i` to `perm[i]`.
    fn permutation(perm: [usize; 4]) -> Self {
        let mut data = [ZERO; 16];
        for (col, &row) in perm.iter().enumerate() {
            data[4 * row + col] = ONE;
        }
        Self { data }
    }

    /// CNOT with the first qubit as control.
    pub fn cx() -> Self {
        Self::permutation([0, 1, 3, 2])
    }

    /// Controlled-Z.
    pub fn cz() -> Self {
        let mut m = Self::identity();
        m.data[15] = -ONE;
        m
    }

    /// SWAP.
    pub fn swap() -> Self {
        Self::permutation([0, 2, 1, 3])
    }

    /// Tensor product `upper ⊗ lower`.
    pub fn kron(upper: &Unitary2x2, lower: &Unitary2x2) -> Self {
        let mut data = [ZERO; 16];
        for r in 0..4 {
            for c in 0..4 {
                let a = upper.data[2 * (r / 2) + c / 2];
                let b = lower.data[2 * (r % 2) + c % 2];
                data[4 * r + c] = a * b;
            }
        }
        Self { data }
    }

    /// Multiply this matrix by another: self * other.
    pub fn mul(&self, other: &Self) -> Self {
        let mut data = [ZERO; 16];
        for r in 0..4 {
            for c in 0..4 {
                data[4 * r + c] = (0..4).map(|k| self.data[4 * r + k] * other.data[4 * k + c]).sum();
            }
        }
        Self { data }
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        let mut data = [ZERO; 16];
        for r in 0..4 {
            for c in 0..4 {
                data[4 * c + r] = self.data[4 * r + c].conj();
            }
        }
        Self { data }
    }

    /// Check `U · U† ≈ I` within `tol`.
    pub fn is_unitary(&self, tol: f64) -> bool {
        let product = self.mul(&self.dagger());
        product
            .data
            .iter()
            .zip(Self::identity().data.iter())
            .all(|(got, want)| (got - want).norm() < tol)
    }
}

impl Default for Unitary4x4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary4x4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Unitary4x4::mul(&self, &rhs)
    }
}

/// The matrix of a gate, sized by the number of qubits it acts on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateMatrix {
    /// A single-qubit gate.
    Single(Unitary2x2),
    /// A two-qubit gate.
    Two(Unitary4x4),
}

impl GateMatrix {
    /// Row/column dimension of the matrix.
    pub fn dim(&self) -> usize {
        match self {
            GateMatrix::Single(_) => 2,
            GateMatrix::Two(_) => 4,
        }
    }

    /// Number of qubits the matrix acts on.
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateMatrix::Single(_) => 1,
            GateMatrix::Two(_) => 2,
        }
    }

    /// Row-major elements.
    pub fn elements(&self) -> &[Complex64] {
        match self {
            GateMatrix::Single(u) => &u.data,
            GateMatrix::Two(u) => &u.data,
        }
    }

    /// Check unitarity within `tol`.
    pub fn is_unitary(&self, tol: f64) -> bool {
        match self {
            GateMatrix::Single(u) => u.is_unitary(tol),
            GateMatrix::Two(u) => u.is_unitary(tol),
        }
    }
}

impl From<Unitary2x2> for GateMatrix {
    fn from(u: Unitary2x2) -> Self {
        GateMatrix::Single(u)
    }
}

impl From<Unitary4x4> for GateMatrix {
    fn from(u: Unitary4x4) -> Self {
        GateMatrix::Two(u)
    }
}
