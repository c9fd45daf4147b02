//! Effect size and state distance.
//!
//! The effect size measures how far the faulty state has drifted from the
//! fault-free one, weighting each component by the faulty amplitude's
//! magnitude:
//!
//! ```text
//! effect = max(0.1, sqrt( Σ |f_i − g_i|² / (|f_i| + 1e-100) ))
//! ```

use qatg_ir::{IrError, Statevector};

use crate::error::{QatgError, QatgResult};

/// Lower clamp of [`effect_size`].
pub const EFFECT_SIZE_FLOOR: f64 = 0.1;

/// Added to every faulty magnitude before dividing.
pub const MAGNITUDE_FLOOR: f64 = 1e-100;

/// Effect size between the faulty and fault-free states.
///
/// Never below [`EFFECT_SIZE_FLOOR`]. A non-finite result is an error rather
/// than being clamped.
pub fn effect_size(faulty: &Statevector, faultfree: &Statevector) -> QatgResult<f64> {
    if faulty.dim() != faultfree.dim() {
        return Err(IrError::StateDimensionMismatch {
            left: faulty.dim(),
            right: faultfree.dim(),
        }
        .into());
    }
    let sum: f64 = faulty
        .amplitudes()
        .iter()
        .zip(faultfree.amplitudes())
        .map(|(f, g)| (f - g).norm_sqr() / (f.norm() + MAGNITUDE_FLOOR))
        .sum();
    let effect = sum.sqrt();
    if !effect.is_finite() {
        return Err(QatgError::NonFiniteScore {
            score: effect,
            params: Vec::new(),
        });
    }
    if effect < EFFECT_SIZE_FLOOR {
        return Ok(EFFECT_SIZE_FLOOR);
    }
    Ok(effect)
}

/// Euclidean distance `||a − b||₂` between two states.
#[inline]
pub fn vector_distance(a: &Statevector, b: &Statevector) -> QatgResult<f64> {
    Ok(a.distance(b)?)
}
