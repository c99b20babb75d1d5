//! Error norms between a numerical field and a reference

use std::fmt;

use crate::error::{Result, TransportError};
use crate::physics::ConcentrationField;

/// Discrete error norms, averaged over the points
///
/// ```text
/// l1   = Σ|eᵢ| / N
/// l2   = sqrt(Σ eᵢ² / N)
/// linf = max |eᵢ|
/// ```
///
/// Averaging makes the norms comparable across grid sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorNorms {
    pub l1: f64,
    pub l2: f64,
    pub linf: f64,
}

impl ErrorNorms {
    /// # Errors
    ///
    /// `SizeMismatch` when the two fields differ in length.
    ///
    /// # Example
    ///
    /// ```rust
    /// use adr_rs::analytical::ErrorNorms;
    /// use adr_rs::physics::ConcentrationField;
    ///
    /// let numerical = ConcentrationField::from_vec(vec![1.0, 2.0, 3.0, 4.0])?;
    /// let reference = ConcentrationField::from_vec(vec![1.0, 2.0, 3.0, 6.0])?;
    ///
    /// let norms = ErrorNorms::compare(&numerical, &reference)?;
    /// assert_eq!(norms.l1, 0.5);
    /// assert_eq!(norms.l2, 1.0);
    /// assert_eq!(norms.linf, 2.0);
    /// # Ok::<(), adr_rs::TransportError>(())
    /// ```
    pub fn compare(numerical: &ConcentrationField, reference: &ConcentrationField) -> Result<Self> {
        if numerical.len() != reference.len() {
            return Err(TransportError::SizeMismatch {
                expected: reference.len(),
                actual: numerical.len(),
            });
        }

        let n = numerical.len().max(1) as f64;
        let diff = numerical.values() - reference.values();

        Ok(Self {
            l1: diff.iter().map(|e| e.abs()).sum::<f64>() / n,
            l2: (diff.norm_squared() / n).sqrt(),
            linf: diff.amax(),
        })
    }

    /// Whether every norm is at most `tolerance`
    pub fn within(&self, tolerance: f64) -> bool {
        self.l1 <= tolerance && self.l2 <= tolerance && self.linf <= tolerance
    }
}

impl fmt::Display for ErrorNorms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L1 = {:.3e}, L2 = {:.3e}, Linf = {:.3e}", self.l1, self.l2, self.linf)
    }
}
