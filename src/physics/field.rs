//! Concentration field
//!
//! A `ConcentrationField` holds C at every grid point at one time instant.
//! Steppers consume a field by reference and hand back a new one; the
//! simulation driver owns whichever field is current.

use nalgebra::DVector;
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Result, TransportError};
use crate::physics::Grid;

/// Concentration profile C(x_i) at one time level [kg/m³ or any consistent unit]
///
/// # Storage
///
/// Backed by a `DVector<f64>` of length N, index 0 being the upstream end of
/// the channel.
///
/// # Construction
///
/// Fields built from raw caller data go through [`ConcentrationField::new`] or
/// [`ConcentrationField::from_vec`], which reject negative and non-finite
/// values. Steppers build their output through the crate-private
/// `from_stepper` constructor and perform no check: an unstable `dt` is
/// allowed to produce garbage.
///
/// # Example
///
/// ```rust
/// use adr_rs::physics::ConcentrationField;
///
/// let field = ConcentrationField::from_vec(vec![0.0, 1.0, 0.5])?;
/// assert_eq!(field.len(), 3);
/// assert_eq!(field.peak(), (1, 1.0));
/// # Ok::<(), adr_rs::TransportError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConcentrationField {
    values: DVector<f64>,
}

impl ConcentrationField {
    // ======================================= constructors =======================================

    /// Create from a DVector, validating every value
    ///
    /// # Errors
    ///
    /// `InvalidConcentration` for the first negative or non-finite value.
    pub fn new(values: DVector<f64>) -> Result<Self> {
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_finite() || **c < 0.0)
        {
            return Err(TransportError::InvalidConcentration { index, value });
        }

        Ok(Self { values })
    }

    /// Create from a Vec, validating every value
    pub fn from_vec(values: Vec<f64>) -> Result<Self> {
        Self::new(DVector::from_vec(values))
    }

    /// Uniform field of `size` points
    ///
    /// # Errors
    ///
    /// `InvalidConcentration` when `value` is negative or not finite.
    pub fn uniform(size: usize, value: f64) -> Result<Self> {
        Self::new(DVector::from_element(size, value))
    }

    /// Field of zeros
    pub fn zeros(size: usize) -> Self {
        Self {
            values: DVector::zeros(size),
        }
    }

    /// Unchecked constructor used by the steppers
    pub(crate) fn from_stepper(values: DVector<f64>) -> Self {
        Self { values }
    }

    // ========================================== Queries ==========================================

    /// Number of points
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Underlying vector
    pub fn values(&self) -> &DVector<f64> {
        &self.values
    }

    /// Values as a slice
    pub fn as_slice(&self) -> &[f64] {
        self.values.as_slice()
    }

    /// True when no value is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|c| c.is_finite())
    }

    // ======================================== Diagnostics ========================================

    /// Total mass M = dx·Σ C_i
    pub fn total_mass(&self, dx: f64) -> f64 {
        dx * self.values.sum()
    }

    /// Discrete center of mass Σ x_i·C_i / Σ C_i [m]
    ///
    /// `None` when the field carries no mass.
    pub fn center_of_mass(&self, grid: &Grid) -> Option<f64> {
        let mass = self.values.sum();
        if mass == 0.0 || !mass.is_finite() {
            return None;
        }

        let moment: f64 = self
            .values
            .iter()
            .enumerate()
            .map(|(i, c)| grid.position(i) * c)
            .sum();

        Some(moment / mass)
    }

    /// Index and value of the maximum (first one on ties)
    ///
    /// Returns `(0, NaN)` for an empty field.
    pub fn peak(&self) -> (usize, f64) {
        self.values
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NAN), |(best_i, best), (i, c)| {
                if best.is_nan() || c > best {
                    (i, c)
                } else {
                    (best_i, best)
                }
            })
    }

    /// Position of the maximum on `grid` [m]
    pub fn peak_position(&self, grid: &Grid) -> f64 {
        grid.position(self.peak().0)
    }

    /// Maximum value
    pub fn max(&self) -> f64 {
        self.peak().1
    }

    // ====================================== Apply functions ======================================

    /// Apply `f` to every value in place
    ///
    /// Runs on the rayon pool when the crate is built with the `parallel`
    /// feature and the field is larger than
    /// [`parallel_threshold()`](crate::solver::parallel_threshold).
    pub fn apply<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        if self.values.len() > crate::solver::parallel_threshold() {
            #[cfg(feature = "parallel")]
            self.values.as_mut_slice().par_iter_mut().for_each(|c| *c = f(*c));
            #[cfg(not(feature = "parallel"))]
            self.values.iter_mut().for_each(|c| *c = f(*c));
        } else {
            self.values.iter_mut().for_each(|c| *c = f(*c));
        }
    }
}

impl std::ops::Index<usize> for ConcentrationField {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl fmt::Display for ConcentrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (index, value) = self.peak();
        write!(f, "Field [{}] (peak {} at index {})", self.len(), value, index)
    }
}

// ======================================= Initial profiles =======================================

/// Gaussian pulse sampled at the grid points
///
/// ```text
/// C(x) = amplitude · exp(−0.5·((x − center)/sigma)²)
/// ```
///
/// # Errors
///
/// `InvalidShapeParameter` when `sigma` is not a positive finite number, or
/// when `amplitude` is negative or not finite (the field must stay
/// non-negative). `center` may lie outside the domain.
///
/// # Example
///
/// ```rust
/// use adr_rs::physics::{Grid, initial_gaussian_pulse};
///
/// let grid = Grid::new(100.0, 200)?;
/// let field = initial_gaussian_pulse(&grid, 1.0, 20.0, 5.0)?;
/// assert_eq!(field.peak(), (40, 1.0));
/// # Ok::<(), adr_rs::TransportError>(())
/// ```
pub fn initial_gaussian_pulse(
    grid: &Grid,
    amplitude: f64,
    center: f64,
    sigma: f64,
) -> Result<ConcentrationField> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(TransportError::InvalidShapeParameter(format!(
            "pulse width sigma must be positive, got {}",
            sigma
        )));
    }

    if !amplitude.is_finite() || amplitude < 0.0 {
        return Err(TransportError::InvalidShapeParameter(format!(
            "pulse amplitude must be non-negative, got {}",
            amplitude
        )));
    }

    if !center.is_finite() {
        return Err(TransportError::InvalidShapeParameter(format!(
            "pulse center must be finite, got {}",
            center
        )));
    }

    let values = DVector::from_fn(grid.points(), |i, _| {
        let z = (grid.position(i) - center) / sigma;
        amplitude * (-0.5 * z * z).exp()
    });

    Ok(ConcentrationField { values })
}

// ==================== Tests ====================
