//! Uniform 1-D spatial grid
//!
//! The channel of length L is split into N equally spaced points with spacing
//! dx = L / N. Point i sits at x_i = i·dx, so the last point lies one spacing
//! short of L.

use crate::error::{Result, TransportError};

/// Minimum number of points: one inflow boundary, one interior, one outflow boundary
pub const MIN_POINTS: usize = 3;

/// Discretized spatial domain
///
/// Immutable once built: created once per simulation run and shared by
/// reference with every stepper call.
///
/// # Example
///
/// ```rust
/// use adr_rs::physics::Grid;
///
/// let grid = Grid::new(100.0, 200)?;
/// assert_eq!(grid.points(), 200);
/// assert!((grid.dx() - 0.5).abs() < 1e-12);
/// # Ok::<(), adr_rs::TransportError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// Domain length L [m]
    length: f64,

    /// Number of points N
    points: usize,

    /// Spacing dx = L / N [m]
    dx: f64,
}

impl Grid {
    /// Build a grid of `points` points over a channel of `length` metres
    ///
    /// # Errors
    ///
    /// `InvalidDomain` when the length is not a positive finite number or
    /// when fewer than [`MIN_POINTS`] points are requested.
    pub fn new(length: f64, points: usize) -> Result<Self> {
        if !length.is_finite() || length <= 0.0 {
            return Err(TransportError::InvalidDomain(format!(
                "domain length must be positive, got {} m",
                length
            )));
        }

        if points < MIN_POINTS {
            return Err(TransportError::InvalidDomain(format!(
                "need at least {} grid points, got {}",
                MIN_POINTS, points
            )));
        }

        Ok(Self {
            length,
            points,
            dx: length / points as f64,
        })
    }

    /// Domain length L [m]
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Number of points N
    #[inline]
    pub fn points(&self) -> usize {
        self.points
    }

    /// Spacing dx [m]
    #[inline]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Position of point `index` [m]
    ///
    /// Computed from the index rather than by accumulating dx.
    #[inline]
    pub fn position(&self, index: usize) -> f64 {
        index as f64 * self.dx
    }

    /// Positions of every point, in index order
    pub fn positions(&self) -> Vec<f64> {
        (0..self.points).map(|i| self.position(i)).collect()
    }
}
