//! Stability policy
//!
//! Explicit schemes are only stable below a step-size limit:
//!
//! ```text
//! advection:  |U|·dt/dx ≤ 1          →  dt ≤ dx/|U|
//! diffusion:  D·dt/dx²  ≤ 1/2        →  dt ≤ dx²/(2D)
//! reaction:   none (exact sub-step)
//! ```
//!
//! [`choose_time_step`] computes a safe dt before stepping begins. Once
//! running, nothing re-checks the limit: [`StabilityReport`] exists so the
//! driver can warn about a caller-supplied dt, never to reject it.

use log::{debug, warn};
use std::fmt;

use crate::error::{Result, TransportError};
use crate::physics::{Grid, PhysicalParameters};
use crate::solver::Stepper;

/// Safety factor used when none is given
pub const DEFAULT_SAFETY_FACTOR: f64 = 0.5;

/// Largest safety factor for which the combined step stays stable
pub const COMBINED_SAFETY_LIMIT: f64 = 0.5;

/// Advective bound dx/|U|, infinite when U = 0
pub fn advective_bound(dx: f64, params: &PhysicalParameters) -> f64 {
    if params.has_advection() {
        dx / params.velocity.abs()
    } else {
        f64::INFINITY
    }
}

/// Diffusive bound dx²/(2D), infinite when D = 0
pub fn diffusive_bound(dx: f64, params: &PhysicalParameters) -> f64 {
    if params.has_diffusion() {
        dx * dx / (2.0 * params.diffusion)
    } else {
        f64::INFINITY
    }
}

/// Compute a stable time step
///
/// ```text
/// dt = safety_factor · min(dx/|U|, dx²/(2D))
/// ```
///
/// A zero velocity or zero diffusion contributes no bound. A safety factor
/// between 0.25 and 0.5 is the usual choice; above 0.5 the combined stepper
/// is no longer guaranteed stable and a warning is logged.
///
/// # Errors
///
/// - `InvalidSafetyFactor` when `safety_factor` is not in ]0, 1]
/// - `UnderconstrainedTimeStep` when U = 0 and D = 0: no bound exists and the
///   caller has to supply dt (see [`TimeStepSelection::Fixed`](crate::solver::TimeStepSelection))
/// - `InvalidParameter` when U or D is non-zero but so small that its bound
///   overflows to infinity
///
/// # Example
///
/// ```rust
/// use adr_rs::physics::{Grid, PhysicalParameters};
/// use adr_rs::solver::choose_time_step;
///
/// let grid = Grid::new(5.0, 10)?; // dx = 0.5
/// let dt = choose_time_step(&grid, &PhysicalParameters::advection(1.0), 0.5)?;
/// assert_eq!(dt, 0.25);
/// # Ok::<(), adr_rs::TransportError>(())
/// ```
pub fn choose_time_step(
    grid: &Grid,
    params: &PhysicalParameters,
    safety_factor: f64,
) -> Result<f64> {
    if !safety_factor.is_finite() || safety_factor <= 0.0 || safety_factor > 1.0 {
        return Err(TransportError::InvalidSafetyFactor(safety_factor));
    }
    params.validate()?;

    if safety_factor > COMBINED_SAFETY_LIMIT {
        warn!(
            "Safety factor {} exceeds {}: combined advection-diffusion steps may be unstable",
            safety_factor, COMBINED_SAFETY_LIMIT
        );
    }

    if !params.has_advection() && !params.has_diffusion() {
        return Err(TransportError::UnderconstrainedTimeStep);
    }

    let dx = grid.dx();
    let bound = advective_bound(dx, params).min(diffusive_bound(dx, params));

    // Subnormal U or D: the term is on but its bound overflows f64
    if !bound.is_finite() {
        return Err(TransportError::InvalidParameter(format!(
            "U = {:e} and D = {:e} are too small to bound dt on dx = {}",
            params.velocity, params.diffusion, dx
        )));
    }

    let dt = safety_factor * bound;
    debug!(
        "Stability policy: dx = {}, advective bound = {}, diffusive bound = {}, dt = {}",
        dx,
        advective_bound(dx, params),
        diffusive_bound(dx, params),
        dt
    );

    Ok(dt)
}

// =================================================================================================
// Stability report
// =================================================================================================

/// Dimensionless step numbers for one (grid, parameters, dt) combination
///
/// # Example
///
/// ```rust
/// use adr_rs::physics::{Grid, PhysicalParameters};
/// use adr_rs::solver::{StabilityReport, Stepper};
///
/// let grid = Grid::new(10.0, 10)?; // dx = 1
/// let params = PhysicalParameters::new(1.0, 1.0, 0.0)?;
///
/// let report = StabilityReport::assess(&grid, &params, 0.4);
/// assert!(report.is_stable_for(Stepper::Advection));
/// assert!(report.is_stable_for(Stepper::Diffusion));
/// assert!(!report.is_stable_for(Stepper::Combined)); // 0.4 + 2·0.4 > 1
/// # Ok::<(), adr_rs::TransportError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityReport {
    /// Courant number |U|·dt/dx
    pub courant: f64,

    /// Diffusion number D·dt/dx²
    pub diffusion_number: f64,
}

impl StabilityReport {
    pub fn assess(grid: &Grid, params: &PhysicalParameters, dt: f64) -> Self {
        Self {
            courant: params.courant_number(grid.dx(), dt).abs(),
            diffusion_number: params.diffusion_number(grid.dx(), dt),
        }
    }

    /// Whether `stepper` is stable at these numbers
    pub fn is_stable_for(&self, stepper: Stepper) -> bool {
        match stepper {
            Stepper::Advection => self.courant <= 1.0,
            Stepper::Diffusion => self.diffusion_number <= 0.5,
            Stepper::Reaction => true,
            Stepper::Combined => self.courant + 2.0 * self.diffusion_number <= 1.0,
        }
    }
}

impl fmt::Display for StabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Courant = {:.4}, diffusion number = {:.4}",
            self.courant, self.diffusion_number
        )
    }
}

// =================================================================================================
// Tests
// =================================================================================================
