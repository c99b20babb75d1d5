//! Closed-form reference solutions for a Gaussian pulse
//!
//! # Mathematical Background
//!
//! For an initial profile `C(x, 0) = exp(−0.5·((x − x₀)/σ₀)²)` on an infinite
//! line, each process taken alone has an exact solution:
//!
//! ```text
//! advection:  C(x, t) = exp(−0.5·((x − x₀ − U·t)/σ₀)²)
//! diffusion:  C(x, t) = (σ₀/σ(t))·exp(−0.5·((x − x₀)/σ(t))²),   σ(t)² = σ₀² + 2·D·t
//! reaction:   C(x, t) = C(x, 0)·exp(−k·t)
//! ```
//!
//! Advection translates, diffusion widens while conserving area, reaction
//! scales. [`adr_approx`] stacks the three. It ignores the finite domain and
//! the boundary rules of the steppers, so use it for qualitative
//! cross-checks only.
//!
//! All functions are stateless; evaluating at a new `(x, t)` is just another
//! call.
//!
//! # Example
//!
//! ```rust
//! use adr_rs::analytical::{pure_advection, pure_diffusion};
//!
//! // The pulse center moves by U·t
//! assert_eq!(pure_advection(25.0, 5.0, 1.0, 20.0, 5.0), 1.0);
//!
//! // Diffusion lowers the peak
//! assert!(pure_diffusion(20.0, 10.0, 0.5, 20.0, 5.0) < 1.0);
//! ```

mod norms;

pub use norms::ErrorNorms;

use nalgebra::DVector;
use std::fmt;

use crate::error::{Result, TransportError};
use crate::physics::{ConcentrationField, Grid, PhysicalParameters};

// =================================================================================================
// Free functions (unit amplitude)
// =================================================================================================

#[inline]
fn gaussian(x: f64, center: f64, sigma: f64) -> f64 {
    let z = (x - center) / sigma;
    (-0.5 * z * z).exp()
}

/// Width of a diffusing Gaussian: sqrt(σ₀² + 2·D·t)
#[inline]
pub fn diffused_sigma(sigma0: f64, diffusion: f64, t: f64) -> f64 {
    (sigma0 * sigma0 + 2.0 * diffusion * t).sqrt()
}

/// Pure advection of a unit Gaussian: translation by U·t
pub fn pure_advection(x: f64, t: f64, velocity: f64, center0: f64, sigma: f64) -> f64 {
    gaussian(x, center0 + velocity * t, sigma)
}

/// Pure diffusion of a unit Gaussian
///
/// The peak drops as σ₀/σ(t) so that the area under the curve is constant.
pub fn pure_diffusion(x: f64, t: f64, diffusion: f64, center: f64, sigma0: f64) -> f64 {
    let sigma = diffused_sigma(sigma0, diffusion, t);
    (sigma0 / sigma) * gaussian(x, center, sigma)
}

/// First-order decay: C₀·exp(−k·t)
pub fn pure_reaction(c0: f64, t: f64, reaction_rate: f64) -> f64 {
    c0 * (-reaction_rate * t).exp()
}

/// Approximate advection-diffusion-reaction of a unit Gaussian
///
/// ```text
/// C(x, t) ≈ (σ₀/σ(t))·exp(−0.5·((x − x₀ − U·t)/σ(t))²)·exp(−k·t)
/// ```
///
/// Not an exact solution on the bounded channel: boundaries are ignored.
pub fn adr_approx(
    x: f64,
    t: f64,
    velocity: f64,
    diffusion: f64,
    reaction_rate: f64,
    center0: f64,
    sigma0: f64,
) -> f64 {
    let sigma = diffused_sigma(sigma0, diffusion, t);
    let shape = (sigma0 / sigma) * gaussian(x, center0 + velocity * t, sigma);
    pure_reaction(shape, t, reaction_rate)
}

// =================================================================================================
// Gaussian pulse
// =================================================================================================

/// Initial pulse `amplitude·exp(−0.5·((x − center)/sigma)²)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianPulse {
    amplitude: f64,
    center: f64,
    sigma: f64,
}

impl GaussianPulse {
    /// # Errors
    ///
    /// `InvalidShapeParameter` under the same rules as
    /// [`initial_gaussian_pulse`](crate::physics::initial_gaussian_pulse).
    pub fn new(amplitude: f64, center: f64, sigma: f64) -> Result<Self> {
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

        Ok(Self {
            amplitude,
            center,
            sigma,
        })
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Value at `x` (t = 0)
    pub fn value(&self, x: f64) -> f64 {
        self.amplitude * gaussian(x, self.center, self.sigma)
    }

    /// Initial field on `grid`
    pub fn to_field(&self, grid: &Grid) -> Result<ConcentrationField> {
        crate::physics::initial_gaussian_pulse(grid, self.amplitude, self.center, self.sigma)
    }
}

// =================================================================================================
// Analytical solution selection
// =================================================================================================

/// Reference solution for a Gaussian pulse under one parameter set
///
/// # Example
///
/// ```rust
/// use adr_rs::analytical::{AnalyticalSolution, GaussianPulse};
/// use adr_rs::physics::{Grid, PhysicalParameters};
///
/// let pulse = GaussianPulse::new(2.0, 20.0, 5.0)?;
/// let reference = AnalyticalSolution::for_parameters(pulse, &PhysicalParameters::advection(1.0));
///
/// assert_eq!(reference.evaluate(30.0, 10.0), 2.0);
///
/// let grid = Grid::new(100.0, 200)?;
/// let field = reference.sample(&grid, 10.0)?;
/// assert_eq!(field.peak_position(&grid), 30.0);
/// # Ok::<(), adr_rs::TransportError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalyticalSolution {
    /// Translation at U
    Advection { pulse: GaussianPulse, velocity: f64 },

    /// Area-conserving spreading at D
    Diffusion { pulse: GaussianPulse, diffusion: f64 },

    /// Pointwise decay at k (identity when k = 0)
    Reaction { pulse: GaussianPulse, reaction_rate: f64 },

    /// The three effects stacked, see [`adr_approx`]
    Composite {
        pulse: GaussianPulse,
        parameters: PhysicalParameters,
    },
}

impl AnalyticalSolution {
    /// Pick the reference matching the active terms of `params`
    ///
    /// Uses the same rule as [`Stepper::for_parameters`](crate::solver::Stepper::for_parameters).
    pub fn for_parameters(pulse: GaussianPulse, params: &PhysicalParameters) -> Self {
        match (
            params.has_advection(),
            params.has_diffusion(),
            params.has_reaction(),
        ) {
            (true, false, false) => AnalyticalSolution::Advection {
                pulse,
                velocity: params.velocity,
            },
            (false, true, false) => AnalyticalSolution::Diffusion {
                pulse,
                diffusion: params.diffusion,
            },
            (false, false, _) => AnalyticalSolution::Reaction {
                pulse,
                reaction_rate: params.reaction_rate,
            },
            _ => AnalyticalSolution::Composite {
                pulse,
                parameters: *params,
            },
        }
    }

    pub fn pulse(&self) -> &GaussianPulse {
        match self {
            AnalyticalSolution::Advection { pulse, .. }
            | AnalyticalSolution::Diffusion { pulse, .. }
            | AnalyticalSolution::Reaction { pulse, .. }
            | AnalyticalSolution::Composite { pulse, .. } => pulse,
        }
    }

    /// Whether the value is an exact solution (on an infinite line)
    pub fn is_exact(&self) -> bool {
        !matches!(self, AnalyticalSolution::Composite { .. })
    }

    /// Concentration at `(x, t)`
    pub fn evaluate(&self, x: f64, t: f64) -> f64 {
        match *self {
            AnalyticalSolution::Advection { pulse, velocity } => {
                pulse.amplitude * pure_advection(x, t, velocity, pulse.center, pulse.sigma)
            }
            AnalyticalSolution::Diffusion { pulse, diffusion } => {
                pulse.amplitude * pure_diffusion(x, t, diffusion, pulse.center, pulse.sigma)
            }
            AnalyticalSolution::Reaction {
                pulse,
                reaction_rate,
            } => pure_reaction(pulse.value(x), t, reaction_rate),
            AnalyticalSolution::Composite { pulse, parameters } => {
                pulse.amplitude
                    * adr_approx(
                        x,
                        t,
                        parameters.velocity,
                        parameters.diffusion,
                        parameters.reaction_rate,
                        pulse.center,
                        pulse.sigma,
                    )
            }
        }
    }

    /// Reference field on `grid` at time `t`
    ///
    /// # Errors
    ///
    /// `InvalidConcentration` when a value overflows (strong growth with
    /// k < 0 over a long time).
    pub fn sample(&self, grid: &Grid, t: f64) -> Result<ConcentrationField> {
        let values = DVector::from_fn(grid.points(), |i, _| self.evaluate(grid.position(i), t));
        ConcentrationField::new(values)
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnalyticalSolution::Advection { .. } => "Pure Advection",
            AnalyticalSolution::Diffusion { .. } => "Pure Diffusion",
            AnalyticalSolution::Reaction { .. } => "Pure Reaction",
            AnalyticalSolution::Composite { .. } => "ADR Approximation",
        }
    }
}

impl fmt::Display for AnalyticalSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pulse = self.pulse();
        write!(
            f,
            "{} (amplitude {}, center {}, sigma {})",
            self.name(),
            pulse.amplitude,
            pulse.center,
            pulse.sigma
        )
    }
}

// =================================================================================================
// Tests
// =================================================================================================
