//! Physical parameters of the transport equation
//!
//! ```text
//! ∂C/∂t = −U·∂C/∂x + D·∂²C/∂x² − k·C
//! ```
//!
//! Besides the three coefficients, this module provides the dimensionless
//! groups used to characterize a run: Courant and diffusion numbers for the
//! discretization, Péclet and Damköhler numbers for the physics.

use crate::error::{Result, TransportError};

/// Transport coefficients, immutable for one run
///
/// # Fields
///
/// - `velocity` U [m/s]: mean flow velocity, any sign (negative flows toward x = 0)
/// - `diffusion` D [m²/s]: longitudinal dispersion coefficient, D ≥ 0
/// - `reaction_rate` k [1/s]: first-order rate, positive = decay, negative = growth
///
/// # Example
///
/// ```rust
/// use adr_rs::physics::PhysicalParameters;
///
/// let params = PhysicalParameters::new(1.0, 0.5, 0.01)?;
/// assert!(params.has_advection() && params.has_diffusion() && params.has_reaction());
///
/// let river = PhysicalParameters::advection(0.3);
/// assert!(!river.has_diffusion());
/// # Ok::<(), adr_rs::TransportError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhysicalParameters {
    /// Mean flow velocity U [m/s]
    pub velocity: f64,

    /// Dispersion coefficient D [m²/s]
    pub diffusion: f64,

    /// First-order reaction rate k [1/s]
    pub reaction_rate: f64,
}

impl PhysicalParameters {
    /// Create validated parameters
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when any coefficient is not finite or when the
    /// diffusion coefficient is negative.
    pub fn new(velocity: f64, diffusion: f64, reaction_rate: f64) -> Result<Self> {
        let params = Self {
            velocity,
            diffusion,
            reaction_rate,
        };
        params.validate()?;
        Ok(params)
    }

    /// Pure advection at velocity U
    pub fn advection(velocity: f64) -> Self {
        Self {
            velocity,
            ..Default::default()
        }
    }

    /// Pure diffusion with coefficient D
    pub fn diffusion(diffusion: f64) -> Self {
        Self {
            diffusion,
            ..Default::default()
        }
    }

    /// Pure first-order reaction with rate k
    pub fn reaction(reaction_rate: f64) -> Self {
        Self {
            reaction_rate,
            ..Default::default()
        }
    }

    /// Validate that the coefficients are physically meaningful
    pub fn validate(&self) -> Result<()> {
        if !self.velocity.is_finite() {
            return Err(TransportError::InvalidParameter(format!(
                "velocity must be finite, got {}",
                self.velocity
            )));
        }
        if !self.diffusion.is_finite() || self.diffusion < 0.0 {
            return Err(TransportError::InvalidParameter(format!(
                "diffusion coefficient must be finite and non-negative, got {}",
                self.diffusion
            )));
        }
        if !self.reaction_rate.is_finite() {
            return Err(TransportError::InvalidParameter(format!(
                "reaction rate must be finite, got {}",
                self.reaction_rate
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn has_advection(&self) -> bool {
        self.velocity != 0.0
    }

    #[inline]
    pub fn has_diffusion(&self) -> bool {
        self.diffusion != 0.0
    }

    #[inline]
    pub fn has_reaction(&self) -> bool {
        self.reaction_rate != 0.0
    }

    // ==================== Dimensionless groups ====================

    /// Courant number U·dt/dx (signed)
    #[inline]
    pub fn courant_number(&self, dx: f64, dt: f64) -> f64 {
        self.velocity * dt / dx
    }

    /// Diffusion number D·dt/dx²
    #[inline]
    pub fn diffusion_number(&self, dx: f64, dt: f64) -> f64 {
        self.diffusion * dt / (dx * dx)
    }

    /// Péclet number Pe = |U|·L/D
    ///
    /// Infinite when D = 0 (pure advection), zero when U = 0.
    pub fn peclet_number(&self, length: f64) -> f64 {
        if self.diffusion == 0.0 {
            return if self.velocity == 0.0 { 0.0 } else { f64::INFINITY };
        }
        self.velocity.abs() * length / self.diffusion
    }

    /// Grid Péclet number |U|·dx/D
    ///
    /// Above 2, a central difference of the advective term would oscillate;
    /// the upwind scheme used here does not, at the price of numerical
    /// dispersion U·dx·(1 − Co)/2.
    pub fn grid_peclet_number(&self, dx: f64) -> f64 {
        self.peclet_number(dx)
    }

    /// Damköhler number Da = k·L/|U|
    ///
    /// Infinite when U = 0 and k ≠ 0.
    pub fn damkohler_number(&self, length: f64) -> f64 {
        if self.velocity == 0.0 {
            return if self.reaction_rate == 0.0 { 0.0 } else { f64::INFINITY };
        }
        self.reaction_rate * length / self.velocity.abs()
    }
}
