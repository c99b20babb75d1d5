//! Operator steppers
//!
//! A stepper maps the field at time t to the field at t + dt for one process
//! (advection, diffusion, reaction) or for all three at once.
//!
//! # Available Steppers
//!
//! | Variant | Interior update | Left edge | Right edge | Stability |
//! |---------|-----------------|-----------|------------|-----------|
//! | [`Stepper::Advection`] | first-order upwind | fixed inflow | upwind outflow | \|Co\| ≤ 1 |
//! | [`Stepper::Diffusion`] | central Laplacian | zero flux | zero flux | d ≤ 0.5 |
//! | [`Stepper::Reaction`] | exact `exp(−k·dt)` | exact | exact | none |
//! | [`Stepper::Combined`] | additive sum of the three | fixed inflow | zero gradient | \|Co\| + 2d ≤ 1 |
//!
//! (Co = U·dt/dx, d = D·dt/dx²; edges mirror for U < 0.)
//!
//! # Preconditions
//!
//! No stepper checks its stability limit. Feeding a `dt` that violates it is a
//! contract breach that shows up as oscillating or exploding output; get `dt`
//! from [`choose_time_step`](crate::solver::choose_time_step).
//!
//! # Example
//!
//! ```rust
//! use adr_rs::physics::{Grid, PhysicalParameters, initial_gaussian_pulse};
//! use adr_rs::solver::Stepper;
//!
//! let grid = Grid::new(10.0, 100)?;
//! let params = PhysicalParameters::advection(1.0);
//! let field = initial_gaussian_pulse(&grid, 1.0, 3.0, 0.5)?;
//!
//! let stepper = Stepper::for_parameters(&params);
//! assert_eq!(stepper, Stepper::Advection);
//!
//! let next = stepper.step(&field, &params, grid.dx(), 0.05);
//! assert_eq!(next.len(), field.len());
//! # Ok::<(), adr_rs::TransportError>(())
//! ```

mod advection;
mod combined;
mod diffusion;
mod reaction;

use nalgebra::DVector;
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::physics::{ConcentrationField, PhysicalParameters};
use crate::solver::boundary::{Edge, EdgeRules};

// =================================================================================================
// Stepper selection
// =================================================================================================

/// Which terms of the ADR equation a time step advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stepper {
    /// −U·∂C/∂x only
    Advection,
    /// D·∂²C/∂x² only
    Diffusion,
    /// −k·C only
    Reaction,
    /// All three terms, evaluated from the same prior field
    Combined,
}

impl Stepper {
    /// Every variant, in declaration order
    pub const ALL: [Stepper; 4] = [
        Stepper::Advection,
        Stepper::Diffusion,
        Stepper::Reaction,
        Stepper::Combined,
    ];

    /// Pick the variant matching the active terms of `params`
    ///
    /// - only U ≠ 0 → `Advection`
    /// - only D ≠ 0 → `Diffusion`
    /// - U = D = 0 → `Reaction` (the identity when k = 0 as well)
    /// - anything else → `Combined`
    pub fn for_parameters(params: &PhysicalParameters) -> Self {
        match (
            params.has_advection(),
            params.has_diffusion(),
            params.has_reaction(),
        ) {
            (true, false, false) => Stepper::Advection,
            (false, true, false) => Stepper::Diffusion,
            (false, false, _) => Stepper::Reaction,
            _ => Stepper::Combined,
        }
    }

    /// Advance `field` by one step of size `dt` on a grid of spacing `dx`
    ///
    /// Returns a new field; `field` is left untouched.
    ///
    /// # Panics
    ///
    /// The advection, diffusion and combined variants panic when the field
    /// has fewer than 3 points. A [`Grid`](crate::physics::Grid) never
    /// produces one, but [`ConcentrationField::from_vec`] can; run such
    /// fields through [`Scenario`](crate::solver::Scenario) validation first.
    pub fn step(
        &self,
        field: &ConcentrationField,
        params: &PhysicalParameters,
        dx: f64,
        dt: f64,
    ) -> ConcentrationField {
        let rules = self.edge_rules(params, dx, dt);

        match self {
            Stepper::Advection => advection::step(field, params, rules, dx, dt),
            Stepper::Diffusion => diffusion::step(field, params, rules, dx, dt),
            Stepper::Reaction => reaction::step(field, params, dt),
            Stepper::Combined => combined::step(field, params, rules, dx, dt),
        }
    }

    /// Boundary rules this variant applies for the given step
    ///
    /// [`step`](Stepper::step) takes its edge values from these rules.
    pub fn edge_rules(&self, params: &PhysicalParameters, dx: f64, dt: f64) -> EdgeRules {
        match self {
            Stepper::Advection => advection::rules(params, dx, dt),
            Stepper::Diffusion => diffusion::rules(params, dx, dt),
            Stepper::Reaction => reaction::rules(params, dt),
            Stepper::Combined => combined::rules(params),
        }
    }

    /// Name used in logs and trajectory metadata
    pub fn name(&self) -> &'static str {
        match self {
            Stepper::Advection => "Upwind Advection",
            Stepper::Diffusion => "Explicit Diffusion",
            Stepper::Reaction => "Exact Reaction",
            Stepper::Combined => "Combined ADR",
        }
    }
}

impl fmt::Display for Stepper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =================================================================================================
// Shared stencil machinery
// =================================================================================================

/// Build the next field from `prior`
///
/// Edge points come from `rules`, every other point from `interior`. All
/// reads go to `prior`, so the order in which points are computed does not
/// matter and the loop may run on the rayon pool (feature `parallel`, field
/// larger than [`parallel_threshold()`](crate::solver::parallel_threshold)).
fn apply_stencil<F>(prior: &[f64], rules: EdgeRules, interior: F) -> ConcentrationField
where
    F: Fn(usize) -> f64 + Sync + Send,
{
    let n = prior.len();
    assert!(
        n >= crate::physics::grid::MIN_POINTS,
        "Stencil needs at least {} points, got {}",
        crate::physics::grid::MIN_POINTS,
        n
    );

    let update = |i: usize| {
        if i == 0 {
            rules.left.value(prior, Edge::Left)
        } else if i == n - 1 {
            rules.right.value(prior, Edge::Right)
        } else {
            interior(i)
        }
    };

    #[cfg(feature = "parallel")]
    if n > crate::solver::parallel_threshold() {
        let values: Vec<f64> = (0..n).into_par_iter().map(&update).collect();
        return ConcentrationField::from_stepper(DVector::from_vec(values));
    }

    ConcentrationField::from_stepper(DVector::from_fn(n, |i, _| update(i)))
}

// =================================================================================================
// Tests
// =================================================================================================
