//! Boundary rules applied at the two ends of the channel
//!
//! Each stepper pairs its interior stencil with one rule per edge, stored as
//! data (`BoundaryCondition`) and queried through
//! [`Stepper::edge_rules`](crate::solver::Stepper::edge_rules).
//!
//! The isolated diffusion stepper and the combined stepper use different
//! rules at the downstream edge: one-sided zero flux versus a zero-gradient
//! copy.

use std::fmt;

/// One end of the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// x = 0, index 0
    Left,
    /// x = L − dx, index N−1
    Right,
}

impl Edge {
    /// Index of the edge point and of its only neighbour
    #[inline]
    fn indices(self, len: usize) -> (usize, usize) {
        match self {
            Edge::Left => (0, 1),
            Edge::Right => (len - 1, len - 2),
        }
    }
}

/// Update rule for an edge point
///
/// Every rule reads prior-time values only.
///
/// # Examples
///
/// ```rust
/// use adr_rs::solver::{BoundaryCondition, Edge};
///
/// let prior = [1.0, 3.0, 5.0];
///
/// assert_eq!(BoundaryCondition::FixedInflow.value(&prior, Edge::Left), 1.0);
/// assert_eq!(BoundaryCondition::ZeroGradientOutflow.value(&prior, Edge::Right), 3.0);
///
/// let flux = BoundaryCondition::ZeroFluxDiffusion { diffusion_number: 0.25 };
/// assert_eq!(flux.value(&prior, Edge::Left), 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCondition {
    /// Dirichlet inflow: the edge keeps its prior value
    ///
    /// `C'[e] = C[e]`
    FixedInflow,

    /// Zero-gradient outflow: the edge copies its neighbour's prior value
    ///
    /// `C'[e] = C[nb]`
    ZeroGradientOutflow,

    /// One-sided zero-flux diffusion with d = D·dt/dx²
    ///
    /// `C'[e] = C[e] + d·(C[nb] − C[e])`
    ZeroFluxDiffusion { diffusion_number: f64 },

    /// Downstream edge of the upwind scheme with |Co| = |U|·dt/dx
    ///
    /// The upwind difference only needs the upstream neighbour, so the
    /// downstream edge takes the interior formula:
    /// `C'[e] = C[e] − |Co|·(C[e] − C[nb])`
    UpwindOutflow { courant: f64 },

    /// Pointwise exact decay, same as the interior
    ///
    /// `C'[e] = C[e]·factor`
    Decay { factor: f64 },
}

impl BoundaryCondition {
    /// New value of the `edge` point computed from the `prior` field
    ///
    /// # Panics
    ///
    /// Panics if `prior` has fewer than two points. Steppers only pass
    /// fields already checked against a [`Grid`](crate::physics::Grid).
    pub fn value(&self, prior: &[f64], edge: Edge) -> f64 {
        assert!(
            prior.len() >= 2,
            "Boundary rule needs at least 2 points, got {}",
            prior.len()
        );
        let (e, nb) = edge.indices(prior.len());

        match *self {
            BoundaryCondition::FixedInflow => prior[e],
            BoundaryCondition::ZeroGradientOutflow => prior[nb],
            BoundaryCondition::ZeroFluxDiffusion { diffusion_number } => {
                prior[e] + diffusion_number * (prior[nb] - prior[e])
            }
            BoundaryCondition::UpwindOutflow { courant } => {
                prior[e] - courant * (prior[e] - prior[nb])
            }
            BoundaryCondition::Decay { factor } => prior[e] * factor,
        }
    }

    /// Name used in logs and trajectory metadata
    pub fn name(&self) -> &'static str {
        match self {
            BoundaryCondition::FixedInflow => "fixed inflow",
            BoundaryCondition::ZeroGradientOutflow => "zero-gradient outflow",
            BoundaryCondition::ZeroFluxDiffusion { .. } => "zero-flux diffusion",
            BoundaryCondition::UpwindOutflow { .. } => "upwind outflow",
            BoundaryCondition::Decay { .. } => "exact decay",
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rules for both edges of one stepper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRules {
    pub left: BoundaryCondition,
    pub right: BoundaryCondition,
}

impl EdgeRules {
    pub fn new(left: BoundaryCondition, right: BoundaryCondition) -> Self {
        Self { left, right }
    }

    /// Rule for `edge`
    pub fn get(&self, edge: Edge) -> BoundaryCondition {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
