//! Exact first-order reaction
//!
//! Over one step the local ODE dC/dt = −k·C is solved in closed form:
//!
//! ```text
//! C'[i] = C[i]·exp(−k·dt)
//! ```
//!
//! The update is pointwise and the same at every index, edges included. It
//! is the exact solution of the sub-step, so there is no stability limit and
//! no truncation error in time.

use crate::physics::{ConcentrationField, PhysicalParameters};
use crate::solver::boundary::{BoundaryCondition, EdgeRules};

#[inline]
fn decay_factor(params: &PhysicalParameters, dt: f64) -> f64 {
    (-params.reaction_rate * dt).exp()
}

pub(super) fn rules(params: &PhysicalParameters, dt: f64) -> EdgeRules {
    let decay = BoundaryCondition::Decay {
        factor: decay_factor(params, dt),
    };
    EdgeRules::new(decay, decay)
}

pub(super) fn step(
    field: &ConcentrationField,
    params: &PhysicalParameters,
    dt: f64,
) -> ConcentrationField {
    let factor = decay_factor(params, dt);

    let mut next = field.clone();
    next.apply(|c| c * factor);
    next
}
