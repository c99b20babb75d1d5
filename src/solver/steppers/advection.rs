//! First-order upwind advection
//!
//! # Mathematical Background
//!
//! ```text
//! ∂C/∂t = −U·∂C/∂x
//! ```
//!
//! The spatial derivative is taken from the upstream side, which for U ≥ 0 is
//! the left neighbour:
//!
//! ```text
//! C'[i] = C[i] − Co·(C[i] − C[i−1]),   Co = U·dt/dx,   i ≥ 1
//! C'[0] = C[0]                          (fixed inflow)
//! ```
//!
//! For U < 0 the scheme is mirrored: the difference uses the right neighbour
//! and the right edge becomes the fixed inflow.
//!
//! # Characteristics
//!
//! - **Order**: first order in space and time
//! - **Stability**: |Co| ≤ 1
//! - **Monotone**: no new extrema, at the cost of a numerical diffusion
//!   |U|·dx·(1 − |Co|)/2 that widens a transported pulse

use crate::physics::{ConcentrationField, PhysicalParameters};
use crate::solver::boundary::{BoundaryCondition, EdgeRules};

use super::apply_stencil;

pub(super) fn rules(params: &PhysicalParameters, dx: f64, dt: f64) -> EdgeRules {
    let outflow = BoundaryCondition::UpwindOutflow {
        courant: params.courant_number(dx, dt).abs(),
    };

    if params.velocity >= 0.0 {
        EdgeRules::new(BoundaryCondition::FixedInflow, outflow)
    } else {
        EdgeRules::new(outflow, BoundaryCondition::FixedInflow)
    }
}

pub(super) fn step(
    field: &ConcentrationField,
    params: &PhysicalParameters,
    rules: EdgeRules,
    dx: f64,
    dt: f64,
) -> ConcentrationField {
    let c = field.as_slice();
    let courant = params.courant_number(dx, dt);

    if params.velocity >= 0.0 {
        apply_stencil(c, rules, |i| c[i] - courant * (c[i] - c[i - 1]))
    } else {
        apply_stencil(c, rules, |i| c[i] - courant * (c[i + 1] - c[i]))
    }
}
