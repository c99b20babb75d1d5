//! Explicit central-difference diffusion
//!
//! # Mathematical Background
//!
//! ```text
//! ∂C/∂t = D·∂²C/∂x²
//!
//! C'[i] = C[i] + d·(C[i+1] − 2·C[i] + C[i−1]),   d = D·dt/dx²,   1 ≤ i ≤ N−2
//! C'[0]   = C[0]   + d·(C[1]   − C[0])            (zero flux)
//! C'[N−1] = C[N−1] + d·(C[N−2] − C[N−1])          (zero flux)
//! ```
//!
//! The edge rules are the interior stencil with the missing outside
//! neighbour mirrored, so the discrete mass dx·Σ C is conserved exactly.
//!
//! # Stability
//!
//! d ≤ 0.5, the classical explicit parabolic limit. Under it, every new value
//! is a convex combination of its prior neighbours.

use crate::physics::{ConcentrationField, PhysicalParameters};
use crate::solver::boundary::{BoundaryCondition, EdgeRules};

use super::apply_stencil;

pub(super) fn rules(params: &PhysicalParameters, dx: f64, dt: f64) -> EdgeRules {
    let zero_flux = BoundaryCondition::ZeroFluxDiffusion {
        diffusion_number: params.diffusion_number(dx, dt),
    };
    EdgeRules::new(zero_flux, zero_flux)
}

pub(super) fn step(
    field: &ConcentrationField,
    params: &PhysicalParameters,
    rules: EdgeRules,
    dx: f64,
    dt: f64,
) -> ConcentrationField {
    let c = field.as_slice();
    let d = params.diffusion_number(dx, dt);

    apply_stencil(c, rules, |i| {
        c[i] + d * (c[i + 1] - 2.0 * c[i] + c[i - 1])
    })
}
