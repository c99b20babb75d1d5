//! Combined advection-diffusion-reaction step
//!
//! # Mathematical Background
//!
//! The three terms are added in a single explicit update, all evaluated from
//! the same prior field (no fractional-step splitting):
//!
//! ```text
//! C'[i] = C[i]
//!       + [−Co·(C[i] − C[i−1])]                  advection, Co = U·dt/dx
//!       + [d·(C[i+1] − 2·C[i] + C[i−1])]         diffusion, d = D·dt/dx²
//!       + [−k·dt·C[i]]                           reaction (explicit)
//!
//! C'[0]   = C[0]       (fixed inflow)
//! C'[N−1] = C[N−2]     (zero-gradient outflow)
//! ```
//!
//! For U < 0 the advective difference takes the right neighbour and the edge
//! roles swap: the right edge is the fixed inflow, the left edge copies C[1].
//!
//! # Stability
//!
//! Because the terms share one prior field, the step must satisfy the
//! advective and diffusive limits at once: |Co| + 2d ≤ 1. Choosing
//! `dt = safety·min(dx/|U|, dx²/(2D))` with safety ≤ 0.5 guarantees it. The
//! reaction term adds no bound of its own in that rule.
//!
//! # Consistency with the isolated steppers
//!
//! With D = 0 and k = 0 the interior values are bit-for-bit those of the
//! advection stepper; with U = 0 and k = 0 they are those of the diffusion
//! stepper. The edges are not: the right edge is a plain zero-gradient copy,
//! not the one-sided flux rule of the diffusion stepper.

use crate::physics::{ConcentrationField, PhysicalParameters};
use crate::solver::boundary::{BoundaryCondition, EdgeRules};

use super::apply_stencil;

pub(super) fn rules(params: &PhysicalParameters) -> EdgeRules {
    if params.velocity >= 0.0 {
        EdgeRules::new(
            BoundaryCondition::FixedInflow,
            BoundaryCondition::ZeroGradientOutflow,
        )
    } else {
        EdgeRules::new(
            BoundaryCondition::ZeroGradientOutflow,
            BoundaryCondition::FixedInflow,
        )
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
    let d = params.diffusion_number(dx, dt);
    let k_dt = params.reaction_rate * dt;
    let forward = params.velocity >= 0.0;

    apply_stencil(c, rules, |i| {
        let advective = if forward {
            -courant * (c[i] - c[i - 1])
        } else {
            -courant * (c[i + 1] - c[i])
        };
        let diffusive = d * (c[i + 1] - 2.0 * c[i] + c[i - 1]);
        let reactive = -k_dt * c[i];

        c[i] + advective + diffusive + reactive
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Stepper;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_interior_update() {
        let field = ConcentrationField::from_vec(vec![1.0, 2.0, 4.0, 3.0]).unwrap();
        let params = PhysicalParameters::new(1.0, 0.5, 0.1).unwrap();

        // dx = 1, dt = 0.5: Co = 0.5, d = 0.25, k·dt = 0.05
        let next = Stepper::Combined.step(&field, &params, 1.0, 0.5);

        let expected_1 = 2.0 - 0.5 * (2.0 - 1.0) + 0.25 * (4.0 - 4.0 + 1.0) - 0.05 * 2.0;
        let expected_2 = 4.0 - 0.5 * (4.0 - 2.0) + 0.25 * (3.0 - 8.0 + 2.0) - 0.05 * 4.0;
        assert_relative_eq!(next[1], expected_1);
        assert_relative_eq!(next[2], expected_2);
    }

    #[test]
    fn test_edges() {
        let field = ConcentrationField::from_vec(vec![1.0, 2.0, 4.0, 3.0]).unwrap();
        let params = PhysicalParameters::new(1.0, 0.5, 0.1).unwrap();

        let next = Stepper::Combined.step(&field, &params, 1.0, 0.5);
        assert_eq!(next[0], 1.0);
        assert_eq!(next[3], 4.0);
    }

    #[test]
    fn test_edges_swap_for_negative_velocity() {
        let field = ConcentrationField::from_vec(vec![1.0, 2.0, 4.0, 3.0]).unwrap();
        let params = PhysicalParameters::new(-1.0, 0.5, 0.0).unwrap();

        let next = Stepper::Combined.step(&field, &params, 1.0, 0.5);
        assert_eq!(next[0], 2.0);
        assert_eq!(next[3], 3.0);
    }

    #[test]
    fn test_reaction_term_is_explicit() {
        let field = ConcentrationField::uniform(5, 1.0).unwrap();
        let params = PhysicalParameters::new(0.0, 0.0, 0.2).unwrap();

        let next = Stepper::Combined.step(&field, &params, 1.0, 0.5);
        // 1 − 0.2·0.5, not exp(−0.1)
        assert_relative_eq!(next[2], 0.9);
    }
}
