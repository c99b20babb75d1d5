//! Integration tests: steppers + stability policy + driver
//!
//! These tests verify the physical behaviour of each process when run
//! through the public driver.

use adr_rs::TransportError;
use adr_rs::physics::{ConcentrationField, PhysicalParameters};
use adr_rs::solver::{
    DEFAULT_SAFETY_FACTOR, ExplicitSolver, Scenario, Solver, Stepper, TimeStepPlan,
    TimeStepSelection, choose_time_step, parallel_threshold, run, set_parallel_threshold,
};
use approx::assert_relative_eq;

mod common;
use common::{pulse_channel, relative_error};

// =================================================================================================
// Advection
// =================================================================================================

#[test]
fn test_advection_moves_center_of_mass_by_u_dt() {
    let (grid, initial) = pulse_channel(100.0, 200, 30.0, 3.0);
    let params = PhysicalParameters::advection(1.0);
    let plan = TimeStepPlan::from_selection(&grid, &params, TimeStepSelection::default(), 40, 1).unwrap();

    let trajectory = run(&grid, &params, &initial, &plan).unwrap();
    let start = initial.center_of_mass(&grid).unwrap();

    for (n, snapshot) in trajectory.iter().enumerate() {
        let center = snapshot.field.center_of_mass(&grid).unwrap();
        let expected = start + n as f64 * params.velocity * plan.dt;
        assert!(
            (center - expected).abs() < 1e-9,
            "step {}: center {} expected {}",
            n, center, expected
        );
    }
}

#[test]
fn test_advection_conserves_mass() {
    let (grid, initial) = pulse_channel(100.0, 200, 30.0, 3.0);
    let params = PhysicalParameters::advection(1.0);
    let plan = TimeStepPlan::from_selection(&grid, &params, TimeStepSelection::default(), 40, 5).unwrap();

    let trajectory = run(&grid, &params, &initial, &plan).unwrap();
    let masses = trajectory.mass_history(grid.dx());

    for mass in &masses {
        assert_relative_eq!(*mass, masses[0], max_relative = 1e-12);
    }
}

#[test]
fn test_negative_velocity_moves_upstream() {
    let (grid, initial) = pulse_channel(100.0, 200, 70.0, 3.0);
    let params = PhysicalParameters::advection(-2.0);
    let plan = TimeStepPlan::from_selection(&grid, &params, TimeStepSelection::default(), 40, 40).unwrap();

    let trajectory = run(&grid, &params, &initial, &plan).unwrap();
    let start = initial.center_of_mass(&grid).unwrap();
    let end = trajectory.final_snapshot().field.center_of_mass(&grid).unwrap();

    // 40 steps of 0.125 s at -2 m/s
    assert!((end - (start - 10.0)).abs() < 1e-9);
}

// =================================================================================================
// Diffusion
// =================================================================================================

#[test]
fn test_diffusion_conserves_mass_and_lowers_peak() {
    let (grid, initial) = pulse_channel(100.0, 200, 50.0, 3.0);
    let params = PhysicalParameters::diffusion(1.0);
    let plan = TimeStepPlan::from_selection(&grid, &params, TimeStepSelection::default(), 200, 1).unwrap();

    // d = 0.25
    assert_relative_eq!(params.diffusion_number(grid.dx(), plan.dt), 0.25);

    let trajectory = run(&grid, &params, &initial, &plan).unwrap();
    let mass0 = initial.total_mass(grid.dx());

    for pair in trajectory.snapshots().windows(2) {
        let (before, after) = (&pair[0].field, &pair[1].field);
        assert!(
            after.max() < before.max(),
            "max did not decrease at t = {}",
            pair[1].time
        );
        assert_relative_eq!(after.total_mass(grid.dx()), mass0, max_relative = 1e-12);
    }
}

#[test]
fn test_diffusion_keeps_center_fixed() {
    let (grid, initial) = pulse_channel(100.0, 200, 50.0, 3.0);
    let params = PhysicalParameters::diffusion(0.5);
    let plan = TimeStepPlan::from_selection(&grid, &params, TimeStepSelection::default(), 100, 100).unwrap();

    let trajectory = run(&grid, &params, &initial, &plan).unwrap();
    let start = initial.center_of_mass(&grid).unwrap();
    let end = trajectory.final_snapshot().field.center_of_mass(&grid).unwrap();
    assert!((end - start).abs() < 1e-9);
}

// =================================================================================================
// Reaction
// =================================================================================================

#[test]
fn test_reaction_is_exact_at_every_step() {
    let (grid, initial) = pulse_channel(100.0, 200, 50.0, 5.0);
    let params = PhysicalParameters::reaction(0.3);
    let plan = TimeStepPlan::from_selection(&grid, &params, TimeStepSelection::Fixed(0.1), 50, 1).unwrap();

    let trajectory = run(&grid, &params, &initial, &plan).unwrap();
    assert_eq!(trajectory.metadata("stepper"), Some("Exact Reaction"));

    for snapshot in &trajectory {
        let factor = (-params.reaction_rate * snapshot.time).exp();
        for i in 0..grid.points() {
            assert_relative_eq!(snapshot.field[i], initial[i] * factor, max_relative = 1e-12);
        }
    }
}

#[test]
fn test_reaction_needs_explicit_time_step() {
    let (grid, _) = pulse_channel(100.0, 200, 50.0, 5.0);
    let params = PhysicalParameters::reaction(0.3);

    let result = TimeStepPlan::from_selection(&grid, &params, TimeStepSelection::default(), 50, 1);
    assert_eq!(result, Err(TransportError::UnderconstrainedTimeStep));
}

// =================================================================================================
// Combined
// =================================================================================================

fn rough_field() -> ConcentrationField {
    ConcentrationField::from_vec(vec![0.3, 1.7, 0.2, 2.9, 0.05, 1.1, 0.8, 0.0, 4.2, 0.6]).unwrap()
}

#[test]
fn test_combined_equals_advection_on_interior() {
    let field = rough_field();
    let n = field.len();

    for velocity in [0.7, -0.7] {
        let params = PhysicalParameters::advection(velocity);
        let combined = Stepper::Combined.step(&field, &params, 0.5, 0.3);
        let advection = Stepper::Advection.step(&field, &params, 0.5, 0.3);

        assert_eq!(
            &combined.as_slice()[1..n - 1],
            &advection.as_slice()[1..n - 1],
            "U = {}",
            velocity
        );
    }
}

#[test]
fn test_combined_equals_diffusion_on_interior() {
    let field = rough_field();
    let n = field.len();
    let params = PhysicalParameters::diffusion(0.4);

    let combined = Stepper::Combined.step(&field, &params, 0.5, 0.1);
    let diffusion = Stepper::Diffusion.step(&field, &params, 0.5, 0.1);

    assert_eq!(&combined.as_slice()[1..n - 1], &diffusion.as_slice()[1..n - 1]);
}

#[test]
fn test_combined_edges_differ_from_diffusion_edges() {
    let field = rough_field();
    let n = field.len();
    let params = PhysicalParameters::diffusion(0.4);

    let combined = Stepper::Combined.step(&field, &params, 0.5, 0.1);
    let diffusion = Stepper::Diffusion.step(&field, &params, 0.5, 0.1);

    // Zero-gradient copy versus one-sided zero flux
    assert_eq!(combined[n - 1], field[n - 2]);
    assert_ne!(combined[n - 1], diffusion[n - 1]);
    assert_eq!(combined[0], field[0]);
}

#[test]
fn test_combined_mass_is_non_increasing_with_decay() {
    let (grid, initial) = pulse_channel(100.0, 200, 40.0, 4.0);
    let params = PhysicalParameters::new(0.5, 0.2, 0.05).unwrap();
    let plan = TimeStepPlan::from_selection(&grid, &params, TimeStepSelection::default(), 200, 1).unwrap();

    let trajectory = run(&grid, &params, &initial, &plan).unwrap();
    assert_eq!(trajectory.metadata("stepper"), Some("Combined ADR"));

    let masses = trajectory.mass_history(grid.dx());
    for pair in masses.windows(2) {
        assert!(pair[1] <= pair[0], "mass grew from {} to {}", pair[0], pair[1]);
    }
}

// =================================================================================================
// Stability policy
// =================================================================================================

#[test]
fn test_choose_time_step_reference_values() {
    let (grid, _) = pulse_channel(5.0, 10, 2.5, 0.5);
    assert_eq!(grid.dx(), 0.5);

    let dt = choose_time_step(&grid, &PhysicalParameters::advection(1.0), 0.5).unwrap();
    assert_relative_eq!(dt, 0.25);

    let dt = choose_time_step(&grid, &PhysicalParameters::diffusion(2.0), 0.25).unwrap();
    assert_relative_eq!(dt, 0.25 * 0.25 / (2.0 * 2.0));

    let result = choose_time_step(&grid, &PhysicalParameters::default(), DEFAULT_SAFETY_FACTOR);
    assert_eq!(result, Err(TransportError::UnderconstrainedTimeStep));
}

// =================================================================================================
// End-to-end
// =================================================================================================

#[test]
fn test_end_to_end_pulse_transport() {
    let (grid, initial) = pulse_channel(100.0, 200, 20.0, 5.0);
    let params = PhysicalParameters::advection(1.0);
    let dt = choose_time_step(&grid, &params, DEFAULT_SAFETY_FACTOR).unwrap();
    let plan = TimeStepPlan::new(dt, 100, 10).unwrap();

    let trajectory = run(&grid, &params, &initial, &plan).unwrap();
    assert_eq!(trajectory.len(), 11);
    assert_relative_eq!(trajectory.final_snapshot().time, 100.0 * dt);

    let final_field = &trajectory.final_snapshot().field;
    let expected_position = 20.0 + 100.0 * dt;
    let peak_position = final_field.peak_position(&grid);

    assert!(
        (peak_position - expected_position).abs() <= grid.dx(),
        "peak at {} expected {}",
        peak_position, expected_position
    );

    // First-order upwind smears the pulse a little
    let amplitude = final_field.max();
    assert!(amplitude > 0.85 && amplitude <= 1.0, "amplitude {}", amplitude);
    assert!(relative_error(amplitude, 1.0) < 0.15);
}

#[test]
fn test_solver_and_run_agree() {
    let (grid, initial) = pulse_channel(50.0, 100, 15.0, 3.0);
    let params = PhysicalParameters::new(0.8, 0.3, 0.01).unwrap();
    let plan = TimeStepPlan::from_selection(&grid, &params, TimeStepSelection::default(), 60, 7).unwrap();

    let scenario = Scenario::new(grid, params, initial.clone()).unwrap();
    let from_solver = ExplicitSolver::new().solve(&scenario, &plan).unwrap();
    let from_run = run(&grid, &params, &initial, &plan).unwrap();

    assert_eq!(from_solver.times(), from_run.times());
    assert_eq!(from_solver.final_snapshot(), from_run.final_snapshot());
}

#[test]
fn test_parallel_threshold_does_not_change_results() {
    let (grid, initial) = pulse_channel(100.0, 400, 40.0, 4.0);
    let params = PhysicalParameters::new(1.0, 0.2, 0.01).unwrap();
    let plan = TimeStepPlan::from_selection(&grid, &params, TimeStepSelection::default(), 50, 50).unwrap();

    let previous = parallel_threshold();

    set_parallel_threshold(usize::MAX);
    let sequential = run(&grid, &params, &initial, &plan).unwrap();

    set_parallel_threshold(16);
    let maybe_parallel = run(&grid, &params, &initial, &plan).unwrap();

    set_parallel_threshold(previous);

    assert_eq!(
        sequential.final_snapshot().field,
        maybe_parallel.final_snapshot().field
    );
}
