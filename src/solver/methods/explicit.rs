//! Explicit time-marching driver
//!
//! # Algorithm
//!
//! ```text
//! C⁰ = initial field
//! Cⁿ⁺¹ = stepper(Cⁿ, U, D, k, dx, dt)     n = 0 … steps − 1
//! ```
//!
//! Every step builds a fresh field from the previous one; the previous one is
//! dropped unless it is sampled. Snapshot `n` carries the time `n·dt`,
//! computed from the index rather than accumulated.
//!
//! # Sampling
//!
//! The initial field is always stored. After that, a snapshot is kept every
//! `sampling_stride` steps, and the final step is always kept (once, even
//! when `steps` is a multiple of the stride).
//!
//! # Stability
//!
//! The driver never rejects a plan on stability grounds. When the plan's dt
//! breaks the limit of the scenario's stepper, a warning is logged and the
//! run proceeds; the same goes for the first non-finite value that appears.
//!
//! # Example
//!
//! ```rust
//! use adr_rs::physics::{Grid, PhysicalParameters, initial_gaussian_pulse};
//! use adr_rs::solver::{ExplicitSolver, Scenario, Solver, TimeStepPlan};
//!
//! let grid = Grid::new(10.0, 50)?;
//! let params = PhysicalParameters::diffusion(0.1);
//! let initial = initial_gaussian_pulse(&grid, 1.0, 5.0, 1.0)?;
//! let scenario = Scenario::new(grid, params, initial)?;
//!
//! let plan = TimeStepPlan::new(0.05, 40, 10)?;
//! let trajectory = ExplicitSolver::new().solve(&scenario, &plan)?;
//!
//! assert_eq!(trajectory.times(), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
//! # Ok::<(), adr_rs::TransportError>(())
//! ```

use log::{debug, info, warn};

use crate::error::Result;
use crate::physics::{ConcentrationField, Grid, PhysicalParameters};
use crate::solver::{Scenario, Snapshot, Solver, StabilityReport, TimeStepPlan, Trajectory};

/// Snapshots reserved up front; longer runs grow the buffer as they go
const MAX_PREALLOCATED_SNAPSHOTS: usize = 1024;

fn snapshot_capacity(plan: &TimeStepPlan) -> usize {
    plan.snapshot_count().min(MAX_PREALLOCATED_SNAPSHOTS)
}

// =================================================================================================
// Explicit Solver
// =================================================================================================

/// Repeated application of a [`Stepper`](crate::solver::Stepper)
///
/// Stateless: one instance can solve any number of scenarios.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitSolver;

impl ExplicitSolver {
    /// Create a new explicit solver
    ///
    /// # Example
    ///
    /// ```rust
    /// use adr_rs::solver::{ExplicitSolver, Solver};
    ///
    /// let solver = ExplicitSolver::new();
    /// assert_eq!(solver.name(), "Explicit Finite Difference");
    /// ```
    pub fn new() -> Self {
        Self
    }
}

impl Solver for ExplicitSolver {
    fn solve(&self, scenario: &Scenario, plan: &TimeStepPlan) -> Result<Trajectory> {
        // ====== Step 1: Validation ======

        plan.validate()?;
        scenario.validate()?;

        let grid = &scenario.grid;
        let params = &scenario.parameters;
        let stepper = scenario.stepper;
        let dx = grid.dx();
        let dt = plan.dt;

        let report = StabilityReport::assess(grid, params, dt);
        if !report.is_stable_for(stepper) {
            warn!(
                "{} with dt = {} is outside its stability limit ({}); expect oscillations",
                stepper, dt, report
            );
        }

        info!(
            "Running {}: {} points, dx = {}, dt = {}, {} steps, stride {}",
            stepper,
            grid.points(),
            dx,
            dt,
            plan.steps,
            plan.sampling_stride
        );

        // ====== Step 2: Setup ======

        let mut snapshots = Vec::with_capacity(snapshot_capacity(plan));
        snapshots.push(Snapshot {
            time: 0.0,
            field: scenario.initial.clone(),
        });

        let mut field = scenario.initial.clone();
        let mut blown_up = false;

        // ====== Step 3: Time marching ======

        for step in 1..=plan.steps {
            field = stepper.step(&field, params, dx, dt);

            if !blown_up && !field.is_finite() {
                blown_up = true;
                warn!(
                    "Non-finite concentration at step {} (t = {}): the run has diverged",
                    step,
                    step as f64 * dt
                );
            }

            if plan.is_sampled(step) {
                snapshots.push(Snapshot {
                    time: step as f64 * dt,
                    field: field.clone(),
                });
            }
        }

        debug!(
            "{} finished: {} snapshots, final mass = {}",
            stepper,
            snapshots.len(),
            field.total_mass(dx)
        );

        // ====== Step 4: Build Result ======

        let mut trajectory = Trajectory::new(snapshots);

        trajectory.add_metadata("solver", self.name());
        trajectory.add_metadata("stepper", stepper.name());
        trajectory.add_metadata("time steps", &plan.steps.to_string());
        trajectory.add_metadata("dt", &dt.to_string());
        trajectory.add_metadata("total time", &plan.total_time().to_string());
        trajectory.add_metadata("sampling stride", &plan.sampling_stride.to_string());

        Ok(trajectory)
    }

    fn name(&self) -> &'static str {
        "Explicit Finite Difference"
    }
}

/// Run a whole simulation in one call
///
/// Picks the stepper with [`Stepper::for_parameters`](crate::solver::Stepper::for_parameters)
/// and solves with [`ExplicitSolver`].
///
/// # Errors
///
/// - `SizeMismatch` when `initial` does not have one value per grid point
/// - `InvalidParameter` / `InvalidTimeStepPlan` from validation
pub fn run(
    grid: &Grid,
    params: &PhysicalParameters,
    initial: &ConcentrationField,
    plan: &TimeStepPlan,
) -> Result<Trajectory> {
    let scenario = Scenario::new(*grid, *params, initial.clone())?;
    ExplicitSolver::new().solve(&scenario, plan)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::physics::initial_gaussian_pulse;
    use crate::solver::Stepper;
    use approx::assert_relative_eq;

    fn pulse_scenario(params: PhysicalParameters) -> Scenario {
        let grid = Grid::new(20.0, 40).unwrap();
        let initial = initial_gaussian_pulse(&grid, 1.0, 10.0, 1.5).unwrap();
        Scenario::new(grid, params, initial).unwrap()
    }

    // ====== Solver Creation Tests ======

    #[test]
    fn test_solver_default() {
        let solver = ExplicitSolver::default();
        assert_eq!(solver.name(), "Explicit Finite Difference");
    }

    // ====== Sampling Tests ======

    #[test]
    fn test_stride_one_keeps_every_step() {
        let scenario = pulse_scenario(PhysicalParameters::advection(1.0));
        let plan = TimeStepPlan::new(0.1, 5, 1).unwrap();

        let trajectory = ExplicitSolver::new().solve(&scenario, &plan).unwrap();
        assert_eq!(trajectory.len(), 6);
        for (n, snapshot) in trajectory.iter().enumerate() {
            assert_eq!(snapshot.time, n as f64 * 0.1);
        }
    }

    #[test]
    fn test_final_step_is_always_kept() {
        let scenario = pulse_scenario(PhysicalParameters::advection(1.0));
        let plan = TimeStepPlan::new(0.1, 7, 3).unwrap();

        let trajectory = ExplicitSolver::new().solve(&scenario, &plan).unwrap();
        let times = trajectory.times();
        assert_eq!(times.len(), 4);
        assert_relative_eq!(times[1], 0.3, epsilon = 1e-15);
        assert_relative_eq!(times[2], 0.6, epsilon = 1e-15);
        assert_relative_eq!(times[3], 0.7, epsilon = 1e-15);
    }

    #[test]
    fn test_no_duplicate_final_snapshot() {
        let scenario = pulse_scenario(PhysicalParameters::advection(1.0));
        let plan = TimeStepPlan::new(0.1, 6, 3).unwrap();

        let trajectory = ExplicitSolver::new().solve(&scenario, &plan).unwrap();
        assert_eq!(trajectory.len(), plan.snapshot_count());
        assert_eq!(trajectory.len(), 3);
    }

    #[test]
    fn test_initial_snapshot_is_input() {
        let scenario = pulse_scenario(PhysicalParameters::diffusion(0.2));
        let plan = TimeStepPlan::new(0.1, 3, 1).unwrap();

        let trajectory = ExplicitSolver::new().solve(&scenario, &plan).unwrap();
        assert_eq!(trajectory.initial().field, scenario.initial);
    }

    // ====== Consistency Tests ======

    #[test]
    fn test_matches_manual_stepping() {
        let params = PhysicalParameters::new(0.8, 0.1, 0.05).unwrap();
        let scenario = pulse_scenario(params);
        let plan = TimeStepPlan::new(0.1, 4, 4).unwrap();

        let mut field = scenario.initial.clone();
        for _ in 0..4 {
            field = Stepper::Combined.step(&field, &params, scenario.grid.dx(), 0.1);
        }

        let trajectory = ExplicitSolver::new().solve(&scenario, &plan).unwrap();
        assert_eq!(trajectory.final_snapshot().field, field);
    }

    #[test]
    fn test_run_selects_stepper() {
        let grid = Grid::new(20.0, 40).unwrap();
        let initial = initial_gaussian_pulse(&grid, 1.0, 10.0, 1.5).unwrap();
        let plan = TimeStepPlan::new(0.1, 2, 1).unwrap();

        let trajectory = run(&grid, &PhysicalParameters::reaction(0.5), &initial, &plan).unwrap();
        assert_eq!(trajectory.metadata("stepper"), Some("Exact Reaction"));

        let expected = initial[20] * (-0.1f64).exp();
        assert_relative_eq!(trajectory.final_snapshot().field[20], expected, max_relative = 1e-12);
    }

    #[test]
    fn test_metadata() {
        let scenario = pulse_scenario(PhysicalParameters::advection(1.0));
        let plan = TimeStepPlan::new(0.25, 8, 2).unwrap();

        let trajectory = ExplicitSolver::new().solve(&scenario, &plan).unwrap();
        assert_eq!(trajectory.metadata("solver"), Some("Explicit Finite Difference"));
        assert_eq!(trajectory.metadata("stepper"), Some("Upwind Advection"));
        assert_eq!(trajectory.metadata("time steps"), Some("8"));
        assert_eq!(trajectory.metadata("dt"), Some("0.25"));
        assert_eq!(trajectory.metadata("total time"), Some("2"));
    }

    #[test]
    fn test_preallocation_is_capped() {
        let huge = TimeStepPlan::new(0.1, usize::MAX, 1).unwrap();
        assert_eq!(snapshot_capacity(&huge), MAX_PREALLOCATED_SNAPSHOTS);

        let small = TimeStepPlan::new(0.1, 100, 10).unwrap();
        assert_eq!(snapshot_capacity(&small), 11);
    }

    #[test]
    fn test_run_longer_than_preallocation() {
        let scenario = pulse_scenario(PhysicalParameters::reaction(0.01));
        let plan = TimeStepPlan::new(0.01, 1500, 1).unwrap();

        let trajectory = ExplicitSolver::new().solve(&scenario, &plan).unwrap();
        assert_eq!(trajectory.len(), 1501);
        assert_relative_eq!(trajectory.final_snapshot().time, 15.0, epsilon = 1e-12);
    }

    // ====== Failure Tests ======

    #[test]
    fn test_size_mismatch_is_rejected_by_run() {
        let grid = Grid::new(20.0, 40).unwrap();
        let initial = ConcentrationField::zeros(39);
        let plan = TimeStepPlan::new(0.1, 2, 1).unwrap();

        let result = run(&grid, &PhysicalParameters::advection(1.0), &initial, &plan);
        assert_eq!(
            result.err(),
            Some(TransportError::SizeMismatch {
                expected: 40,
                actual: 39
            })
        );
    }

    #[test]
    fn test_unstable_dt_still_runs() {
        // Co = 2: warned about, not rejected
        let scenario = pulse_scenario(PhysicalParameters::advection(1.0));
        let plan = TimeStepPlan::new(1.0, 10, 10).unwrap();

        let trajectory = ExplicitSolver::new().solve(&scenario, &plan).unwrap();
        assert_eq!(trajectory.len(), 2);
    }

    #[test]
    fn test_invalid_plan_fields_rejected() {
        let scenario = pulse_scenario(PhysicalParameters::advection(1.0));
        let plan = TimeStepPlan {
            dt: 0.1,
            steps: 0,
            sampling_stride: 1,
        };

        let result = ExplicitSolver::new().solve(&scenario, &plan);
        assert!(matches!(result, Err(TransportError::InvalidTimeStepPlan(_))));
    }
}
