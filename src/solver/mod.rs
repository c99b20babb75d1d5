//! Numerical solvers
//!
//! This module turns a concentration field at time t into the field at
//! t + dt, and repeats that to build a trajectory.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Grid, coefficients U / D / k, initial field
//!    - The stepper that advances the field
//!
//! 2. **Plan** (`TimeStepPlan`) - HOW to march
//!    - Time step, from the caller or from the stability policy
//!    - Step count and sampling stride
//!
//! 3. **Solver** (`Solver` trait) - The method
//!    - Applies the stepper repeatedly
//!    - Returns a `Trajectory`
//!
//! # Module Organization
//!
//! - **`steppers`**: one-step operators (`Stepper`)
//! - **`boundary`**: edge rules used by the steppers
//! - **`stability`**: `choose_time_step` and `StabilityReport`
//! - **`traits`**: `Solver`, `TimeStepSelection`, `TimeStepPlan`, `Trajectory`
//! - **`scenario`**: `Scenario`
//! - **`methods`**: `ExplicitSolver` and the `run` shortcut
//!
//! # Quick Start Example
//!
//! ```rust
//! use adr_rs::physics::{Grid, PhysicalParameters, initial_gaussian_pulse};
//! use adr_rs::solver::{TimeStepPlan, TimeStepSelection, run};
//!
//! // 1. Problem (WHAT)
//! let grid = Grid::new(100.0, 200)?;
//! let params = PhysicalParameters::new(1.0, 0.1, 0.0)?;
//! let initial = initial_gaussian_pulse(&grid, 1.0, 20.0, 5.0)?;
//!
//! // 2. Plan (HOW)
//! let plan = TimeStepPlan::from_selection(&grid, &params, TimeStepSelection::default(), 100, 10)?;
//!
//! // 3. Solve
//! let trajectory = run(&grid, &params, &initial, &plan)?;
//! assert_eq!(trajectory.len(), 11);
//! # Ok::<(), adr_rs::TransportError>(())
//! ```
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌──────────┐  ┌────────────┐  ┌───────────────┐
//! │   Grid   │  │ Parameters │  │ Initial field │
//! └────┬─────┘  └─────┬──────┘  └───────┬───────┘
//!      └──────────────┼─────────────────┘
//!            ┌────────▼────────┐
//!            │    Scenario     │ ← WHAT to solve
//!            └────────┬────────┘
//!            ┌────────▼────────┐
//!            │  TimeStepPlan   │ ← HOW (stability policy)
//!            └────────┬────────┘
//!            ┌────────▼────────┐
//!            │ ExplicitSolver  │ ← Stepper, repeated
//!            └────────┬────────┘
//!            ┌────────▼────────┐
//!            │   Trajectory    │ ← Snapshots + metadata
//!            └─────────────────┘
//! ```
//!
//! # Error Handling
//!
//! Everything returns [`crate::Result`]; errors are raised before the first
//! step. Numerical blow-up is not an error: it is logged with `warn!` and the
//! run completes.

// =================================================================================================
// Module Declarations
// =================================================================================================
mod boundary;
mod methods;
mod scenario;
mod stability;
mod steppers;
mod traits;

// =================================================================================================
// Parallel Stencil Threshold
// =================================================================================================
//
// A stencil sweep costs a handful of flops per point, so rayon only pays off
// on long channels. The cut-over is a process-wide atomic: benches and tests
// move it at runtime, and steppers read it once per step.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Fields with more than 999 points are swept on the rayon pool by default
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Largest field, in points, that steppers still sweep sequentially
///
/// Only consulted with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use adr_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Change the point count above which steppers go parallel
///
/// `usize::MAX` keeps every sweep sequential.
///
/// # Panics
///
/// Panics when `threshold` is 0.
///
/// # Example
///
/// ```rust
/// use adr_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(usize::MAX);
/// assert_eq!(parallel_threshold(), usize::MAX);
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Test-only override of the threshold, undone on drop
///
/// Holds a global lock for its lifetime, so unit tests that move the
/// threshold run one at a time.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(threshold: usize) -> Self {
        let lock = THRESHOLD_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(threshold);
        Self {
            previous,
            _lock: lock,
        }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{Snapshot, Solver, TimeStepPlan, TimeStepSelection, Trajectory};

pub use boundary::{BoundaryCondition, Edge, EdgeRules};
pub use scenario::Scenario;
pub use stability::{
    COMBINED_SAFETY_LIMIT, DEFAULT_SAFETY_FACTOR, StabilityReport, advective_bound,
    choose_time_step, diffusive_bound,
};
pub use steppers::Stepper;

pub use methods::{ExplicitSolver, run};

// =================================================================================================
// Tests
// =================================================================================================
