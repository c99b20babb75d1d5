//! adr-rs: 1-D Pollutant Transport Engine
//!
//! Explicit finite-difference simulation of a dissolved pollutant carried
//! along an open channel:
//!
//! ```text
//! ∂C/∂t = −U·∂C/∂x + D·∂²C/∂x² − k·C
//! ```
//!
//! with U the mean flow velocity, D the longitudinal dispersion coefficient
//! and k a first-order decay rate.
//!
//! # Architecture
//!
//! adr-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - [`physics`]: grid, concentration field, coefficients (what the system is)
//!    - [`solver`]: steppers, stability policy, driver (how it is advanced)
//!
//! 2. **Validation against closed forms**
//!    - [`analytical`]: exact Gaussian-pulse solutions for each process alone,
//!      an approximate composite, and error norms
//!
//! # Quick Start
//!
//! ```rust
//! use adr_rs::prelude::*;
//!
//! // 1. Channel and pollutant
//! let grid = Grid::new(100.0, 200)?;
//! let params = PhysicalParameters::advection(1.0);
//! let initial = initial_gaussian_pulse(&grid, 1.0, 20.0, 5.0)?;
//!
//! // 2. Time step from the stability policy
//! let plan = TimeStepPlan::from_selection(&grid, &params, TimeStepSelection::default(), 100, 10)?;
//!
//! // 3. Run
//! let trajectory = run(&grid, &params, &initial, &plan)?;
//!
//! // 4. Compare with the exact translation
//! let reference = AnalyticalSolution::for_parameters(GaussianPulse::new(1.0, 20.0, 5.0)?, &params)
//!     .sample(&grid, plan.total_time())?;
//! let norms = ErrorNorms::compare(&trajectory.final_snapshot().field, &reference)?;
//! assert!(norms.linf < 0.15);
//! # Ok::<(), adr_rs::TransportError>(())
//! ```
//!
//! # Features
//!
//! - `parallel`: runs the per-step stencil on the rayon pool for grids larger
//!   than [`solver::parallel_threshold()`]
//!
//! # Logging
//!
//! The library logs through the [`log`] facade and never installs a logger.

// Core modules
pub mod analytical;
pub mod error;
pub mod physics;
pub mod solver;

pub use error::{Result, TransportError};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use adr_rs::prelude::*;
    //! ```
    pub use crate::analytical::{AnalyticalSolution, ErrorNorms, GaussianPulse};
    pub use crate::error::{Result, TransportError};
    pub use crate::physics::{ConcentrationField, Grid, PhysicalParameters, initial_gaussian_pulse};
    pub use crate::solver::{
        ExplicitSolver, Scenario, Solver, StabilityReport, Stepper, TimeStepPlan,
        TimeStepSelection, Trajectory, choose_time_step, run,
    };
}
