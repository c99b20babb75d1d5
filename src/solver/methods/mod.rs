//! Time-marching methods
//!
//! This module contains concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! # Architecture
//!
//! The separation between the abstract solver interface (`solver::traits`) and
//! concrete implementations (`solver::methods`) keeps the interface stable:
//! a new method is a new file here, nothing else changes.
//!
//! # Available Methods
//!
//! - **[`ExplicitSolver`]**: repeated application of one explicit stepper
//!   - Order: first order in time, first (advection) or second (diffusion) order in space
//!   - Cost: one stencil sweep per step
//!   - Use: every scenario whose dt respects the stability policy
//!
//! # Performance Considerations
//!
//! The stencil sweep benefits from:
//! - **Rayon parallelization** (feature `parallel`) for large grids
//! - **Configurable threshold** via `set_parallel_threshold()`

mod explicit;

// Re-exports for convenience
pub use explicit::{ExplicitSolver, run};
