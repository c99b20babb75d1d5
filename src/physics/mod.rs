//! Physical description of the channel
//!
//! This module provides the data every numerical method works on:
//! - **Grid**: the discretized channel (length, points, spacing)
//! - **ConcentrationField**: the pollutant concentration at one time level
//! - **PhysicalParameters**: velocity, dispersion and reaction rate
//!
//! # Architecture
//!
//! Physics is kept **separate from numerics**, as in the rest of the crate:
//! - this module says WHAT the system is
//! - [`solver`](crate::solver) says HOW it is advanced in time
//!
//! # Example
//!
//! ```rust
//! use adr_rs::physics::{Grid, PhysicalParameters, initial_gaussian_pulse};
//!
//! let grid = Grid::new(100.0, 200)?;
//! let params = PhysicalParameters::new(1.0, 0.0, 0.0)?;
//! let pulse = initial_gaussian_pulse(&grid, 1.0, 20.0, 5.0)?;
//!
//! assert_eq!(pulse.len(), grid.points());
//! assert!(params.has_advection());
//! # Ok::<(), adr_rs::TransportError>(())
//! ```

pub mod field;
pub mod grid;
pub mod parameters;

pub use field::{ConcentrationField, initial_gaussian_pulse};
pub use grid::Grid;
pub use parameters::PhysicalParameters;
