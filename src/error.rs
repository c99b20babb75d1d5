//! Error kinds
//!
//! Every error of this crate is a caller-configuration error detected at
//! setup time, before the first step is taken. Nothing here is transient, so
//! there is no retry policy: fix the input and call again.
//!
//! Numerical instability caused by a caller-chosen `dt` is not an error kind.
//! It shows up as growing or oscillating output, never as an `Err`. Obtain `dt` from [`choose_time_step`](crate::solver::choose_time_step)
//! to stay clear of it.

use thiserror::Error;

/// Errors reported while setting up a transport simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// Non-positive domain length or fewer than three grid points
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// Non-positive pulse width (or unusable pulse amplitude)
    #[error("Invalid shape parameter: {0}")]
    InvalidShapeParameter(String),

    /// Neither advection nor diffusion bounds the step and no explicit dt was given
    #[error(
        "Underconstrained time step: velocity and diffusion are both zero, \
         an explicit dt must be supplied"
    )]
    UnderconstrainedTimeStep,

    /// Physical parameter outside its admissible range
    #[error("Invalid physical parameter: {0}")]
    InvalidParameter(String),

    /// Safety factor outside ]0, 1]
    #[error("Invalid safety factor {0}: must lie in ]0, 1]")]
    InvalidSafetyFactor(f64),

    /// dt, step count or sampling stride unusable
    #[error("Invalid time step plan: {0}")]
    InvalidTimeStepPlan(String),

    /// Raw concentration value negative or not finite
    #[error("Invalid concentration at index {index}: {value}")]
    InvalidConcentration { index: usize, value: f64 },

    /// Field length does not match the number of grid points
    #[error("Size mismatch: expected {expected} points, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, TransportError>;
