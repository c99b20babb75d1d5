//! Simulation scenario definition
//!
//! A scenario combines a grid, the transport coefficients, an initial field
//! and the stepper that advances it.

use crate::error::{Result, TransportError};
use crate::physics::{ConcentrationField, Grid, PhysicalParameters};
use crate::solver::Stepper;

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Domain discretization (grid)
/// - Physical coefficients (U, D, k)
/// - Initial concentration profile
/// - Operator stepper
///
/// # Design
///
/// This is the "WHAT to solve"; the [`TimeStepPlan`](crate::solver::TimeStepPlan)
/// says "HOW", and the same scenario can be solved with several plans.
///
/// # Examples
///
/// ```rust
/// use adr_rs::physics::{Grid, PhysicalParameters, initial_gaussian_pulse};
/// use adr_rs::solver::{Scenario, Stepper};
///
/// let grid = Grid::new(100.0, 200)?;
/// let params = PhysicalParameters::new(1.0, 0.1, 0.0)?;
/// let initial = initial_gaussian_pulse(&grid, 1.0, 20.0, 5.0)?;
///
/// let scenario = Scenario::new(grid, params, initial)?;
/// assert_eq!(scenario.stepper, Stepper::Combined);
/// # Ok::<(), adr_rs::TransportError>(())
/// ```
#[derive(Clone)]
pub struct Scenario {
    /// Spatial grid
    pub grid: Grid,

    /// Transport coefficients
    pub parameters: PhysicalParameters,

    /// Field at t = 0
    pub initial: ConcentrationField,

    /// Stepper applied at every time step
    pub stepper: Stepper,
}

impl Scenario {
    /// Create a scenario whose stepper follows the active terms of `parameters`
    pub fn new(grid: Grid, parameters: PhysicalParameters, initial: ConcentrationField) -> Result<Self> {
        let stepper = Stepper::for_parameters(&parameters);
        Self::with_stepper(grid, parameters, initial, stepper)
    }

    /// Create a scenario with an explicit stepper
    ///
    /// Terms the stepper does not model are ignored: an `Advection`
    /// scenario with D > 0 does not diffuse.
    pub fn with_stepper(
        grid: Grid,
        parameters: PhysicalParameters,
        initial: ConcentrationField,
        stepper: Stepper,
    ) -> Result<Self> {
        let scenario = Self {
            grid,
            parameters,
            initial,
            stepper,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Verifying scenario content (coefficients and field size)
    pub fn validate(&self) -> Result<()> {
        self.parameters.validate()?;

        if self.initial.len() != self.grid.points() {
            return Err(TransportError::SizeMismatch {
                expected: self.grid.points(),
                actual: self.initial.len(),
            });
        }
        Ok(())
    }

    /// Total mass of the initial field
    pub fn initial_mass(&self) -> f64 {
        self.initial.total_mass(self.grid.dx())
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("stepper", &self.stepper.name())
            .field("length", &self.grid.length())
            .field("points", &self.grid.points())
            .field("dx", &self.grid.dx())
            .field("parameters", &self.parameters)
            .field("initial mass", &self.initial_mass())
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
