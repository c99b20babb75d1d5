//! Solver traits and configuration types
//!
//! # Design Philosophy
//!
//! - `TimeStepSelection` says how dt is obtained (fixed by the caller, or
//!   derived from the stability policy)
//! - `TimeStepPlan` is the resolved configuration: dt, step count, sampling stride
//! - `Trajectory` is what a solve returns: time-ordered snapshots plus metadata
//! - `Solver` is the interface every time-marching method implements

use std::collections::HashMap;

use crate::error::{Result, TransportError};
use crate::physics::{ConcentrationField, Grid, PhysicalParameters};
use crate::solver::scenario::Scenario;
use crate::solver::stability::{DEFAULT_SAFETY_FACTOR, choose_time_step};

// =================================================================================================
// Time step selection
// =================================================================================================

/// How the time step is obtained
///
/// # Examples
///
/// ```rust
/// use adr_rs::physics::{Grid, PhysicalParameters};
/// use adr_rs::solver::TimeStepSelection;
///
/// let grid = Grid::new(5.0, 10)?;
///
/// // From the stability policy
/// let policy = TimeStepSelection::stability_limited(0.5);
/// assert_eq!(policy.resolve(&grid, &PhysicalParameters::advection(1.0))?, 0.25);
///
/// // Supplied by the caller: the only option for a pure reaction
/// let fixed = TimeStepSelection::Fixed(0.1);
/// assert_eq!(fixed.resolve(&grid, &PhysicalParameters::reaction(0.3))?, 0.1);
/// # Ok::<(), adr_rs::TransportError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeStepSelection {
    /// Caller-chosen dt [s], used as-is
    ///
    /// Stability is then the caller's responsibility.
    Fixed(f64),

    /// dt = safety_factor · min(dx/|U|, dx²/(2D))
    StabilityLimited { safety_factor: f64 },
}

impl Default for TimeStepSelection {
    fn default() -> Self {
        Self::StabilityLimited {
            safety_factor: DEFAULT_SAFETY_FACTOR,
        }
    }
}

impl TimeStepSelection {
    pub fn stability_limited(safety_factor: f64) -> Self {
        Self::StabilityLimited { safety_factor }
    }

    /// Validate the selection on its own (no grid needed)
    pub fn validate(&self) -> Result<()> {
        match *self {
            TimeStepSelection::Fixed(dt) => {
                if !dt.is_finite() || dt <= 0.0 {
                    return Err(TransportError::InvalidTimeStepPlan(format!(
                        "time step must be positive, got {}",
                        dt
                    )));
                }
                Ok(())
            }
            TimeStepSelection::StabilityLimited { safety_factor } => {
                if !safety_factor.is_finite() || safety_factor <= 0.0 || safety_factor > 1.0 {
                    return Err(TransportError::InvalidSafetyFactor(safety_factor));
                }
                Ok(())
            }
        }
    }

    /// Resolve to a concrete dt
    ///
    /// # Errors
    ///
    /// `UnderconstrainedTimeStep` for a stability-limited selection when U
    /// and D are both zero, plus the validation errors above.
    pub fn resolve(&self, grid: &Grid, params: &PhysicalParameters) -> Result<f64> {
        self.validate()?;
        match *self {
            TimeStepSelection::Fixed(dt) => Ok(dt),
            TimeStepSelection::StabilityLimited { safety_factor } => {
                choose_time_step(grid, params, safety_factor)
            }
        }
    }
}

// =================================================================================================
// Time step plan
// =================================================================================================

/// Resolved time-marching configuration
///
/// # Fields
///
/// - `dt` [s] > 0
/// - `steps` > 0: number of steps to take
/// - `sampling_stride` ≥ 1: a snapshot is stored every `sampling_stride`
///   steps, plus the final one
///
/// Recompute the plan whenever the grid or the parameters change.
///
/// # Example
///
/// ```rust
/// use adr_rs::physics::{Grid, PhysicalParameters};
/// use adr_rs::solver::{TimeStepPlan, TimeStepSelection};
///
/// let grid = Grid::new(100.0, 200)?;
/// let params = PhysicalParameters::advection(1.0);
///
/// let plan = TimeStepPlan::from_selection(&grid, &params, TimeStepSelection::default(), 100, 10)?;
/// assert_eq!(plan.dt, 0.25);
/// assert_eq!(plan.total_time(), 25.0);
/// # Ok::<(), adr_rs::TransportError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeStepPlan {
    /// Time step [s]
    pub dt: f64,

    /// Number of steps
    pub steps: usize,

    /// Steps between two stored snapshots
    pub sampling_stride: usize,
}

impl TimeStepPlan {
    /// Create a validated plan from an explicit dt
    pub fn new(dt: f64, steps: usize, sampling_stride: usize) -> Result<Self> {
        let plan = Self {
            dt,
            steps,
            sampling_stride,
        };
        plan.validate()?;
        Ok(plan)
    }

    /// Create a plan whose dt comes from `selection`
    pub fn from_selection(
        grid: &Grid,
        params: &PhysicalParameters,
        selection: TimeStepSelection,
        steps: usize,
        sampling_stride: usize,
    ) -> Result<Self> {
        let dt = selection.resolve(grid, params)?;
        Self::new(dt, steps, sampling_stride)
    }

    /// Create a plan covering `total_time` seconds
    ///
    /// The step count is rounded up and dt shrunk so that `steps · dt`
    /// lands exactly on `total_time`; the shrunken dt stays within the
    /// stability limit of the selection.
    pub fn for_duration(
        grid: &Grid,
        params: &PhysicalParameters,
        selection: TimeStepSelection,
        total_time: f64,
        sampling_stride: usize,
    ) -> Result<Self> {
        if !total_time.is_finite() || total_time <= 0.0 {
            return Err(TransportError::InvalidTimeStepPlan(format!(
                "total time must be positive, got {}",
                total_time
            )));
        }

        let max_dt = selection.resolve(grid, params)?;
        let steps = (total_time / max_dt).ceil().max(1.0) as usize;
        Self::new(total_time / steps as f64, steps, sampling_stride)
    }

    /// Validate that the plan can be executed
    pub fn validate(&self) -> Result<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(TransportError::InvalidTimeStepPlan(format!(
                "time step must be positive, got {}",
                self.dt
            )));
        }
        if self.steps == 0 {
            return Err(TransportError::InvalidTimeStepPlan(
                "step count must be greater than 0".to_string(),
            ));
        }
        if self.sampling_stride == 0 {
            return Err(TransportError::InvalidTimeStepPlan(
                "sampling stride must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Simulated time steps · dt [s]
    pub fn total_time(&self) -> f64 {
        self.steps as f64 * self.dt
    }

    /// Number of snapshots a run will store (initial and final included)
    ///
    /// Saturates at `usize::MAX` for plans too long to store every sample.
    pub fn snapshot_count(&self) -> usize {
        let sampled = self.steps / self.sampling_stride;
        let final_extra = usize::from(self.steps % self.sampling_stride != 0);
        sampled.saturating_add(1).saturating_add(final_extra)
    }

    /// Whether the state after `step` steps is stored
    #[inline]
    pub fn is_sampled(&self, step: usize) -> bool {
        step % self.sampling_stride == 0 || step == self.steps
    }
}

// =================================================================================================
// Trajectory
// =================================================================================================

/// One stored time level
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Time [s]
    pub time: f64,

    /// Field at that time
    pub field: ConcentrationField,
}

/// Time-ordered snapshots produced by a solve
///
/// Always holds the initial state (t = 0) first and the final step last.
/// Read-only once returned.
#[derive(Debug, Clone)]
pub struct Trajectory {
    snapshots: Vec<Snapshot>,
    metadata: HashMap<String, String>,
}

impl Trajectory {
    /// Build from snapshots already sorted by time
    ///
    /// # Panics
    ///
    /// Panics when `snapshots` is empty.
    pub(crate) fn new(snapshots: Vec<Snapshot>) -> Self {
        assert!(!snapshots.is_empty(), "A trajectory holds at least the initial state");
        Self {
            snapshots,
            metadata: HashMap::new(),
        }
    }

    pub(crate) fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Metadata entry (solver, stepper, dt, steps, ...)
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: the initial state is always stored
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// All snapshots, in time order
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    /// Snapshot at t = 0
    pub fn initial(&self) -> &Snapshot {
        &self.snapshots[0]
    }

    /// Snapshot after the last step
    pub fn final_snapshot(&self) -> &Snapshot {
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Snapshot times [s]
    pub fn times(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.time).collect()
    }

    /// Snapshot closest to `time`
    pub fn nearest(&self, time: f64) -> &Snapshot {
        self.snapshots
            .iter()
            .min_by(|a, b| (a.time - time).abs().total_cmp(&(b.time - time).abs()))
            .unwrap_or_else(|| self.initial())
    }

    /// Total mass dx·Σ C of every snapshot
    pub fn mass_history(&self, dx: f64) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.field.total_mass(dx)).collect()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// Interface for time-marching methods
///
/// A solver takes WHAT to solve (a [`Scenario`]) and HOW to march (a
/// [`TimeStepPlan`]) and returns the [`Trajectory`].
///
/// # Errors
///
/// Implementations validate everything before the first step and return
/// without partial results on failure.
pub trait Solver {
    fn solve(&self, scenario: &Scenario, plan: &TimeStepPlan) -> Result<Trajectory>;

    /// Name of the method (used to display and logging)
    fn name(&self) -> &str;
}

// =================================================================================================
// Tests
// =================================================================================================
