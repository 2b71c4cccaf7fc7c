//! Monotonic animation progress and phase classification
//!
//! Phase boundaries are expressed in progress, never in tick counts.

use crate::animation::easing::normalize;
use crate::io::configuration::{
    DEFAULT_CONVERGE_START, DEFAULT_LOCK_THRESHOLD, DEFAULT_SCATTER_START,
};
use crate::io::error::{MorphError, Result, invalid_parameter};
use std::fmt;

/// Disjoint sub-range of overall progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Particles rest at their origin
    Hold,
    /// Particles travel linearly to a random scatter point
    Scatter,
    /// Particles are pulled onto their target
    Converge,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hold => "hold",
            Self::Scatter => "scatter",
            Self::Converge => "converge",
        };
        f.write_str(name)
    }
}

/// Progress values at which phases begin, plus the converge lock point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseBoundaries {
    /// Progress at which scatter begins
    pub scatter_start: f64,
    /// Progress at which converge begins
    pub converge_start: f64,
    /// Local converge progress from which positions are locked to target
    pub lock_threshold: f64,
}

impl Default for PhaseBoundaries {
    fn default() -> Self {
        Self {
            scatter_start: DEFAULT_SCATTER_START,
            converge_start: DEFAULT_CONVERGE_START,
            lock_threshold: DEFAULT_LOCK_THRESHOLD,
        }
    }
}

impl PhaseBoundaries {
    /// Check that `0 <= scatter_start <= converge_start < 1` and the lock lies in `[0, 1]`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first offending boundary
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.scatter_start) {
            return Err(invalid_parameter(
                "scatter_start",
                &self.scatter_start,
                &"must lie in [0, 1]",
            ));
        }
        if !(self.scatter_start..1.0).contains(&self.converge_start) {
            return Err(invalid_parameter(
                "converge_start",
                &self.converge_start,
                &"must lie in [scatter_start, 1)",
            ));
        }
        if !(0.0..=1.0).contains(&self.lock_threshold) {
            return Err(invalid_parameter(
                "lock_threshold",
                &self.lock_threshold,
                &"must lie in [0, 1]",
            ));
        }
        Ok(())
    }

    /// Phase containing progress `p`
    pub fn phase_at(&self, p: f64) -> Phase {
        if p < self.scatter_start {
            Phase::Hold
        } else if p < self.converge_start {
            Phase::Scatter
        } else {
            Phase::Converge
        }
    }

    /// Progress within the phase containing `p`, in `[0, 1]`
    pub fn local_progress(&self, p: f64) -> f64 {
        match self.phase_at(p) {
            Phase::Hold => normalize(p, 0.0, self.scatter_start),
            Phase::Scatter => normalize(p, self.scatter_start, self.converge_start),
            Phase::Converge => normalize(p, self.converge_start, 1.0),
        }
    }
}

/// Derives progress `p = elapsed / duration` from externally supplied time
#[derive(Debug, Clone, Copy)]
pub struct SimulationClock {
    duration_ms: f64,
    last_elapsed_ms: Option<f64>,
}

impl SimulationClock {
    /// Create a clock for a run of `duration_ms`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the duration is zero
    pub fn new(duration_ms: u64) -> Result<Self> {
        if duration_ms == 0 {
            return Err(invalid_parameter(
                "animation_duration_ms",
                &duration_ms,
                &"must be positive",
            ));
        }
        Ok(Self {
            duration_ms: duration_ms as f64,
            last_elapsed_ms: None,
        })
    }

    /// Total run length in milliseconds
    pub const fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Elapsed time of the last accepted tick
    pub const fn last_elapsed_ms(&self) -> Option<f64> {
        self.last_elapsed_ms
    }

    /// Progress of the last accepted tick, 0 before any tick
    pub fn progress(&self) -> f64 {
        self.last_elapsed_ms
            .map_or(0.0, |elapsed| (elapsed / self.duration_ms).clamp(0.0, 1.0))
    }

    /// Accept a tick and return its progress
    ///
    /// Repeating the previous elapsed time is allowed; going backwards is not.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `elapsed_ms` is negative or not finite
    /// - `elapsed_ms` is smaller than the previous tick's
    pub fn advance(&mut self, elapsed_ms: f64) -> Result<f64> {
        if !elapsed_ms.is_finite() || elapsed_ms < 0.0 {
            return Err(invalid_parameter(
                "elapsed_ms",
                &elapsed_ms,
                &"must be a finite, non-negative number of milliseconds",
            ));
        }
        if let Some(previous_ms) = self.last_elapsed_ms
            && elapsed_ms < previous_ms
        {
            return Err(MorphError::OutOfOrderTick {
                previous_ms,
                received_ms: elapsed_ms,
            });
        }
        self.last_elapsed_ms = Some(elapsed_ms);
        Ok(self.progress())
    }
}
