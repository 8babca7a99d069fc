//! Simulation time model and run configuration.
//!
//! # Design
//!
//! Time is a monotonically increasing `Minute` counter advanced by the tick
//! driver.  There is no mapping to wall-clock time: the driver may pace ticks
//! with `tick_interval_ms`, but nothing in the simulation reads the real
//! clock.
//!
//! A run observes every minute in `0..=total_minutes`.  Minute 0 is released
//! by the start broadcast; each of the `total_minutes` ticks then advances the
//! counter by one.

use std::fmt;

use crate::{OhError, OhResult};

// ── Minute ────────────────────────────────────────────────────────────────────

/// An absolute simulated minute.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Minute(pub u64);

impl Minute {
    pub const ZERO: Minute = Minute(0);

    /// The minute directly after `self`.
    #[inline]
    pub fn next(self) -> Minute {
        Minute(self.0 + 1)
    }

    /// Minutes elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Minute) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Minute {
    type Output = Minute;
    #[inline]
    fn add(self, rhs: u64) -> Minute {
        Minute(self.0 + rhs)
    }
}

impl fmt::Display for Minute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T={}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically assembled by the application from CLI flags, a JSON file or an
/// interactive prompt, then handed to the simulation builder.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Waiting-room capacity.  Zero is legal: nobody can ever sit down.
    pub chairs: usize,

    /// Number of students created at setup.
    pub students: usize,

    /// Number of ticks issued after the start broadcast.  Must be at least 1.
    pub total_minutes: u64,

    /// Emit a per-tick office snapshot.
    pub verbose: bool,

    /// Master RNG seed.  The same seed always draws the same students.
    pub seed: u64,

    /// Inclusive `(min, max)` range for question durations, in minutes.
    pub question_minutes: (u64, u64),

    /// Real milliseconds the driver pauses before each tick.  0 = no pacing.
    pub tick_interval_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            chairs:           3,
            students:         5,
            total_minutes:    60,
            verbose:          false,
            seed:             42,
            question_minutes: (1, 5),
            tick_interval_ms: 0,
        }
    }
}

impl SimConfig {
    /// The last observable minute; arrivals are drawn from `0..=closing`.
    #[inline]
    pub fn closing(&self) -> Minute {
        Minute(self.total_minutes)
    }

    /// Reject configurations that cannot start a run.
    pub fn validate(&self) -> OhResult<()> {
        if self.total_minutes == 0 {
            return Err(OhError::Config(
                "simulation length must be at least 1 minute".into(),
            ));
        }
        let (lo, hi) = self.question_minutes;
        if lo == 0 {
            return Err(OhError::Config(
                "question duration must be at least 1 minute".into(),
            ));
        }
        if lo > hi {
            return Err(OhError::Config(format!(
                "question duration range {lo}..={hi} is empty"
            )));
        }
        if u32::try_from(self.students).is_err() {
            return Err(OhError::Config(format!(
                "student count {} exceeds the id space",
                self.students
            )));
        }
        Ok(())
    }
}

// ── SetupParams ───────────────────────────────────────────────────────────────

/// Raw operator input, before range checks.
///
/// Counts are signed so that a negative entry from a prompt or file is
/// reported as a configuration error rather than a parse failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetupParams {
    pub chairs:        i64,
    pub students:      i64,
    pub total_minutes: i64,
    pub verbose:       bool,
}

impl TryFrom<SetupParams> for SimConfig {
    type Error = OhError;

    fn try_from(p: SetupParams) -> OhResult<SimConfig> {
        let chairs = usize::try_from(p.chairs)
            .map_err(|_| OhError::Config(format!("chair count {} is negative", p.chairs)))?;
        let students = usize::try_from(p.students)
            .map_err(|_| OhError::Config(format!("student count {} is negative", p.students)))?;
        if p.total_minutes <= 0 {
            return Err(OhError::Config(format!(
                "simulation length {} is not positive",
                p.total_minutes
            )));
        }
        let config = SimConfig {
            chairs,
            students,
            total_minutes: p.total_minutes as u64,
            verbose: p.verbose,
            ..SimConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}
