//! Simulation observer trait for progress reporting.

use oh_core::{Minute, SimConfig};
use oh_office::OfficeSnapshot;

use crate::Summary;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] on the driver thread.
///
/// Hooks run between minutes, after every agent has acknowledged the minute
/// and before the next one is released, so the office they see is settled.
/// No simulation lock is held while a hook runs.
///
/// All methods have default no-op implementations.
///
/// # Example — snapshot printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_snapshot(&mut self, snapshot: &OfficeSnapshot) {
///         println!("{snapshot}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before any agent is released.
    fn on_start(&mut self, _config: &SimConfig) {}

    /// Called after each minute (including minute 0) settles.
    fn on_tick_end(&mut self, _minute: Minute) {}

    /// Called after each minute settles when `config.verbose` is set.
    fn on_snapshot(&mut self, _snapshot: &OfficeSnapshot) {}

    /// Called once after every agent has exited.
    fn on_sim_end(&mut self, _summary: &Summary) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
