//! `oh-sim` — the concurrent office-hours run.
//!
//! # Threads
//!
//! ```text
//! driver (caller's thread)       TA agent              student agents (×N)
//! ─────────────────────────      ────────────────      ─────────────────────
//! start → minute 0  ──────────▶  wait_tick             wait_tick
//!                                ta_on_tick            student_arrive (at arrival)
//!                                  └ Sleep → leave       └ Seated + TA asleep →
//!                                    wait WakeSignal ◀──── rejoin + notify(Arrival)
//! wait_settled                   finish_tick           finish_tick / leave
//! observer hooks
//! advance → minute 1 … total
//! shutdown + notify(Shutdown)
//! ```
//!
//! Agents run on a dedicated [`rayon`] pool with exactly one worker per agent.
//! All office mutation goes through one `Mutex<Office>`; the tick barrier and
//! the TA's wake signal each have their own lock/condvar pair.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use oh_core::SimConfig;
//! use oh_sim::{NoopObserver, SimBuilder};
//!
//! let sim = SimBuilder::new(config).build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! println!("helped {} of {}", report.summary.helped, report.summary.total_students);
//! ```

mod agent;
pub mod builder;
pub mod clock;
pub mod error;
pub mod observer;
pub mod sim;
pub mod stats;
pub mod wake;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use clock::TickClock;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, SimReport};
pub use stats::Summary;
pub use wake::{WakeReason, WakeSignal};
