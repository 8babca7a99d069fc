//! `oh-core` — foundational types for the office-hours simulation.
//!
//! This crate is a dependency of every other `oh-*` crate.  It has no `oh-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                        |
//! |-----------|-------------------------------------------------|
//! | [`ids`]   | `StudentId`                                     |
//! | [`time`]  | `Minute`, `SimConfig`, `SetupParams`            |
//! | [`rng`]   | `StudentRng` (per-student), `SimRng` (setup)    |
//! | [`error`] | `OhError`, `OhResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, time and config.   |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{OhError, OhResult};
pub use ids::StudentId;
pub use rng::{SimRng, StudentRng};
pub use time::{Minute, SetupParams, SimConfig};
