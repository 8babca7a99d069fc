//! `oh-office` — the shared office state and its state machines.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`student`]  | `Student` record, `StudentState`                            |
//! | [`room`]     | `WaitingRoom` (bounded FIFO), `ServiceSlot`, `Occupant`     |
//! | [`ta`]       | `TaState`, `TaStatus`, `TaStep`                             |
//! | [`office`]   | `Office` — every transition of both state machines          |
//! | [`snapshot`] | `OfficeSnapshot` — read-only per-tick projection            |
//!
//! # Design notes
//!
//! Nothing in this crate blocks or spawns.  Every transition is a plain
//! `&mut Office` method that runs to completion, so the caller decides how
//! the office is shared.  `oh-sim` wraps one `Office` in a single `Mutex`
//! shared by the TA agent and all student agents; tests call the same
//! methods in a hand-picked order to pin down intra-tick scheduling.

pub mod office;
pub mod room;
pub mod snapshot;
pub mod student;
pub mod ta;


pub use office::{Admission, Office};
pub use room::{Occupant, ServiceSlot, WaitingRoom};
pub use snapshot::OfficeSnapshot;
pub use student::{Student, StudentState};
pub use ta::{TaState, TaStatus, TaStep};
