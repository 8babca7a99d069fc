//! `OfficeSnapshot` — a copy of the visible office state at one minute.

use std::fmt;

use oh_core::{Minute, StudentId};

use crate::TaStatus;

/// What a per-tick report shows: the TA, the office chair, and the hallway
/// in seating order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OfficeSnapshot {
    pub minute:     Minute,
    pub ta:         TaStatus,
    pub in_service: Option<StudentId>,
    pub waiting:    Vec<StudentId>,
    pub chairs:     usize,
}

impl OfficeSnapshot {
    pub fn empty_chairs(&self) -> usize {
        self.chairs.saturating_sub(self.waiting.len())
    }
}

/// Multi-line block: TA state, office chair `[S3]` or `[ ]`, and hallway
/// chairs padded with `[  ]` up to capacity.
impl fmt::Display for OfficeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=============================")?;
        writeln!(f, "Time: {}", self.minute.0)?;
        writeln!(f, "TA state: {}", self.ta)?;
        match self.in_service {
            Some(id) => writeln!(f, "Current Office Chair: [{id}]")?,
            None     => writeln!(f, "Current Office Chair: [ ]")?,
        }
        write!(f, "Current Hallway Chairs: ")?;
        for id in &self.waiting {
            write!(f, "[{id}]")?;
        }
        for _ in 0..self.empty_chairs() {
            write!(f, "[  ]")?;
        }
        Ok(())
    }
}
