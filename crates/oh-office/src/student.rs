//! Per-student record.

use oh_core::{Minute, StudentId};

/// Where a student is in its lifecycle.
///
/// ```text
/// Scheduled ──seated──▶ Waiting ──pulled by TA──▶ InService ──done──▶ Helped
///     │  ▲
///     │  └── hall full, time left: new arrival minute
///     └───── hall full, no time left ──▶ GivenUp
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StudentState {
    /// Coding; will try the hallway at `arrival_minute`.
    Scheduled,
    /// Sitting in the hallway.
    Waiting,
    /// In the TA's office chair.
    InService,
    Helped,
    GivenUp,
}

/// One student.
///
/// `id` and `question_duration` never change.  `arrival_minute` is rewritten
/// on every failed attempt; the timing fields are filled in by the TA side of
/// the office.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Student {
    pub id:                StudentId,
    /// Minutes of help needed once in the office chair.
    pub question_duration: u64,
    /// Minute of the current (or last) attempt to sit in the hallway.
    pub arrival_minute:    Minute,
    pub state:             StudentState,
    /// `service start − arrival`, set when the TA pulls the student in.
    pub wait_time:         Option<u64>,
    /// `completion − arrival`, set when help ends.
    pub turnaround_time:   Option<u64>,
    /// Times the student found the hallway full.
    pub retries:           u32,
}

impl Student {
    pub fn new(id: StudentId, question_duration: u64, arrival_minute: Minute) -> Self {
        Self {
            id,
            question_duration,
            arrival_minute,
            state:           StudentState::Scheduled,
            wait_time:       None,
            turnaround_time: None,
            retries:         0,
        }
    }

    #[inline]
    pub fn helped(&self) -> bool {
        self.state == StudentState::Helped
    }
}
