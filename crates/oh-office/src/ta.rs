//! TA state and the outcome of one TA tick.

use std::fmt;

use oh_core::StudentId;

/// The TA's own state flag.  Written only by the TA side of the office;
/// read by arriving students to decide whether to send a wake signal.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum TaState {
    #[default]
    Available,
    Sleeping,
}

/// What an observer sees: `Available` split by whether the office chair is
/// occupied.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TaStatus {
    Sleeping,
    Helping,
    Available,
}

impl fmt::Display for TaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaStatus::Sleeping  => "sleeping",
            TaStatus::Helping   => "helping",
            TaStatus::Available => "available",
        })
    }
}

/// Result of [`Office::ta_on_tick`][crate::Office::ta_on_tick].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TaStep {
    /// Office chair and hallway both empty: the TA is now sleeping and must
    /// block on its wake signal instead of the next tick.
    Sleep,
    /// The office chair was empty; the head of the hallway was pulled in.
    Started(StudentId),
    /// The occupant still needs more time.
    Helping(StudentId),
    /// `done` finished this minute.  `next` is the student pulled into the
    /// freed chair in the same minute, if anyone was waiting.
    Finished {
        done: StudentId,
        next: Option<StudentId>,
    },
}
