//! The hallway chairs and the TA's office chair.

use std::collections::VecDeque;

use oh_core::{Minute, StudentId};

// ── WaitingRoom ───────────────────────────────────────────────────────────────

/// Bounded FIFO of seated students.  `len() <= chairs()` always holds.
#[derive(Clone, Debug, Default)]
pub struct WaitingRoom {
    chairs: usize,
    queue:  VecDeque<StudentId>,
}

impl WaitingRoom {
    pub fn new(chairs: usize) -> Self {
        Self {
            chairs,
            queue: VecDeque::new(),
        }
    }

    /// Seat `student` at the back of the queue.
    ///
    /// Returns `false` (and leaves the room untouched) when every chair is
    /// taken.
    pub fn try_seat(&mut self, student: StudentId) -> bool {
        if self.is_full() {
            return false;
        }
        self.queue.push_back(student);
        true
    }

    /// Remove and return the student who sat down first.
    pub fn pop_front(&mut self) -> Option<StudentId> {
        self.queue.pop_front()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.queue.len() >= self.chairs
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn chairs(&self) -> usize {
        self.chairs
    }

    pub fn contains(&self, student: StudentId) -> bool {
        self.queue.contains(&student)
    }

    /// Seated students in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = StudentId> + '_ {
        self.queue.iter().copied()
    }
}

// ── ServiceSlot ───────────────────────────────────────────────────────────────

/// The student currently being helped and when help began.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Occupant {
    pub student: StudentId,
    pub started: Minute,
}

/// The single office chair.  Holds at most one [`Occupant`].
#[derive(Clone, Debug, Default)]
pub struct ServiceSlot(Option<Occupant>);

impl ServiceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `student` in the chair.
    ///
    /// # Panics
    /// Panics in debug mode if the chair is already taken.
    pub fn seat(&mut self, student: StudentId, started: Minute) {
        debug_assert!(self.0.is_none(), "office chair already occupied");
        self.0 = Some(Occupant { student, started });
    }

    /// Empty the chair, returning whoever was in it.
    pub fn vacate(&mut self) -> Option<Occupant> {
        self.0.take()
    }

    #[inline]
    pub fn occupant(&self) -> Option<Occupant> {
        self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}
