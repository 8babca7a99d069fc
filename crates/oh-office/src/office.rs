//! `Office` — the state shared by the TA agent and every student agent.
//!
//! Each public `&mut self` method is one atomic transition.  Callers that
//! share an `Office` between threads must hold one lock across the whole
//! call; that is what makes a vacate-and-refill indivisible for arriving
//! students.

use oh_core::{Minute, StudentId, StudentRng};

use crate::{
    OfficeSnapshot, ServiceSlot, Student, StudentState, TaState, TaStatus, TaStep, WaitingRoom,
};

/// Result of a student trying to sit in the hallway.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Admission {
    /// Took a chair.  `wake_ta` is set for exactly one arrival per nap: that
    /// student must deliver the wake signal.
    Seated { wake_ta: bool },
    /// Hallway full; try again at the given minute.
    Retry(Minute),
    /// Hallway full and no minute left to retry in.
    GaveUp,
}

/// Hallway, office chair, TA flag, nap bookkeeping and the student table.
pub struct Office {
    room:           WaitingRoom,
    slot:           ServiceSlot,
    ta:             TaState,
    /// Set by the first seated student of a nap; cleared when the TA wakes.
    wake_requested: bool,
    nap_started:    Option<Minute>,
    nap_minutes:    u64,
    closing:        Minute,
    students:       Vec<Student>,
}

impl Office {
    /// `closing` is the last observable minute; students indexed by id.
    pub fn new(chairs: usize, closing: Minute, students: Vec<Student>) -> Self {
        debug_assert!(
            students.iter().enumerate().all(|(i, s)| s.id.index() == i),
            "students must be indexed by id"
        );
        Self {
            room: WaitingRoom::new(chairs),
            slot: ServiceSlot::new(),
            ta: TaState::Available,
            wake_requested: false,
            nap_started: None,
            nap_minutes: 0,
            closing,
            students,
        }
    }

    // ── TA transitions ────────────────────────────────────────────────────

    /// The TA's reaction to minute `now`.
    ///
    /// - chair occupied and question answered → release the occupant and pull
    ///   the next hallway student in within the same call;
    /// - chair occupied otherwise → keep helping;
    /// - chair empty, hallway not → pull the head of the hallway;
    /// - both empty → fall asleep (returns [`TaStep::Sleep`]).
    pub fn ta_on_tick(&mut self, now: Minute) -> TaStep {
        debug_assert_eq!(self.ta, TaState::Available, "sleeping TA received a tick");

        if let Some(occ) = self.slot.occupant() {
            let needed = self.students[occ.student.index()].question_duration;
            if now.since(occ.started) < needed {
                return TaStep::Helping(occ.student);
            }
            self.slot.vacate();
            let s = &mut self.students[occ.student.index()];
            s.state = StudentState::Helped;
            s.turnaround_time = Some(now.since(s.arrival_minute));
            let next = self.begin_service(now);
            return TaStep::Finished { done: occ.student, next };
        }

        match self.begin_service(now) {
            Some(student) => TaStep::Started(student),
            None => {
                self.ta = TaState::Sleeping;
                self.nap_started = Some(now);
                TaStep::Sleep
            }
        }
    }

    /// The TA was woken by an arriving student at minute `now`.
    ///
    /// Closes the nap, marks the TA available and pulls the head of the
    /// hallway in immediately.
    pub fn ta_on_wake(&mut self, now: Minute) -> Option<StudentId> {
        self.end_nap(now);
        self.ta = TaState::Available;
        self.wake_requested = false;
        self.begin_service(now)
    }

    /// The TA was released from its nap by shutdown at minute `now`.  The
    /// final nap segment still counts towards nap time.
    pub fn ta_on_shutdown(&mut self, now: Minute) {
        self.end_nap(now);
    }

    // ── Student transitions ───────────────────────────────────────────────

    /// Student `id` walks up to the hallway at minute `now`.
    ///
    /// On a full hallway the new attempt is drawn uniformly from
    /// `now+1..=closing` using the student's own RNG; with no minute left the
    /// student gives up.
    pub fn student_arrive(&mut self, id: StudentId, now: Minute, rng: &mut StudentRng) -> Admission {
        debug_assert_eq!(self.students[id.index()].state, StudentState::Scheduled);

        if self.room.try_seat(id) {
            self.students[id.index()].state = StudentState::Waiting;
            let wake_ta = self.ta == TaState::Sleeping && !self.wake_requested;
            if wake_ta {
                self.wake_requested = true;
            }
            return Admission::Seated { wake_ta };
        }

        let next = if now.next() > self.closing {
            self.closing.next()
        } else {
            Minute(rng.range(now.0 + 1, self.closing.0))
        };
        let s = &mut self.students[id.index()];
        s.arrival_minute = next;
        s.retries += 1;
        if next > self.closing {
            s.state = StudentState::GivenUp;
            Admission::GaveUp
        } else {
            Admission::Retry(next)
        }
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn ta_state(&self) -> TaState {
        self.ta
    }

    pub fn room(&self) -> &WaitingRoom {
        &self.room
    }

    pub fn slot(&self) -> &ServiceSlot {
        &self.slot
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn student(&self, id: StudentId) -> &Student {
        &self.students[id.index()]
    }

    /// Total completed nap minutes.
    pub fn nap_minutes(&self) -> u64 {
        self.nap_minutes
    }

    /// Give up the student table once the run is over.
    pub fn into_students(self) -> Vec<Student> {
        self.students
    }

    /// Read-only projection for per-tick reporting.
    pub fn snapshot(&self, minute: Minute) -> OfficeSnapshot {
        let ta = match (self.ta, self.slot.occupant()) {
            (TaState::Sleeping, _)        => TaStatus::Sleeping,
            (TaState::Available, Some(_)) => TaStatus::Helping,
            (TaState::Available, None)    => TaStatus::Available,
        };
        OfficeSnapshot {
            minute,
            ta,
            in_service: self.slot.occupant().map(|o| o.student),
            waiting:    self.room.iter().collect(),
            chairs:     self.room.chairs(),
        }
    }

    /// Structural invariants: hallway within capacity, nobody both seated and
    /// in the office chair, states agree with positions, and a sleeping TA
    /// leaves the office chair empty.
    pub fn is_consistent(&self) -> bool {
        if self.room.len() > self.room.chairs() {
            return false;
        }
        let in_chair = self.slot.occupant().map(|o| o.student);
        if let Some(id) = in_chair {
            if self.room.contains(id) || self.students[id.index()].state != StudentState::InService {
                return false;
            }
        }
        if self.ta == TaState::Sleeping && in_chair.is_some() {
            return false;
        }
        self.students.iter().all(|s| match s.state {
            StudentState::Waiting   => self.room.contains(s.id),
            StudentState::InService => in_chair == Some(s.id),
            _ => !self.room.contains(s.id) && in_chair != Some(s.id),
        })
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn begin_service(&mut self, now: Minute) -> Option<StudentId> {
        let id = self.room.pop_front()?;
        let s = &mut self.students[id.index()];
        s.state = StudentState::InService;
        s.wait_time = Some(now.since(s.arrival_minute));
        self.slot.seat(id, now);
        Some(id)
    }

    fn end_nap(&mut self, now: Minute) {
        if let Some(start) = self.nap_started.take() {
            self.nap_minutes += now.since(start);
        }
    }
}
