//! The TA and student agent loops.
//!
//! Each loop runs on its own pool thread and only ever blocks in
//! [`TickClock::wait_tick`] or, for a sleeping TA, [`WakeSignal::wait`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use oh_core::{Minute, StudentId, StudentRng};
use oh_office::{Admission, Office, TaStep};
use tracing::{debug, info};

use crate::{TickClock, WakeReason, WakeSignal};

/// Everything the agents share.  Handed to each agent by reference.
pub(crate) struct Shared {
    pub office: Mutex<Office>,
    pub clock:  TickClock,
    pub wake:   WakeSignal,
}

impl Shared {
    pub fn lock_office(&self) -> MutexGuard<'_, Office> {
        self.office.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── TA ────────────────────────────────────────────────────────────────────────

pub(crate) struct TaAgent<'a> {
    pub shared: &'a Shared,
}

impl TaAgent<'_> {
    pub fn run(self) {
        let shared = self.shared;
        let mut seen = None;

        while let Some(now) = shared.clock.wait_tick(seen) {
            seen = Some(now);

            let mut office = shared.lock_office();
            let step = office.ta_on_tick(now);
            log_step(now, step);
            if step != TaStep::Sleep {
                drop(office);
                shared.clock.finish_tick();
                continue;
            }

            // Out of the barrier before the office lock is released: a student
            // can only see `Sleeping` once the TA no longer owes ticks.
            shared.clock.leave();
            drop(office);

            match shared.wake.wait() {
                WakeReason::Shutdown => {
                    let end = shared.clock.now();
                    shared.lock_office().ta_on_shutdown(end);
                    debug!(minute = end.0, "TA released by shutdown");
                    return;
                }
                WakeReason::Arrival => {
                    // The waking student rejoined us for this minute, so the
                    // driver cannot have moved on.
                    let now = shared.clock.now();
                    seen = Some(now);
                    let pulled = shared.lock_office().ta_on_wake(now);
                    info!(minute = now.0, "TA wakes up");
                    if let Some(student) = pulled {
                        info!(minute = now.0, %student, "TA starts helping");
                    }
                    shared.clock.finish_tick();
                }
            }
        }
        debug!("TA done");
    }
}

fn log_step(now: Minute, step: TaStep) {
    match step {
        TaStep::Sleep => info!(minute = now.0, "TA is sleeping"),
        TaStep::Started(student) => info!(minute = now.0, %student, "TA starts helping"),
        TaStep::Helping(_) => {}
        TaStep::Finished { done, next } => {
            info!(minute = now.0, student = %done, "finished and leaves");
            if let Some(student) = next {
                info!(minute = now.0, %student, "TA starts helping");
            }
        }
    }
}

// ── Student ───────────────────────────────────────────────────────────────────

pub(crate) struct StudentAgent<'a> {
    pub shared:  &'a Shared,
    pub id:      StudentId,
    pub arrival: Minute,
    pub rng:     StudentRng,
}

impl StudentAgent<'_> {
    pub fn run(mut self) {
        let shared = self.shared;
        let id = self.id;
        let mut seen = None;

        while let Some(now) = shared.clock.wait_tick(seen) {
            seen = Some(now);
            if now != self.arrival {
                shared.clock.finish_tick();
                continue;
            }

            let admission = shared.lock_office().student_arrive(id, now, &mut self.rng);
            match admission {
                Admission::Seated { wake_ta } => {
                    info!(minute = now.0, student = %id, "arrives and takes a seat");
                    if wake_ta {
                        info!(minute = now.0, student = %id, "wakes up TA");
                        shared.clock.rejoin();
                        shared.wake.notify(WakeReason::Arrival);
                    }
                    shared.clock.leave();
                    return;
                }
                Admission::Retry(at) => {
                    info!(minute = now.0, student = %id, retry_at = at.0, "hall is full, will retry");
                    self.arrival = at;
                    shared.clock.finish_tick();
                }
                Admission::GaveUp => {
                    info!(minute = now.0, student = %id, "hall is full and time is up, leaves");
                    shared.clock.leave();
                    return;
                }
            }
        }
    }
}
