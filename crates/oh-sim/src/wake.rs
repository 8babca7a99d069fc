//! `WakeSignal` — the TA's dedicated sleep/wake handshake.
//!
//! A binary semaphore carrying a reason.  At most one wake is stored; a
//! stored wake is consumed by exactly one [`WakeSignal::wait`].  `Shutdown`
//! overrides a stored `Arrival` so the TA can always tell a closing office
//! from a student at the door.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WakeReason {
    /// A student sat down in the hallway while the TA was asleep.
    Arrival,
    /// The driver is stopping the run.
    Shutdown,
}

#[derive(Default)]
pub struct WakeSignal {
    pending: Mutex<Option<WakeReason>>,
    cv:      Condvar,
}

impl WakeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `reason` and release the sleeper, if any.
    pub fn notify(&self, reason: WakeReason) {
        let mut pending = self.lock();
        if *pending != Some(WakeReason::Shutdown) {
            *pending = Some(reason);
        }
        self.cv.notify_one();
    }

    /// Block until a wake is stored, then consume it.
    pub fn wait(&self) -> WakeReason {
        let mut pending = self.lock();
        loop {
            if let Some(reason) = pending.take() {
                return reason;
            }
            pending = self.cv.wait(pending).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Consume a stored wake without blocking.
    pub fn try_take(&self) -> Option<WakeReason> {
        self.lock().take()
    }

    fn lock(&self) -> MutexGuard<'_, Option<WakeReason>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
