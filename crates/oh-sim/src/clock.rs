//! `TickClock` — the shared simulated clock and per-minute barrier.
//!
//! # Protocol
//!
//! The clock tracks how many agents currently take part in ticks
//! (`participants`) and how many of them still owe an acknowledgement for the
//! current minute (`pending`).
//!
//! - The driver releases a minute with [`start`][TickClock::start] or
//!   [`advance`][TickClock::advance].  Both first wait for `pending == 0`, so
//!   no participant can miss a minute, then broadcast to every waiter.
//! - An agent blocks in [`wait_tick`][TickClock::wait_tick] until a minute it
//!   has not seen yet is released, reacts, then calls
//!   [`finish_tick`][TickClock::finish_tick].
//! - An agent that stops taking ticks calls [`leave`][TickClock::leave]
//!   instead of `finish_tick`; that also settles its debt for the current
//!   minute.
//! - [`rejoin`][TickClock::rejoin] adds a participant that owes the current
//!   minute.  The student that wakes the TA calls it on the TA's behalf
//!   before acknowledging its own tick, which keeps the driver from moving on
//!   until the TA has handled its wake-up.
//! - [`shutdown`][TickClock::shutdown] waits for the last minute to settle,
//!   clears `running` and broadcasts once more so blocked agents return
//!   `None`.
//!
//! Agents compare against the last minute they saw rather than waiting for a
//! notification, so a broadcast issued before an agent reaches `wait_tick` is
//! never lost.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use oh_core::Minute;
use tracing::debug;

struct ClockState {
    minute:       Minute,
    started:      bool,
    running:      bool,
    participants: usize,
    pending:      usize,
}

/// Simulated minute counter plus the tick broadcast and settle barrier.
pub struct TickClock {
    state:   Mutex<ClockState>,
    /// Broadcast: a new minute was released, or the run ended.
    tick:    Condvar,
    /// Signalled when `pending` drops to zero.
    settled: Condvar,
}

impl TickClock {
    /// A stopped clock at minute 0 expecting `participants` agents.
    pub fn new(participants: usize) -> Self {
        Self {
            state: Mutex::new(ClockState {
                minute: Minute::ZERO,
                started: false,
                running: true,
                participants,
                pending: 0,
            }),
            tick:    Condvar::new(),
            settled: Condvar::new(),
        }
    }

    // ── Driver side ───────────────────────────────────────────────────────

    /// Release minute 0 to every participant.
    pub fn start(&self) {
        let mut st = self.lock();
        debug_assert!(!st.started, "clock started twice");
        st.started = true;
        st.pending = st.participants;
        debug!(participants = st.participants, "clock started");
        self.tick.notify_all();
    }

    /// Wait for the current minute to settle, then release the next one.
    pub fn advance(&self) -> Minute {
        let mut st = self.settle(self.lock());
        st.minute = st.minute.next();
        st.pending = st.participants;
        debug!(minute = st.minute.0, participants = st.participants, "tick");
        self.tick.notify_all();
        st.minute
    }

    /// Block until every participant has acknowledged the current minute.
    pub fn wait_settled(&self) {
        drop(self.settle(self.lock()));
    }

    /// Wait for the current minute to settle, stop the clock and release
    /// every agent still blocked in [`wait_tick`][Self::wait_tick].
    pub fn shutdown(&self) {
        let mut st = self.settle(self.lock());
        st.running = false;
        debug!(minute = st.minute.0, "clock stopped");
        self.tick.notify_all();
    }

    // ── Agent side ────────────────────────────────────────────────────────

    /// Block until a minute other than `last_seen` is released.
    ///
    /// Returns `None` once the clock has been shut down.
    pub fn wait_tick(&self, last_seen: Option<Minute>) -> Option<Minute> {
        let mut st = self.lock();
        loop {
            if !st.running {
                return None;
            }
            if st.started && Some(st.minute) != last_seen {
                return Some(st.minute);
            }
            st = self.tick.wait(st).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Acknowledge the current minute.
    pub fn finish_tick(&self) {
        let mut st = self.lock();
        self.release_one(&mut st);
    }

    /// Acknowledge the current minute and stop taking ticks.
    pub fn leave(&self) {
        let mut st = self.lock();
        st.participants -= 1;
        self.release_one(&mut st);
    }

    /// Add a participant that owes the current minute.
    pub fn rejoin(&self) {
        let mut st = self.lock();
        st.participants += 1;
        st.pending += 1;
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn now(&self) -> Minute {
        self.lock().minute
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    pub fn participants(&self) -> usize {
        self.lock().participants
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, ClockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn settle<'a>(&self, mut st: MutexGuard<'a, ClockState>) -> MutexGuard<'a, ClockState> {
        while st.pending > 0 {
            st = self.settled.wait(st).unwrap_or_else(PoisonError::into_inner);
        }
        st
    }

    fn release_one(&self, st: &mut ClockState) {
        debug_assert!(st.pending > 0, "acknowledged a minute that was not owed");
        st.pending -= 1;
        if st.pending == 0 {
            self.settled.notify_all();
        }
    }
}
