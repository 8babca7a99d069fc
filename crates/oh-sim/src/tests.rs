//! Tests for oh-sim: the synchronisation primitives on their own, then whole
//! threaded runs.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use oh_core::{Minute, SimConfig, StudentId};
use oh_office::{OfficeSnapshot, Student, StudentState, TaStatus};

use crate::{NoopObserver, SimBuilder, SimError, SimObserver, SimReport, Summary, TickClock};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(chairs: usize, students: usize, total_minutes: u64) -> SimConfig {
    SimConfig {
        chairs,
        students,
        total_minutes,
        verbose: true,
        ..SimConfig::default()
    }
}

/// `(question_duration, arrival_minute)` per student.
fn fixed(plan: &[(u64, u64)]) -> Vec<Student> {
    plan
        .iter()
        .enumerate()
        .map(|(i, &(q, a))| Student::new(StudentId(i as u32), q, Minute(a)))
        .collect()
}

fn run_fixed(chairs: usize, total_minutes: u64, plan: &[(u64, u64)]) -> SimReport {
    SimBuilder::new(config(chairs, plan.len(), total_minutes))
        .students(fixed(plan))
        .build()
        .unwrap()
        .run(&mut NoopObserver)
        .unwrap()
}

/// Records every hook and checks office invariants on each snapshot.
#[derive(Default)]
struct Recorder {
    starts:    usize,
    ticks:     Vec<Minute>,
    snapshots: Vec<OfficeSnapshot>,
    summary:   Option<Summary>,
}

impl SimObserver for Recorder {
    fn on_start(&mut self, _config: &SimConfig) {
        self.starts += 1;
    }

    fn on_tick_end(&mut self, minute: Minute) {
        self.ticks.push(minute);
    }

    fn on_snapshot(&mut self, snapshot: &OfficeSnapshot) {
        assert!(
            snapshot.waiting.len() <= snapshot.chairs,
            "hallway over capacity at {}",
            snapshot.minute
        );
        let unique: HashSet<_> = snapshot.waiting.iter().collect();
        assert_eq!(unique.len(), snapshot.waiting.len(), "student seated twice");
        if let Some(id) = snapshot.in_service {
            assert!(!snapshot.waiting.contains(&id), "{id} both seated and in service");
        }
        self.snapshots.push(snapshot.clone());
    }

    fn on_sim_end(&mut self, summary: &Summary) {
        self.summary = Some(summary.clone());
    }
}

fn assert_final_invariants(report: &SimReport) {
    for s in &report.students {
        assert_ne!(s.state, StudentState::Scheduled, "{} never resolved", s.id);
        if s.helped() {
            let wait = s.wait_time.expect("helped student without wait time");
            let turnaround = s.turnaround_time.expect("helped student without turnaround");
            assert!(turnaround >= wait + s.question_duration, "{} finished too early", s.id);
        }
        if s.state == StudentState::GivenUp {
            assert!(s.wait_time.is_none());
            assert!(s.retries > 0);
        }
    }
}

// ── TickClock ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod clock_tests {
    use super::*;

    #[test]
    fn minute_zero_released_by_start() {
        let clock = TickClock::new(1);
        clock.start();
        assert_eq!(clock.wait_tick(None), Some(Minute(0)));
        clock.finish_tick();
        assert_eq!(clock.advance(), Minute(1));
        assert_eq!(clock.wait_tick(Some(Minute(0))), Some(Minute(1)));
    }

    #[test]
    fn late_waiter_does_not_miss_tick() {
        let clock = TickClock::new(1);
        clock.start();
        // Nobody was waiting when the broadcast went out.
        assert_eq!(clock.wait_tick(None), Some(Minute(0)));
    }

    #[test]
    fn advance_waits_for_acknowledgement() {
        let clock = Arc::new(TickClock::new(1));
        let acked = Arc::new(AtomicBool::new(false));
        clock.start();

        let agent = {
            let clock = Arc::clone(&clock);
            let acked = Arc::clone(&acked);
            thread::spawn(move || {
                let m = clock.wait_tick(None).unwrap();
                thread::sleep(Duration::from_millis(30));
                acked.store(true, Ordering::SeqCst);
                clock.finish_tick();
                m
            })
        };

        assert_eq!(clock.advance(), Minute(1));
        assert!(acked.load(Ordering::SeqCst));
        assert_eq!(agent.join().unwrap(), Minute(0));
    }

    #[test]
    fn shutdown_releases_waiters() {
        let clock = Arc::new(TickClock::new(1));
        clock.start();
        assert_eq!(clock.wait_tick(None), Some(Minute(0)));

        let agent = {
            let clock = Arc::clone(&clock);
            thread::spawn(move || clock.wait_tick(Some(Minute(0))))
        };
        clock.finish_tick();
        clock.shutdown();
        assert_eq!(agent.join().unwrap(), None);
        assert!(!clock.is_running());
    }

    #[test]
    fn leave_and_rejoin_adjust_participants() {
        let clock = TickClock::new(2);
        clock.start();
        clock.leave();
        assert_eq!(clock.participants(), 1);
        clock.rejoin();
        assert_eq!(clock.participants(), 2);
        // Two debts outstanding: the rejoined one and the untouched agent.
        clock.finish_tick();
        clock.finish_tick();
        clock.wait_settled();
        assert_eq!(clock.advance(), Minute(1));
    }
}

// ── WakeSignal ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod wake_tests {
    use super::*;
    use crate::{WakeReason, WakeSignal};

    #[test]
    fn stored_wake_consumed_once() {
        let wake = WakeSignal::new();
        wake.notify(WakeReason::Arrival);
        assert_eq!(wake.wait(), WakeReason::Arrival);
        assert_eq!(wake.try_take(), None);
    }

    #[test]
    fn repeated_notify_stores_one_wake() {
        let wake = WakeSignal::new();
        wake.notify(WakeReason::Arrival);
        wake.notify(WakeReason::Arrival);
        assert_eq!(wake.try_take(), Some(WakeReason::Arrival));
        assert_eq!(wake.try_take(), None);
    }

    #[test]
    fn shutdown_overrides_arrival() {
        let wake = WakeSignal::new();
        wake.notify(WakeReason::Arrival);
        wake.notify(WakeReason::Shutdown);
        assert_eq!(wake.wait(), WakeReason::Shutdown);

        wake.notify(WakeReason::Shutdown);
        wake.notify(WakeReason::Arrival);
        assert_eq!(wake.wait(), WakeReason::Shutdown);
    }

    #[test]
    fn wait_blocks_until_notified() {
        let wake = Arc::new(WakeSignal::new());
        let sleeper = {
            let wake = Arc::clone(&wake);
            thread::spawn(move || wake.wait())
        };
        thread::sleep(Duration::from_millis(20));
        wake.notify(WakeReason::Arrival);
        assert_eq!(sleeper.join().unwrap(), WakeReason::Arrival);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn draws_configured_student_count() {
        let sim = SimBuilder::new(config(2, 7, 30)).build().unwrap();
        let students = sim.students();
        assert_eq!(students.len(), 7);
        for (i, s) in students.iter().enumerate() {
            assert_eq!(s.id.index(), i);
            assert!((1..=5).contains(&s.question_duration));
            assert!(s.arrival_minute <= Minute(30));
            assert_eq!(s.state, StudentState::Scheduled);
        }
    }

    #[test]
    fn same_seed_draws_same_students() {
        let a = SimBuilder::new(config(2, 10, 30)).build().unwrap().students();
        let b = SimBuilder::new(config(2, 10, 30)).build().unwrap().students();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_config_rejected_before_start() {
        let result = SimBuilder::new(config(1, 1, 0)).build();
        assert!(matches!(result, Err(SimError::Core(_))));
    }

    #[test]
    fn student_count_mismatch_errors() {
        let result = SimBuilder::new(config(1, 3, 10))
            .students(fixed(&[(1, 0)]))
            .build();
        assert!(matches!(
            result,
            Err(SimError::StudentCountMismatch { expected: 3, got: 1 })
        ));
    }

    #[test]
    fn arrival_after_closing_errors() {
        let result = SimBuilder::new(config(1, 1, 10))
            .students(fixed(&[(1, 11)]))
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn misnumbered_students_error() {
        let mut students = fixed(&[(1, 0), (1, 0)]);
        students.swap(0, 1);
        let result = SimBuilder::new(config(1, 2, 10)).students(students).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod summary_tests {
    use super::*;

    #[test]
    fn averages_over_helped_only() {
        let mut students = fixed(&[(3, 0), (4, 0), (2, 0)]);
        students[0].state = StudentState::Helped;
        students[0].wait_time = Some(0);
        students[0].turnaround_time = Some(3);
        students[1].state = StudentState::Helped;
        students[1].wait_time = Some(3);
        students[1].turnaround_time = Some(7);
        students[2].state = StudentState::GivenUp;

        let s = Summary::compute(&students, 9);
        assert_eq!(s.total_students, 3);
        assert_eq!(s.helped, 2);
        assert_eq!(s.not_helped, 1);
        assert_eq!(s.given_up, 1);
        assert_eq!(s.avg_question, Some(3)); // 7 / 2 truncated
        assert_eq!(s.avg_wait, Some(1));
        assert_eq!(s.avg_turnaround, Some(5));
        assert_eq!(s.ta_nap_minutes, 9);
    }

    #[test]
    fn nobody_helped_has_no_averages() {
        let s = Summary::compute(&fixed(&[(3, 0)]), 0);
        assert_eq!(s.helped, 0);
        assert_eq!(s.avg_question, None);
        assert_eq!(s.avg_wait, None);
        assert_eq!(s.avg_turnaround, None);
    }
}

// ── Threaded runs ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn single_student_is_helped() {
        let report = run_fixed(1, 5, &[(3, 0)]);
        let s = &report.students[0];
        assert!(s.helped());
        assert_eq!(s.wait_time, Some(0));
        assert_eq!(s.turnaround_time, Some(3));
        assert_eq!(report.summary.helped, 1);
        assert_eq!(report.summary.avg_turnaround, Some(3));
    }

    #[test]
    fn no_chairs_means_give_up() {
        let report = run_fixed(0, 5, &[(2, 1)]);
        let s = &report.students[0];
        assert_eq!(s.state, StudentState::GivenUp);
        assert!(!s.helped());
        assert_eq!(report.summary.not_helped, 1);
        assert_eq!(report.summary.given_up, 1);
    }

    #[test]
    fn two_students_one_chair() {
        // Which of the two sits first is up to the scheduler, and the second
        // may find the hallway full if the TA has not pulled the first in yet.
        let report = run_fixed(1, 20, &[(2, 0), (2, 0)]);
        assert_final_invariants(&report);

        let first = report
            .students
            .iter()
            .find(|s| s.retries == 0 && s.wait_time == Some(0))
            .expect("one student is served at minute 0");
        assert!(first.helped());
        assert_eq!(first.turnaround_time, Some(2));

        // The hallway is empty from the moment the first student is pulled
        // in, so the second sits down on its first or second attempt.  It is
        // served at minute 2 when the first finishes, or on arrival if later.
        let other = report.students.iter().find(|s| s.id != first.id).unwrap();
        assert!(other.retries <= 1, "{} retried {} times", other.id, other.retries);
        let arrived = other.arrival_minute.0;
        assert!(arrived <= 20);
        let served = arrived.max(2);
        if served + 2 <= 20 {
            assert!(other.helped());
            assert_eq!(other.wait_time, Some(served - arrived));
            assert_eq!(other.turnaround_time, Some(served + 2 - arrived));
        } else {
            assert_eq!(other.state, StudentState::InService);
            assert_eq!(other.wait_time, Some(0));
        }
    }

    #[test]
    fn two_students_two_chairs_served_back_to_back() {
        // Both always find a chair, so the second waits for the first.
        let report = run_fixed(2, 20, &[(2, 0), (2, 0)]);
        assert_final_invariants(&report);
        let mut waits: Vec<_> = report.students.iter().map(|s| s.wait_time).collect();
        waits.sort();
        assert_eq!(waits, vec![Some(0), Some(2)]);
        let mut turnarounds: Vec<_> = report.students.iter().map(|s| s.turnaround_time).collect();
        turnarounds.sort();
        assert_eq!(turnarounds, vec![Some(2), Some(4)]);
        assert!(report.students.iter().all(|s| s.helped() && s.retries == 0));
    }

    #[test]
    fn second_student_waits_for_busy_ta() {
        // S1 sits down at minute 1 while S0 is in the chair until minute 2.
        let report = run_fixed(1, 20, &[(2, 0), (2, 1)]);
        let (s0, s1) = (&report.students[0], &report.students[1]);
        assert!(s0.helped() && s1.helped());
        assert_eq!(s0.wait_time, Some(0));
        assert_eq!(s0.turnaround_time, Some(2));
        assert_eq!(s1.retries, 0);
        assert_eq!(s1.wait_time, Some(1));
        assert_eq!(s1.turnaround_time, Some(3));
    }

    #[test]
    fn unbounded_chair_count_runs() {
        let report = run_fixed(usize::MAX, 5, &[(3, 0)]);
        assert!(report.students[0].helped());
        assert_eq!(report.summary.helped, 1);
    }

    #[test]
    fn idle_ta_naps_whole_run() {
        let report = run_fixed(2, 5, &[]);
        assert_eq!(report.summary.ta_nap_minutes, 5);
        assert_eq!(report.summary.helped, 0);
        assert_eq!(report.summary.total_students, 0);
    }

    #[test]
    fn late_arrival_wakes_ta() {
        let report = run_fixed(1, 10, &[(2, 4)]);
        let s = &report.students[0];
        assert!(s.helped());
        assert_eq!(s.wait_time, Some(0));
        assert_eq!(s.turnaround_time, Some(2));
        // Asleep 0..4, then again from 7 until closing at 10.
        assert_eq!(report.summary.ta_nap_minutes, 4 + 3);
    }

    #[test]
    fn student_in_service_at_closing_not_helped() {
        let report = run_fixed(1, 5, &[(5, 3)]);
        let s = &report.students[0];
        assert_eq!(s.state, StudentState::InService);
        assert!(!s.helped());
        assert_eq!(report.summary.not_helped, 1);
        assert_eq!(report.summary.given_up, 0);
    }

    #[test]
    fn observer_sees_every_minute() {
        let sim = SimBuilder::new(config(2, 4, 12)).build().unwrap();
        let mut rec = Recorder::default();
        let report = sim.run(&mut rec).unwrap();

        assert_eq!(rec.starts, 1);
        let expected: Vec<Minute> = (0..=12).map(Minute).collect();
        assert_eq!(rec.ticks, expected);
        assert_eq!(rec.snapshots.len(), 13);
        assert_eq!(rec.summary.as_ref(), Some(&report.summary));
    }

    #[test]
    fn quiet_run_emits_no_snapshots() {
        let cfg = SimConfig { verbose: false, ..config(2, 4, 12) };
        let mut rec = Recorder::default();
        SimBuilder::new(cfg).build().unwrap().run(&mut rec).unwrap();
        assert_eq!(rec.ticks.len(), 13);
        assert!(rec.snapshots.is_empty());
    }

    #[test]
    fn busy_office_keeps_invariants() {
        let cfg = SimConfig { seed: 7, ..config(3, 30, 60) };
        let mut rec = Recorder::default();
        let report = SimBuilder::new(cfg).build().unwrap().run(&mut rec).unwrap();

        assert_final_invariants(&report);
        let summary = rec.summary.unwrap();
        assert_eq!(summary.total_students, 30);
        assert_eq!(summary.helped + summary.not_helped, 30);
        // A sleeping TA never has anyone in the office chair.
        assert!(rec
            .snapshots
            .iter()
            .filter(|s| s.ta == TaStatus::Sleeping)
            .all(|s| s.in_service.is_none()));
    }

    #[test]
    fn helped_students_finish_by_closing() {
        let report = SimBuilder::new(config(2, 12, 40))
            .build()
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap();
        for s in report.students.iter().filter(|s| s.helped()) {
            let done = s.arrival_minute + s.turnaround_time.unwrap();
            assert!(done <= Minute(40));
        }
    }

    #[test]
    fn repeated_runs_terminate_and_stay_consistent() {
        for seed in 0..25 {
            let cfg = SimConfig { seed, ..config(2, 8, 25) };
            let mut rec = Recorder::default();
            let report = SimBuilder::new(cfg).build().unwrap().run(&mut rec).unwrap();
            assert_final_invariants(&report);
            assert_eq!(rec.ticks.len(), 26);
        }
    }
}
