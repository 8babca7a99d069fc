//! The `Sim` struct: spawns the agents and drives the clock.

use std::sync::PoisonError;
use std::thread;
use std::time::Duration;

use oh_core::{Minute, SimConfig, StudentRng};
use oh_office::{OfficeSnapshot, Student};
use rayon::ThreadPoolBuilder;
use tracing::info;

use crate::agent::{Shared, StudentAgent, TaAgent};
use crate::{SimObserver, SimResult, Summary, WakeReason};

/// Final student records and the statistics computed from them.
#[derive(Clone, Debug)]
pub struct SimReport {
    pub students: Vec<Student>,
    pub summary:  Summary,
}

/// A configured, not yet started run.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Run configuration.
    pub config: SimConfig,

    pub(crate) shared: Shared,

    /// Per-student retry RNGs, indexed by `StudentId`.
    pub(crate) rngs: Vec<StudentRng>,
}

impl Sim {
    /// Student records as they stand before the run.
    pub fn students(&self) -> Vec<Student> {
        self.shared.lock_office().students().to_vec()
    }

    /// Run to completion.
    ///
    /// Spawns the TA and one agent per student on a dedicated pool, releases
    /// minute 0, issues `total_minutes` ticks, shuts the clock down and
    /// force-wakes a sleeping TA, then waits for every agent to exit before
    /// computing the [`Summary`].
    pub fn run<O: SimObserver>(self, observer: &mut O) -> SimResult<SimReport> {
        let Sim { config, shared, rngs } = self;

        let arrivals: Vec<_> = shared
            .lock_office()
            .students()
            .iter()
            .map(|s| (s.id, s.arrival_minute))
            .collect();

        // Every agent blocks for most of its life, so each needs a worker.
        let pool = ThreadPoolBuilder::new()
            .num_threads(arrivals.len() + 1)
            .thread_name(|i| format!("oh-agent-{i}"))
            .build()?;

        info!(
            chairs = config.chairs,
            students = config.students,
            minutes = config.total_minutes,
            "simulation start"
        );
        observer.on_start(&config);

        let shared_ref = &shared;
        pool.in_place_scope(|scope| {
            scope.spawn(move |_| TaAgent { shared: shared_ref }.run());
            for ((id, arrival), rng) in arrivals.into_iter().zip(rngs) {
                scope.spawn(move |_| {
                    StudentAgent { shared: shared_ref, id, arrival, rng }.run()
                });
            }
            drive(shared_ref, &config, &mut *observer);
        });

        info!("simulation end");
        let office = shared.office.into_inner().unwrap_or_else(PoisonError::into_inner);
        let nap = office.nap_minutes();
        let students = office.into_students();
        let summary = Summary::compute(&students, nap);
        observer.on_sim_end(&summary);

        Ok(SimReport { students, summary })
    }
}

/// The tick driver: minute 0, then `total_minutes` ticks, then shutdown.
fn drive<O: SimObserver>(shared: &Shared, config: &SimConfig, observer: &mut O) {
    let clock = &shared.clock;
    let pace = Duration::from_millis(config.tick_interval_ms);

    clock.start();
    clock.wait_settled();
    report(shared, config, observer, Minute::ZERO);

    for _ in 0..config.total_minutes {
        if !pace.is_zero() {
            thread::sleep(pace);
        }
        let now = clock.advance();
        clock.wait_settled();
        report(shared, config, observer, now);
    }

    clock.shutdown();
    shared.wake.notify(WakeReason::Shutdown);
}

fn report<O: SimObserver>(shared: &Shared, config: &SimConfig, observer: &mut O, now: Minute) {
    observer.on_tick_end(now);
    if config.verbose {
        let snapshot: OfficeSnapshot = shared.lock_office().snapshot(now);
        observer.on_snapshot(&snapshot);
    }
}
