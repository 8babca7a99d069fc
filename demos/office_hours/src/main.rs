//! office_hours: the sleeping teaching assistant.
//!
//! One TA, a hallway of chairs, and students who drop by with questions.
//! Setup comes from flags, `--config <file.json>`, or the prompt; event logs
//! go through `tracing` (`RUST_LOG=debug` adds the clock's tick messages).

mod setup;

use std::io::{self, Write};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use oh_core::SimConfig;
use oh_office::OfficeSnapshot;
use oh_sim::{SimBuilder, SimObserver, Summary};

use setup::Args;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints the office after each minute and the closing report.
///
/// Output goes through one stdout lock per block so a snapshot is never
/// split by log lines from the agent threads.
struct ConsoleReport;

impl SimObserver for ConsoleReport {
    fn on_snapshot(&mut self, snapshot: &OfficeSnapshot) {
        let mut out = io::stdout().lock();
        if let Err(e) = writeln!(out, "{snapshot}") {
            warn!(minute = snapshot.minute.0, error = %e, "could not print office snapshot");
        }
    }

    fn on_sim_end(&mut self, summary: &Summary) {
        let mut out = io::stdout().lock();
        if let Err(e) = write_summary(&mut out, summary) {
            warn!(error = %e, "could not print summary");
        }
    }
}

fn write_summary(out: &mut impl Write, s: &Summary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "========= Simulation Summary =========")?;
    writeln!(out, "Total Students       : {}", s.total_students)?;
    writeln!(out, "Students Helped      : {}", s.helped)?;
    writeln!(out, "Students Not Helped  : {}", s.not_helped)?;
    writeln!(out, "  (gave up, hall full: {})", s.given_up)?;
    if let (Some(q), Some(w), Some(t)) = (s.avg_question, s.avg_wait, s.avg_turnaround) {
        writeln!(out, "Average Question Time: {q} Minutes")?;
        writeln!(out, "Average Wait Time    : {w} Minutes")?;
        writeln!(out, "Average Turnaround   : {t} Minutes")?;
    }
    writeln!(out, "TA Total Nap Time    : {} Minutes", s.ta_nap_minutes)?;
    writeln!(out, "=============================")
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    let config: SimConfig = args.resolve()?;
    init_logging();

    let sim = SimBuilder::new(config.clone()).build()?;

    println!(
        "Chairs: {}  |  Students: {}  |  Minutes: {}  |  Seed: {}",
        config.chairs, config.students, config.total_minutes, config.seed
    );
    for s in sim.students() {
        println!(
            "Student {}  Arrival: {} min  Question: {} min",
            s.id, s.arrival_minute.0, s.question_duration
        );
    }
    println!("----------------------------------------");

    let t0 = Instant::now();
    let report = sim.run(&mut ConsoleReport)?;
    tracing::debug!(elapsed_ms = t0.elapsed().as_millis() as u64, "run finished");

    if config.verbose {
        println!();
        println!("{:<8} {:<10} {:>8} {:>6} {:>11} {:>8}", "Student", "Outcome", "Arrival", "Wait", "Turnaround", "Retries");
        println!("{}", "-".repeat(56));
        for s in &report.students {
            println!(
                "{:<8} {:<10} {:>8} {:>6} {:>11} {:>8}",
                s.id.to_string(),
                format!("{:?}", s.state),
                s.arrival_minute.0,
                s.wait_time.map_or("-".into(), |w| w.to_string()),
                s.turnaround_time.map_or("-".into(), |t| t.to_string()),
                s.retries,
            );
        }
    }

    Ok(())
}
