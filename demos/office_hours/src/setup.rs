//! Turning flags, a JSON file, or answers at a prompt into a `SimConfig`.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use oh_core::{OhError, OhResult, SetupParams, SimConfig};

/// Sleeping-TA office hours simulation.
///
/// Values not given on the command line or in `--config` are asked for
/// interactively.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Hallway chairs.
    #[arg(long)]
    pub chairs: Option<i64>,

    /// Students to create.
    #[arg(long)]
    pub students: Option<i64>,

    /// Simulated minutes.
    #[arg(long)]
    pub minutes: Option<i64>,

    /// Print the office after every minute.
    #[arg(long, short)]
    pub verbose: bool,

    /// RNG seed for arrival and question draws.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Real milliseconds between ticks.
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// JSON file holding a full `SimConfig`; flags override its fields.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn resolve(&self) -> OhResult<SimConfig> {
        let base = match &self.config {
            Some(path) => load(path)?,
            None => SimConfig::default(),
        };
        let from_file = self.config.is_some();

        let mut input = io::stdin().lock();
        let mut ask = |prompt: &str, flag: Option<i64>, file_value: i64| -> OhResult<i64> {
            match (flag, from_file) {
                (Some(v), _) => Ok(v),
                (None, true) => Ok(file_value),
                (None, false) => prompt_int(&mut input, prompt),
            }
        };
        let chairs = ask("Enter number of chairs:", self.chairs, base.chairs as i64)?;
        let students = ask("Enter number of students:", self.students, base.students as i64)?;
        let total_minutes = ask(
            "Enter simulation time (minutes):",
            self.minutes,
            base.total_minutes as i64,
        )?;
        let interactive = !from_file
            && (self.chairs.is_none() || self.students.is_none() || self.minutes.is_none());
        let verbose = self.verbose
            || base.verbose
            || (interactive
                && prompt_yes(&mut input, "Do you want to print every minute's state (Y/N)?")?);

        let config = SimConfig::try_from(SetupParams { chairs, students, total_minutes, verbose })?;
        let config = SimConfig {
            seed:             self.seed.unwrap_or(base.seed),
            tick_interval_ms: self.tick_ms.unwrap_or(base.tick_interval_ms),
            question_minutes: base.question_minutes,
            ..config
        };
        config.validate()?;
        Ok(config)
    }
}

fn load(path: &Path) -> OhResult<SimConfig> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| OhError::Parse(format!("{}: {e}", path.display())))
}

fn prompt_line(input: &mut impl BufRead, prompt: &str) -> OhResult<String> {
    println!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(OhError::Parse(format!("no answer to \"{prompt}\"")));
    }
    Ok(line.trim().to_owned())
}

fn prompt_int(input: &mut impl BufRead, prompt: &str) -> OhResult<i64> {
    let line = prompt_line(input, prompt)?;
    line.parse()
        .map_err(|_| OhError::Parse(format!("\"{line}\" is not a whole number")))
}

fn prompt_yes(input: &mut impl BufRead, prompt: &str) -> OhResult<bool> {
    let line = prompt_line(input, prompt)?;
    Ok(line.eq_ignore_ascii_case("y") || line.eq_ignore_ascii_case("yes"))
}
