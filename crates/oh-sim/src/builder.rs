//! Fluent builder for constructing a [`Sim`].

use std::sync::Mutex;

use oh_core::{Minute, SimConfig, SimRng, StudentId, StudentRng};
use oh_office::{Office, Student, StudentState};

use crate::agent::Shared;
use crate::{Sim, SimError, SimResult, TickClock, WakeSignal};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs
///
/// | Method           | Default                                                  |
/// |------------------|----------------------------------------------------------|
/// | `.students(v)`   | `config.students` records drawn from `SimRng(config.seed)` |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(config)
///     .students(vec![Student::new(StudentId(0), 3, Minute(0))])
///     .build()?;
/// ```
pub struct SimBuilder {
    config:   SimConfig,
    students: Option<Vec<Student>>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, students: None }
    }

    /// Supply fixed student records instead of random draws.
    ///
    /// Must be length `config.students`, indexed by id, all `Scheduled`, with
    /// arrivals no later than `config.total_minutes`.
    pub fn students(mut self, students: Vec<Student>) -> Self {
        self.students = Some(students);
        self
    }

    /// Validate inputs, draw any missing students, and return a ready-to-run
    /// [`Sim`].  Nothing is spawned until [`Sim::run`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let closing = self.config.closing();

        let students = match self.students {
            Some(s) => {
                check_students(&s, &self.config)?;
                s
            }
            None => draw_students(&self.config)?,
        };

        let rngs = students
            .iter()
            .map(|s| StudentRng::new(self.config.seed, s.id))
            .collect();

        // One TA plus one agent per student.
        let participants = students.len() + 1;
        let shared = Shared {
            office: Mutex::new(Office::new(self.config.chairs, closing, students)),
            clock:  TickClock::new(participants),
            wake:   WakeSignal::new(),
        };

        Ok(Sim {
            config: self.config,
            shared,
            rngs,
        })
    }
}

/// Question duration first, then arrival, for each student in id order.
fn draw_students(config: &SimConfig) -> SimResult<Vec<Student>> {
    let mut rng = SimRng::new(config.seed);
    let (q_lo, q_hi) = config.question_minutes;
    (0..config.students)
        .map(|i| {
            let id = StudentId::try_from(i)
                .map_err(|_| SimError::Config(format!("student index {i} exceeds the id space")))?;
            let question = rng.range(q_lo, q_hi);
            let arrival = rng.range(0, config.total_minutes);
            Ok(Student::new(id, question, Minute(arrival)))
        })
        .collect()
}

fn check_students(students: &[Student], config: &SimConfig) -> SimResult<()> {
    if students.len() != config.students {
        return Err(SimError::StudentCountMismatch {
            expected: config.students,
            got:      students.len(),
        });
    }
    for (i, s) in students.iter().enumerate() {
        if s.id.index() != i {
            return Err(SimError::Config(format!(
                "student at position {i} has id {}",
                s.id
            )));
        }
        if s.state != StudentState::Scheduled {
            return Err(SimError::Config(format!("{} is not scheduled", s.id)));
        }
        if s.arrival_minute > config.closing() {
            return Err(SimError::Config(format!(
                "{} arrives at minute {} after closing at {}",
                s.id, s.arrival_minute.0, config.total_minutes
            )));
        }
    }
    Ok(())
}
