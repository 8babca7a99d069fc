//! End-of-run statistics.

use oh_office::{Student, StudentState};

/// Aggregate numbers for the closing report.
///
/// Averages are over helped students only, truncated to whole minutes, and
/// `None` when nobody was helped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub total_students: usize,
    pub helped:         usize,
    pub not_helped:     usize,
    /// Subset of `not_helped` that left because the hallway stayed full.
    pub given_up:       usize,
    pub avg_question:   Option<u64>,
    pub avg_wait:       Option<u64>,
    pub avg_turnaround: Option<u64>,
    pub ta_nap_minutes: u64,
}

impl Summary {
    pub fn compute(students: &[Student], ta_nap_minutes: u64) -> Self {
        let mut helped = 0usize;
        let mut question = 0u64;
        let mut wait = 0u64;
        let mut turnaround = 0u64;
        for s in students.iter().filter(|s| s.helped()) {
            helped += 1;
            question += s.question_duration;
            wait += s.wait_time.unwrap_or(0);
            turnaround += s.turnaround_time.unwrap_or(0);
        }
        let given_up = students
            .iter()
            .filter(|s| s.state == StudentState::GivenUp)
            .count();

        let avg = |total: u64| (helped > 0).then(|| total / helped as u64);
        Self {
            total_students: students.len(),
            helped,
            not_helped: students.len() - helped,
            given_up,
            avg_question: avg(question),
            avg_wait: avg(wait),
            avg_turnaround: avg(turnaround),
            ta_nap_minutes,
        }
    }
}
