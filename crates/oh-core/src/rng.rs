//! Deterministic per-student and setup-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each student gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (student_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive ids uniformly across the seed space.  Students
//! draw their retry times from their own stream, so the values drawn do not
//! depend on how the OS interleaves the agent threads.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::StudentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Salt separating the setup stream from student 0's stream.
const SETUP_SALT: u64 = 0x5eed_0ff1_ce00_0000;

// ── StudentRng ────────────────────────────────────────────────────────────────

/// Per-student deterministic RNG.
///
/// Moved into the student's agent thread at spawn; never shared.
pub struct StudentRng(SmallRng);

impl StudentRng {
    /// Seed deterministically from the run's global seed and a student id.
    pub fn new(global_seed: u64, student: StudentId) -> Self {
        let seed = global_seed ^ (student.0 as u64).wrapping_mul(MIXING_CONSTANT);
        StudentRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform integer in `low..=high`.  Returns `low` when `high < low`.
    #[inline]
    pub fn range(&mut self, low: u64, high: u64) -> u64 {
        uniform(&mut self.0, low, high)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Setup-level RNG used on the builder thread to draw each student's initial
/// arrival minute and question duration.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed ^ SETUP_SALT))
    }

    /// Uniform integer in `low..=high`.  Returns `low` when `high < low`.
    #[inline]
    pub fn range(&mut self, low: u64, high: u64) -> u64 {
        uniform(&mut self.0, low, high)
    }
}

#[inline]
fn uniform(rng: &mut SmallRng, low: u64, high: u64) -> u64 {
    if high <= low {
        return low;
    }
    rng.gen_range(low..=high)
}
