//! Strongly typed student identifier.
//!
//! `StudentId` is `Copy + Ord + Hash` so it can be queued, compared and used
//! as a map key without ceremony.  Index the student table with
//! [`StudentId::index`].

use std::fmt;

/// Index of a student in the office's student table.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StudentId(pub u32);

impl StudentId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Renders as `S<n>`, the label used on hallway and office chairs.
impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

impl TryFrom<usize> for StudentId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<StudentId, Self::Error> {
        u32::try_from(n).map(StudentId)
    }
}
