//! Semester reference table

use serde::{Deserialize, Serialize};

/// Number of semester slots in the degree program
pub const PROGRAM_SEMESTERS: u8 = 8;

/// Sum of the credit loads in [`SEMESTER_TABLE`]
pub const TOTAL_PROGRAM_CREDITS: u32 = 162;

/// A single semester of the program and its credit load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterRecord {
    /// 1-based semester index (1..=8)
    pub semester_index: u8,

    /// Credits carried by this semester
    pub credits: u32,
}

impl SemesterRecord {
    /// Human-readable ordinal label (e.g., "3rd Semester")
    #[must_use]
    pub fn label(&self) -> String {
        let suffix = match self.semester_index {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        };
        format!("{}{suffix} Semester", self.semester_index)
    }
}

/// Fixed credit load of every semester in the program
pub const SEMESTER_TABLE: [SemesterRecord; PROGRAM_SEMESTERS as usize] = [
    SemesterRecord {
        semester_index: 1,
        credits: 21,
    },
    SemesterRecord {
        semester_index: 2,
        credits: 19,
    },
    SemesterRecord {
        semester_index: 3,
        credits: 22,
    },
    SemesterRecord {
        semester_index: 4,
        credits: 18,
    },
    SemesterRecord {
        semester_index: 5,
        credits: 21,
    },
    SemesterRecord {
        semester_index: 6,
        credits: 20,
    },
    SemesterRecord {
        semester_index: 7,
        credits: 22,
    },
    SemesterRecord {
        semester_index: 8,
        credits: 19,
    },
];

/// Look up a semester by its 1-based index
#[must_use]
pub fn semester(index: u8) -> Option<&'static SemesterRecord> {
    SEMESTER_TABLE.iter().find(|s| s.semester_index == index)
}

/// Total credits across the table
#[must_use]
pub fn total_credits() -> u32 {
    SEMESTER_TABLE.iter().map(|s| s.credits).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_totals_program_credits() {
        assert_eq!(total_credits(), TOTAL_PROGRAM_CREDITS);
    }

    #[test]
    fn test_semester_lookup() {
        let third = semester(3).unwrap();
        assert_eq!(third.credits, 22);
        assert!(semester(0).is_none());
        assert!(semester(9).is_none());
    }

    #[test]
    fn test_labels() {
        assert_eq!(semester(1).unwrap().label(), "1st Semester");
        assert_eq!(semester(2).unwrap().label(), "2nd Semester");
        assert_eq!(semester(3).unwrap().label(), "3rd Semester");
        assert_eq!(semester(8).unwrap().label(), "8th Semester");
    }
}
