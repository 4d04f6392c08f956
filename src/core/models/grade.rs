//! Letter grades and derived course grades

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letter grade on the 4.0 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    /// A+ (4.0)
    #[serde(rename = "A+")]
    APlus,
    /// A (4.0)
    #[serde(rename = "A")]
    A,
    /// A- (3.7)
    #[serde(rename = "A-")]
    AMinus,
    /// B+ (3.3)
    #[serde(rename = "B+")]
    BPlus,
    /// B (3.0)
    #[serde(rename = "B")]
    B,
    /// B- (2.7)
    #[serde(rename = "B-")]
    BMinus,
    /// C+ (2.3)
    #[serde(rename = "C+")]
    CPlus,
    /// C (2.0)
    #[serde(rename = "C")]
    C,
    /// C- (1.7)
    #[serde(rename = "C-")]
    CMinus,
    /// D+ (1.3)
    #[serde(rename = "D+")]
    DPlus,
    /// D (1.0)
    #[serde(rename = "D")]
    D,
    /// F (0.0)
    #[serde(rename = "F")]
    F,
}

/// Percentage breakpoints, inclusive lower bounds, best grade first
const PERCENTAGE_BREAKPOINTS: [(f64, LetterGrade); 7] = [
    (90.0, LetterGrade::A),
    (85.0, LetterGrade::AMinus),
    (80.0, LetterGrade::BPlus),
    (75.0, LetterGrade::B),
    (70.0, LetterGrade::BMinus),
    (65.0, LetterGrade::CPlus),
    (60.0, LetterGrade::C),
];

impl LetterGrade {
    /// Every grade, best first
    pub const ALL: [Self; 12] = [
        Self::APlus,
        Self::A,
        Self::AMinus,
        Self::BPlus,
        Self::B,
        Self::BMinus,
        Self::CPlus,
        Self::C,
        Self::CMinus,
        Self::DPlus,
        Self::D,
        Self::F,
    ];

    /// Convert a course percentage to a letter.
    ///
    /// Only A through C and F are reachable from a percentage; anything
    /// below 60 (or NaN) is an F.
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        PERCENTAGE_BREAKPOINTS
            .iter()
            .find(|(cutoff, _)| percentage >= *cutoff)
            .map_or(Self::F, |(_, letter)| *letter)
    }

    /// Grade point on the 4.0 scale
    #[must_use]
    pub const fn grade_point(self) -> f64 {
        match self {
            Self::APlus | Self::A => 4.0,
            Self::AMinus => 3.7,
            Self::BPlus => 3.3,
            Self::B => 3.0,
            Self::BMinus => 2.7,
            Self::CPlus => 2.3,
            Self::C => 2.0,
            Self::CMinus => 1.7,
            Self::DPlus => 1.3,
            Self::D => 1.0,
            Self::F => 0.0,
        }
    }

    /// Display label (e.g., "B+")
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|grade| grade.as_str() == wanted)
            .ok_or_else(|| format!("Unknown letter grade: '{s}'"))
    }
}

/// Grade derived from a course's assessments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourseGrade {
    /// Sum of achieved marks (percentage points out of 100)
    pub total_percentage: f64,

    /// Letter for the total
    pub letter: LetterGrade,

    /// Grade point for the total
    pub grade_point: f64,
}

impl CourseGrade {
    /// Derive the letter and point for a percentage total
    #[must_use]
    pub fn from_percentage(total_percentage: f64) -> Self {
        let letter = LetterGrade::from_percentage(total_percentage);
        Self {
            total_percentage,
            letter,
            grade_point: letter.grade_point(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints_are_inclusive() {
        assert_eq!(LetterGrade::from_percentage(90.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_percentage(89.999), LetterGrade::AMinus);
        assert_eq!(LetterGrade::from_percentage(85.0), LetterGrade::AMinus);
        assert_eq!(LetterGrade::from_percentage(60.0), LetterGrade::C);
        assert_eq!(LetterGrade::from_percentage(59.99), LetterGrade::F);
        assert_eq!(LetterGrade::from_percentage(0.0), LetterGrade::F);
    }

    #[test]
    fn test_nan_percentage_is_failing() {
        assert_eq!(LetterGrade::from_percentage(f64::NAN), LetterGrade::F);
    }

    #[test]
    fn test_percentage_table_points() {
        let cases = [
            (95.0, 4.0),
            (87.0, 3.7),
            (81.0, 3.3),
            (76.0, 3.0),
            (71.0, 2.7),
            (66.0, 2.3),
            (61.0, 2.0),
            (10.0, 0.0),
        ];
        for (pct, point) in cases {
            let grade = CourseGrade::from_percentage(pct);
            assert!((grade.grade_point - point).abs() < f64::EPSILON, "{pct}");
        }
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("b+".parse::<LetterGrade>().unwrap(), LetterGrade::BPlus);
        assert_eq!(" A ".parse::<LetterGrade>().unwrap(), LetterGrade::A);
        assert_eq!("D-".parse::<LetterGrade>().ok(), None);
        for grade in LetterGrade::ALL {
            assert_eq!(grade.to_string().parse::<LetterGrade>().unwrap(), grade);
        }
    }

    #[test]
    fn test_ordering_is_best_first() {
        assert!(LetterGrade::APlus < LetterGrade::F);
        assert!(LetterGrade::BPlus < LetterGrade::B);
    }
}
