//! Required final-exam score
//!
//! Works backwards from a target letter grade to the Final score needed on
//! top of the marks already earned.

use crate::core::models::Course;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grade a student can aim for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetGrade {
    /// 90 or more
    A,
    /// 85 or more
    AMinus,
    /// 80 or more
    BPlus,
    /// 75 or more
    B,
    /// 70 or more
    BMinus,
    /// 65 or more
    CPlus,
    /// 60 or more
    C,
    /// 40 or more
    Pass,
}

impl TargetGrade {
    /// All targets, highest first
    pub const ALL: [Self; 8] = [
        Self::A,
        Self::AMinus,
        Self::BPlus,
        Self::B,
        Self::BMinus,
        Self::CPlus,
        Self::C,
        Self::Pass,
    ];

    /// Course total (out of 100) the grade requires
    #[must_use]
    pub const fn required_total(self) -> f64 {
        match self {
            Self::A => 90.0,
            Self::AMinus => 85.0,
            Self::BPlus => 80.0,
            Self::B => 75.0,
            Self::BMinus => 70.0,
            Self::CPlus => 65.0,
            Self::C => 60.0,
            Self::Pass => 40.0,
        }
    }

    /// Display label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::Pass => "Pass",
        }
    }
}

impl fmt::Display for TargetGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!("Unknown target grade: '{s}' (expected A, A-, B+, B, B-, C+, C or Pass)")
            })
    }
}

/// Failures of the reverse calculator
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FinalExamError {
    /// The Final weight is zero, negative or not a number
    #[error("Final exam weight must be a positive number, got {0}")]
    InvalidFinalWeight(f64),

    /// The marks earned so far are not a finite number
    #[error("Current total must be a finite number, got {0}")]
    InvalidCurrentTotal(f64),

    /// The course has no Final assessment to plan for
    #[error("Course '{0}' has no Final assessment")]
    NoFinalAssessment(String),
}

/// Outcome of the reverse calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalExamRequirement {
    /// Grade aimed for
    pub target: TargetGrade,
    /// Marks already earned outside the Final
    pub current_total: f64,
    /// Maximum marks the Final is worth
    pub final_weight: f64,
    /// Marks needed before clamping; may be negative or exceed the weight
    pub required_unclamped: f64,
    /// Marks needed, clamped to `[0, final_weight]`
    pub required_final: f64,
    /// Whether the target can still be reached
    pub is_possible: bool,
}

impl FinalExamRequirement {
    /// The target is met even with a zero on the Final
    #[must_use]
    pub fn already_secured(&self) -> bool {
        self.required_unclamped <= 0.0
    }
}

/// Minimum Final score for a target grade.
///
/// # Errors
/// Returns [`FinalExamError`] when the weight is not positive or either
/// number is not finite.
pub fn required_final_score(
    current_total: f64,
    target: TargetGrade,
    final_weight: f64,
) -> Result<FinalExamRequirement, FinalExamError> {
    if !final_weight.is_finite() || final_weight <= 0.0 {
        return Err(FinalExamError::InvalidFinalWeight(final_weight));
    }
    if !current_total.is_finite() {
        return Err(FinalExamError::InvalidCurrentTotal(current_total));
    }

    let required_unclamped = target.required_total() - current_total;
    Ok(FinalExamRequirement {
        target,
        current_total,
        final_weight,
        required_unclamped,
        required_final: required_unclamped.clamp(0.0, final_weight),
        is_possible: required_unclamped <= final_weight,
    })
}

/// Minimum Final score for a tracked course, using its own Final weight
///
/// # Errors
/// Returns [`FinalExamError::NoFinalAssessment`] if the course has no Final,
/// or any error from [`required_final_score`].
pub fn required_final_for_course(
    course: &Course,
    target: TargetGrade,
) -> Result<FinalExamRequirement, FinalExamError> {
    let final_exam = course
        .final_assessment()
        .ok_or_else(|| FinalExamError::NoFinalAssessment(course.label()))?;
    required_final_score(course.non_final_total(), target, final_exam.weight)
}
