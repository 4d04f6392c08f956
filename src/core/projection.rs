//! GPA target projection
//!
//! Computes the semester GPA a student needs from here on to reach a target
//! cumulative GPA by the end of the program.
//!
//! The projection treats CGPA as a running average over the program's
//! semester slots without weighting by credit load: the semesters before the
//! current one count at the current CGPA and the current semester counts once
//! at its own SGPA.

use crate::core::models::{PROGRAM_SEMESTERS, TOTAL_PROGRAM_CREDITS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of the grading scale
pub const MAX_GPA: f64 = 4.0;

/// Credits per completed semester assumed by the scenario planner
pub const ASSUMED_CREDITS_PER_SEMESTER: f64 = 15.0;

/// Input field of the GPA form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GpaField {
    /// Current semester number
    CurrentSemester,
    /// GPA of the current semester
    CurrentSgpa,
    /// Cumulative GPA so far
    CurrentCgpa,
    /// Desired cumulative GPA
    TargetCgpa,
}

impl GpaField {
    /// Field name as shown to users
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CurrentSemester => "current semester",
            Self::CurrentSgpa => "current SGPA",
            Self::CurrentCgpa => "current CGPA",
            Self::TargetCgpa => "target CGPA",
        }
    }

    const fn required_message(self) -> &'static str {
        match self {
            Self::CurrentSemester => "Current semester is required",
            Self::CurrentSgpa => "Current SGPA is required",
            Self::CurrentCgpa => "Current CGPA is required",
            Self::TargetCgpa => "Target CGPA is required",
        }
    }

    const fn range_message(self) -> &'static str {
        match self {
            Self::CurrentSemester => "Current semester must be between 1 and 8",
            Self::CurrentSgpa => "SGPA must be between 0.00 and 4.00",
            Self::CurrentCgpa => "CGPA must be between 0.00 and 4.00",
            Self::TargetCgpa => "Target CGPA must be between 0.00 and 4.00",
        }
    }
}

impl fmt::Display for GpaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation failure for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field that failed
    pub field: GpaField,
    /// User-facing message
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field error found in one query; never empty when returned as `Err`
#[derive(Debug, Clone, PartialEq, Eq, Default, thiserror::Error)]
#[error("{}", join_errors(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Message for a specific field, if it failed
    #[must_use]
    pub fn for_field(&self, field: GpaField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Whether no errors were recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, field: GpaField, message: &str) {
        self.0.push(FieldError {
            field,
            message: message.to_string(),
        });
    }
}

/// Projection failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    /// One or more inputs were missing or out of range
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    /// Every semester slot is already completed
    #[error("No semester left to plan after semester {current_semester}")]
    NoRemainingSemesters {
        /// Semester the student is in
        current_semester: u8,
    },
}

/// Raw form input; every field may be missing or unparsable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpaQueryInput {
    /// Current semester number (1-8)
    pub current_semester: Option<String>,
    /// GPA of the current semester
    pub current_sgpa: Option<String>,
    /// Cumulative GPA so far
    pub current_cgpa: Option<String>,
    /// Desired cumulative GPA
    pub target_cgpa: Option<String>,
}

impl GpaQueryInput {
    /// Validate every field and produce a typed query.
    ///
    /// # Errors
    /// Returns all field errors at once; no query is produced unless every
    /// field is present and in range.
    pub fn validate(&self) -> Result<GpaQuery, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let semester = parse_semester(self.current_semester.as_deref(), &mut errors);
        let sgpa = parse_gpa(GpaField::CurrentSgpa, self.current_sgpa.as_deref(), &mut errors);
        let cgpa = parse_gpa(GpaField::CurrentCgpa, self.current_cgpa.as_deref(), &mut errors);
        let target = parse_gpa(GpaField::TargetCgpa, self.target_cgpa.as_deref(), &mut errors);

        match (semester, sgpa, cgpa, target) {
            (Some(current_semester), Some(current_sgpa), Some(current_cgpa), Some(target_cgpa))
                if errors.is_empty() =>
            {
                Ok(GpaQuery {
                    current_semester,
                    current_sgpa,
                    current_cgpa,
                    target_cgpa,
                })
            }
            _ => Err(errors),
        }
    }
}

fn parse_semester(raw: Option<&str>, errors: &mut ValidationErrors) -> Option<u8> {
    let field = GpaField::CurrentSemester;
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        errors.push(field, field.required_message());
        return None;
    };
    match text.parse::<u8>() {
        Ok(value) if semester_in_range(value) => Some(value),
        _ => {
            errors.push(field, field.range_message());
            None
        }
    }
}

fn parse_gpa(field: GpaField, raw: Option<&str>, errors: &mut ValidationErrors) -> Option<f64> {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        errors.push(field, field.required_message());
        return None;
    };
    match text.parse::<f64>() {
        Ok(value) if gpa_in_range(value) => Some(value),
        _ => {
            errors.push(field, field.range_message());
            None
        }
    }
}

const fn semester_in_range(value: u8) -> bool {
    value >= 1 && value <= PROGRAM_SEMESTERS
}

fn gpa_in_range(value: f64) -> bool {
    (0.0..=MAX_GPA).contains(&value)
}

/// Validated projection query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpaQuery {
    current_semester: u8,
    current_sgpa: f64,
    current_cgpa: f64,
    target_cgpa: f64,
}

impl GpaQuery {
    /// Validate already-numeric input.
    ///
    /// # Errors
    /// Returns every out-of-range (or NaN) field.
    pub fn new(
        current_semester: u8,
        current_sgpa: f64,
        current_cgpa: f64,
        target_cgpa: f64,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if !semester_in_range(current_semester) {
            let field = GpaField::CurrentSemester;
            errors.push(field, field.range_message());
        }
        for (field, value) in [
            (GpaField::CurrentSgpa, current_sgpa),
            (GpaField::CurrentCgpa, current_cgpa),
            (GpaField::TargetCgpa, target_cgpa),
        ] {
            if !gpa_in_range(value) {
                errors.push(field, field.range_message());
            }
        }

        if errors.is_empty() {
            Ok(Self {
                current_semester,
                current_sgpa,
                current_cgpa,
                target_cgpa,
            })
        } else {
            Err(errors)
        }
    }

    /// Semester the student is in (1-8)
    #[must_use]
    pub const fn current_semester(&self) -> u8 {
        self.current_semester
    }

    /// GPA of the current semester
    #[must_use]
    pub const fn current_sgpa(&self) -> f64 {
        self.current_sgpa
    }

    /// Cumulative GPA so far
    #[must_use]
    pub const fn current_cgpa(&self) -> f64 {
        self.current_cgpa
    }

    /// Desired cumulative GPA
    #[must_use]
    pub const fn target_cgpa(&self) -> f64 {
        self.target_cgpa
    }
}

/// How hard the required GPA is to reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Achievability {
    /// At most 3.0
    Achievable,
    /// Above 3.0, at most 3.7
    Moderate,
    /// Above 3.7, at most 4.0
    Difficult,
    /// Above 4.0
    Impossible,
}

impl Achievability {
    /// Band for a required GPA. Each threshold is an exclusive lower bound.
    #[must_use]
    pub fn classify(required_sgpa: f64) -> Self {
        if required_sgpa > MAX_GPA {
            Self::Impossible
        } else if required_sgpa > 3.7 {
            Self::Difficult
        } else if required_sgpa > 3.0 {
            Self::Moderate
        } else {
            Self::Achievable
        }
    }

    /// Explanation shown alongside the result
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Impossible => "This target is not achievable as it requires SGPA above 4.0",
            Self::Difficult => {
                "This is a challenging target but possible with exceptional performance"
            }
            Self::Moderate => "This target is achievable with consistent effort",
            Self::Achievable => "This target is reasonably achievable",
        }
    }
}

impl fmt::Display for Achievability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Achievable => "achievable",
            Self::Moderate => "moderate",
            Self::Difficult => "difficult",
            Self::Impossible => "impossible",
        };
        f.write_str(s)
    }
}

/// Projection outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpaResult {
    /// GPA needed in each remaining semester
    pub required_sgpa: f64,
    /// Difficulty band of `required_sgpa`
    pub achievability: Achievability,
    /// Semester slots the requirement is spread over
    pub remaining_semesters: u8,
}

/// Compute the SGPA required to reach the target CGPA.
///
/// `required = (target * 8 - (completed * cgpa + sgpa)) / (8 - completed)`
/// where `completed = current_semester - 1`.
///
/// # Errors
/// Returns [`ProjectionError::NoRemainingSemesters`] if no semester slot is
/// left to divide the remaining points over.
pub fn calculate_required_sgpa(query: &GpaQuery) -> Result<GpaResult, ProjectionError> {
    project(
        query.current_semester,
        query.current_sgpa,
        query.current_cgpa,
        query.target_cgpa,
    )
}

fn project(
    current_semester: u8,
    current_sgpa: f64,
    current_cgpa: f64,
    target_cgpa: f64,
) -> Result<GpaResult, ProjectionError> {
    let completed = current_semester.saturating_sub(1);
    let Some(remaining_semesters) = PROGRAM_SEMESTERS
        .checked_sub(completed)
        .filter(|remaining| *remaining > 0)
    else {
        return Err(ProjectionError::NoRemainingSemesters { current_semester });
    };

    let points_so_far = f64::from(completed).mul_add(current_cgpa, current_sgpa);
    let required_points = target_cgpa * f64::from(PROGRAM_SEMESTERS);
    let required_sgpa = (required_points - points_so_far) / f64::from(remaining_semesters);

    Ok(GpaResult {
        required_sgpa,
        achievability: Achievability::classify(required_sgpa),
        remaining_semesters,
    })
}

/// Effort level explored by the scenario planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effort {
    /// 2.0 per semester
    Minimum,
    /// 3.0 per semester
    Average,
    /// 3.5 per semester
    Good,
    /// 4.0 per semester
    Excellent,
}

impl Effort {
    /// All effort levels, lowest first
    pub const ALL: [Self; 4] = [Self::Minimum, Self::Average, Self::Good, Self::Excellent];

    /// Semester GPA this effort level sustains
    #[must_use]
    pub const fn gpa(self) -> f64 {
        match self {
            Self::Minimum => 2.0,
            Self::Average => 3.0,
            Self::Good => 3.5,
            Self::Excellent => 4.0,
        }
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Minimum => "Minimum",
            Self::Average => "Average",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        };
        f.write_str(s)
    }
}

/// One row of the scenario planner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Effort level
    pub effort: Effort,
    /// Whether this effort level meets the required average
    pub possible: bool,
    /// Semesters of this effort needed to earn the remaining points
    pub semesters_needed: u32,
    /// Credits to carry per remaining semester
    pub credits_per_semester: u32,
}

/// Credit-based outlook across effort levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPlan {
    /// Program credits not yet completed
    pub remaining_credits: f64,
    /// Average GPA needed over the remaining credits
    pub required_average: f64,
    /// One row per effort level
    pub scenarios: Vec<Scenario>,
}

/// Explore effort levels over the remaining program credits.
///
/// Completed credits are estimated at 15 per completed semester; the current
/// semester counts as remaining.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn plan_scenarios(query: &GpaQuery) -> ScenarioPlan {
    let total_credits = f64::from(TOTAL_PROGRAM_CREDITS);
    let remaining_semesters = f64::from(PROGRAM_SEMESTERS - query.current_semester + 1);
    let completed_credits = f64::from(query.current_semester - 1) * ASSUMED_CREDITS_PER_SEMESTER;
    let remaining_credits = total_credits - completed_credits;

    let earned_points = completed_credits * query.current_cgpa;
    let required_points = total_credits * query.target_cgpa;
    let remaining_points = required_points - earned_points;
    let required_average = remaining_points / remaining_credits;

    let credits_per_semester = (remaining_credits / remaining_semesters).ceil().max(0.0) as u32;

    let scenarios = Effort::ALL
        .into_iter()
        .map(|effort| Scenario {
            effort,
            possible: required_average <= effort.gpa(),
            semesters_needed: (remaining_points / (ASSUMED_CREDITS_PER_SEMESTER * effort.gpa()))
                .ceil()
                .max(0.0) as u32,
            credits_per_semester,
        })
        .collect();

    ScenarioPlan {
        remaining_credits,
        required_average,
        scenarios,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(sem: &str, sgpa: &str, cgpa: &str, target: &str) -> GpaQueryInput {
        GpaQueryInput {
            current_semester: Some(sem.to_string()),
            current_sgpa: Some(sgpa.to_string()),
            current_cgpa: Some(cgpa.to_string()),
            target_cgpa: Some(target.to_string()),
        }
    }

    #[test]
    fn test_first_semester_projection() {
        let query = GpaQuery::new(1, 3.5, 3.5, 3.75).unwrap();
        let result = calculate_required_sgpa(&query).unwrap();
        // (3.75 * 8 - 3.50) / 8
        assert!((result.required_sgpa - 3.3125).abs() < 1e-12);
        assert_eq!(result.achievability, Achievability::Moderate);
        assert_eq!(result.remaining_semesters, 8);
    }

    #[test]
    fn test_mid_program_projection() {
        let query = GpaQuery::new(4, 3.2, 3.0, 3.5).unwrap();
        let result = calculate_required_sgpa(&query).unwrap();
        let expected = (3.5f64 * 8.0 - (3.0 * 3.0 + 3.2)) / 5.0;
        assert!((result.required_sgpa - expected).abs() < 1e-12);
        assert_eq!(result.achievability, Achievability::Moderate);
        assert_eq!(result.remaining_semesters, 5);
    }

    #[test]
    fn test_last_semester_divides_by_one_slot() {
        let query = GpaQuery::new(8, 3.0, 3.0, 3.2).unwrap();
        let result = calculate_required_sgpa(&query).unwrap();
        // (3.2 * 8 - (7 * 3.0 + 3.0)) / 1
        assert!((result.required_sgpa - 1.6).abs() < 1e-9);
        assert_eq!(result.remaining_semesters, 1);
    }

    #[test]
    fn test_no_slot_left_is_an_error() {
        let err = project(9, 3.0, 3.0, 3.0).unwrap_err();
        assert_eq!(
            err,
            ProjectionError::NoRemainingSemesters { current_semester: 9 }
        );
    }

    #[test]
    fn test_seventh_semester_is_finite() {
        let query = GpaQuery::new(7, 4.0, 4.0, 4.0).unwrap();
        let result = calculate_required_sgpa(&query).unwrap();
        assert!(result.required_sgpa.is_finite());
        assert_eq!(result.remaining_semesters, 2);
    }

    #[test]
    fn test_classification_thresholds() {
        assert_eq!(Achievability::classify(4.01), Achievability::Impossible);
        assert_eq!(Achievability::classify(4.0), Achievability::Difficult);
        assert_eq!(Achievability::classify(3.71), Achievability::Difficult);
        assert_eq!(Achievability::classify(3.7), Achievability::Moderate);
        assert_eq!(Achievability::classify(3.01), Achievability::Moderate);
        assert_eq!(Achievability::classify(3.0), Achievability::Achievable);
        assert_eq!(Achievability::classify(-1.0), Achievability::Achievable);
    }

    #[test]
    fn test_input_validation_reports_every_field() {
        let errors = GpaQueryInput::default().validate().unwrap_err();
        assert_eq!(errors.0.len(), 4);
        assert_eq!(
            errors.for_field(GpaField::CurrentSgpa),
            Some("Current SGPA is required")
        );

        let errors = input("9", "4.5", "abc", "-1").validate().unwrap_err();
        assert_eq!(errors.0.len(), 4);
        assert_eq!(
            errors.for_field(GpaField::CurrentCgpa),
            Some("CGPA must be between 0.00 and 4.00")
        );
        assert_eq!(
            errors.for_field(GpaField::TargetCgpa),
            Some("Target CGPA must be between 0.00 and 4.00")
        );
    }

    #[test]
    fn test_input_validation_partial_failure() {
        let errors = input("2", "3.2", "", "3.5").validate().unwrap_err();
        assert_eq!(errors.0.len(), 1);
        assert_eq!(
            errors.for_field(GpaField::CurrentCgpa),
            Some("Current CGPA is required")
        );
    }

    #[test]
    fn test_valid_input() {
        let query = input(" 3 ", "3.40", "3.20", "3.60").validate().unwrap();
        assert_eq!(query.current_semester(), 3);
        assert!((query.target_cgpa() - 3.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_numeric_validation_rejects_nan() {
        let errors = GpaQuery::new(0, f64::NAN, 4.0, 4.01).unwrap_err();
        assert_eq!(errors.0.len(), 3);
        assert!(errors.for_field(GpaField::CurrentCgpa).is_none());
    }

    #[test]
    fn test_projection_error_from_validation() {
        let errors = GpaQuery::new(1, 5.0, 3.0, 3.0).unwrap_err();
        let err: ProjectionError = errors.into();
        assert!(err.to_string().contains("SGPA must be between 0.00 and 4.00"));
    }

    #[test]
    fn test_scenarios() {
        let query = GpaQuery::new(3, 3.0, 3.0, 3.2).unwrap();
        let plan = plan_scenarios(&query);
        assert!((plan.remaining_credits - 132.0).abs() < 1e-9);
        let expected_avg = (162.0f64 * 3.2 - 30.0 * 3.0) / 132.0;
        assert!((plan.required_average - expected_avg).abs() < 1e-9);
        assert_eq!(plan.scenarios.len(), 4);

        let minimum = &plan.scenarios[0];
        assert_eq!(minimum.effort, Effort::Minimum);
        assert!(!minimum.possible);
        assert!(plan.scenarios[3].possible);
        // 132 credits over 6 semesters
        assert!(plan.scenarios.iter().all(|s| s.credits_per_semester == 22));
        // 428.4 points at 15 * 4.0 per semester
        assert_eq!(plan.scenarios[3].semesters_needed, 8);
    }

    #[test]
    fn test_scenarios_when_target_already_secured() {
        let query = GpaQuery::new(8, 4.0, 4.0, 0.0).unwrap();
        let plan = plan_scenarios(&query);
        assert!(plan.scenarios.iter().all(|s| s.possible));
        assert!(plan.scenarios.iter().all(|s| s.semesters_needed == 0));
    }
}
