//! Course grades and credit-weighted CGPA
//!
//! Turns weighted assessment marks into a letter grade and grade point, and
//! aggregates grade points across courses weighted by credit hours.

use crate::core::models::{Assessment, Course, CourseGrade, LetterGrade};
use std::collections::BTreeMap;

/// Grade a course from its assessments.
///
/// The total is the plain sum of achieved marks; an empty list grades as
/// 0% / F / 0.0.
#[must_use]
pub fn calculate_grade(assessments: &[Assessment]) -> CourseGrade {
    let total: f64 = assessments.iter().map(Assessment::achieved).sum();
    CourseGrade::from_percentage(total)
}

/// Credit-weighted mean of `(grade_point, credits)` pairs.
///
/// Returns 0.0 when the total credit weight is not positive, so an empty
/// input never produces NaN.
#[must_use]
pub fn weighted_gpa<I>(entries: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (points, credits) = entries
        .into_iter()
        .fold((0.0, 0.0), |(points, credits), (point, weight)| {
            (point.mul_add(weight, points), credits + weight)
        });

    if credits > 0.0 {
        points / credits
    } else {
        0.0
    }
}

/// Whether a credit value carries weight (finite and positive)
#[must_use]
pub fn counts_credits(credits: f64) -> bool {
    credits.is_finite() && credits > 0.0
}

/// Credit-weighted CGPA over tracked courses
///
/// Courses whose credits do not count are left out.
#[must_use]
pub fn calculate_cgpa(courses: &[Course]) -> f64 {
    weighted_gpa(
        courses
            .iter()
            .filter(|course| counts_credits(course.credits))
            .map(|course| (course.grade().grade_point, course.credits)),
    )
}

/// A course recorded by letter grade only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterEntry {
    /// Letter earned
    pub grade: LetterGrade,
    /// Credit hours
    pub credits: f64,
}

impl std::str::FromStr for LetterEntry {
    type Err = String;

    /// Parses `GRADE:CREDITS`, e.g. `B+:3`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (grade, credits) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected GRADE:CREDITS, got '{s}'"))?;
        let grade = grade.parse::<LetterGrade>()?;
        let credits = credits
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Invalid credit value in '{s}'"))?;
        Ok(Self { grade, credits })
    }
}

/// GPA over letter-graded courses.
///
/// Entries with missing (non-positive or non-finite) credits are skipped.
#[must_use]
pub fn letter_gpa(entries: &[LetterEntry]) -> f64 {
    weighted_gpa(
        entries
            .iter()
            .filter(|e| counts_credits(e.credits))
            .map(|e| (e.grade.grade_point(), e.credits)),
    )
}

/// Total credits that [`letter_gpa`] weighs
#[must_use]
pub fn letter_credits(entries: &[LetterEntry]) -> f64 {
    entries
        .iter()
        .map(|e| e.credits)
        .filter(|credits| counts_credits(*credits))
        .sum()
}

/// Number of courses per letter, best letter first
#[must_use]
pub fn grade_distribution<I>(letters: I) -> BTreeMap<LetterGrade, usize>
where
    I: IntoIterator<Item = LetterGrade>,
{
    let mut distribution = BTreeMap::new();
    for letter in letters {
        *distribution.entry(letter).or_insert(0) += 1;
    }
    distribution
}

/// Two-decimal display of a GPA value
#[must_use]
pub fn format_gpa(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{AssessmentKind, AssessmentTemplate};

    fn graded(kind: AssessmentKind, weight: f64, achieved: f64) -> Assessment {
        let mut a = Assessment::new(kind, weight);
        a.set_achieved(achieved);
        a
    }

    fn course_with_total(id: u64, credits: f64, total: f64) -> Course {
        let template = AssessmentTemplate::new(vec![crate::core::models::TemplateEntry {
            kind: AssessmentKind::Final,
            weight: 100.0,
        }])
        .unwrap();
        let mut course = Course::new(id, format!("Course {id}"), String::new(), credits, &template);
        course.assessments[0].set_achieved(total);
        course
    }

    #[test]
    fn test_empty_assessments() {
        let grade = calculate_grade(&[]);
        assert!(grade.total_percentage.abs() < f64::EPSILON);
        assert_eq!(grade.letter, LetterGrade::F);
        assert!(grade.grade_point.abs() < f64::EPSILON);
    }

    #[test]
    fn test_grade_sums_achieved() {
        let assessments = vec![
            graded(AssessmentKind::Attendance, 10.0, 10.0),
            graded(AssessmentKind::MidTerm, 25.0, 20.0),
            graded(AssessmentKind::Final, 40.0, 35.0),
            graded(AssessmentKind::ClassTests, 15.0, 12.0),
            graded(AssessmentKind::Assignment, 10.0, 8.0),
        ];
        let grade = calculate_grade(&assessments);
        assert!((grade.total_percentage - 85.0).abs() < 1e-9);
        assert_eq!(grade.letter, LetterGrade::AMinus);
        assert!((grade.grade_point - 3.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_grade_boundary_at_ninety() {
        let below = calculate_grade(&[graded(AssessmentKind::Final, 100.0, 89.999)]);
        assert!(below.total_percentage < 90.0);
        assert_eq!(below.letter, LetterGrade::AMinus);
        assert!((below.grade_point - 3.7).abs() < f64::EPSILON);

        let at = calculate_grade(&[graded(AssessmentKind::Final, 100.0, 90.0)]);
        assert_eq!(at.letter, LetterGrade::A);
        assert!((at.grade_point - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cgpa_empty_is_zero() {
        let cgpa = calculate_cgpa(&[]);
        assert!(cgpa.abs() < f64::EPSILON);
        assert!(!cgpa.is_nan());
    }

    #[test]
    fn test_cgpa_is_credit_weighted() {
        let courses = vec![course_with_total(1, 3.0, 95.0), course_with_total(2, 4.0, 76.0)];
        let cgpa = calculate_cgpa(&courses);
        assert!((cgpa - 24.0 / 7.0).abs() < 1e-9);
        assert_eq!(format_gpa(cgpa), "3.43");
    }

    #[test]
    fn test_weighted_gpa_example() {
        let gpa = weighted_gpa([(4.0, 3.0), (3.0, 4.0)]);
        assert!((gpa - 24.0 / 7.0).abs() < 1e-9);

        let gpa = weighted_gpa([(4.0, 3.0), (1.5, 4.0)]);
        assert_eq!(format_gpa(gpa), "2.57");
    }

    #[test]
    fn test_zero_credit_courses() {
        let courses = vec![course_with_total(1, 0.0, 95.0)];
        assert!(calculate_cgpa(&courses).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_credits_do_not_count() {
        let courses = vec![
            course_with_total(1, 3.0, 95.0),
            course_with_total(2, -1.0, 10.0),
            course_with_total(3, f64::NAN, 10.0),
        ];
        assert!((calculate_cgpa(&courses) - 4.0).abs() < f64::EPSILON);
        assert!(!counts_credits(0.0));
        assert!(counts_credits(0.5));
    }

    #[test]
    fn test_letter_gpa_skips_missing_credits() {
        let entries = vec![
            "A:3".parse::<LetterEntry>().unwrap(),
            "B:4".parse::<LetterEntry>().unwrap(),
            LetterEntry {
                grade: LetterGrade::F,
                credits: 0.0,
            },
            LetterEntry {
                grade: LetterGrade::F,
                credits: f64::NAN,
            },
        ];
        assert!((letter_gpa(&entries) - 24.0 / 7.0).abs() < 1e-9);
        assert!((letter_credits(&entries) - 7.0).abs() < f64::EPSILON);
        assert!(letter_gpa(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_letter_entry_parse_errors() {
        assert!("A".parse::<LetterEntry>().is_err());
        assert!("Z:3".parse::<LetterEntry>().is_err());
        assert!("A:three".parse::<LetterEntry>().is_err());
    }

    #[test]
    fn test_distribution_counts() {
        let dist = grade_distribution([LetterGrade::A, LetterGrade::B, LetterGrade::A]);
        assert_eq!(dist.get(&LetterGrade::A), Some(&2));
        assert_eq!(dist.get(&LetterGrade::B), Some(&1));
        assert_eq!(dist.keys().next(), Some(&LetterGrade::A));
    }
}
