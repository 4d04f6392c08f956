//! Integration tests for the GPA calculators

use student_toolkit::core::final_exam::{required_final_score, TargetGrade};
use student_toolkit::core::grading::{calculate_grade, letter_gpa, LetterEntry};
use student_toolkit::core::models::{Assessment, AssessmentKind, LetterGrade};
use student_toolkit::core::projection::{
    calculate_required_sgpa, Achievability, GpaField, GpaQueryInput,
};

fn form(sem: &str, sgpa: &str, cgpa: &str, target: &str) -> GpaQueryInput {
    GpaQueryInput {
        current_semester: Some(sem.to_string()),
        current_sgpa: Some(sgpa.to_string()),
        current_cgpa: Some(cgpa.to_string()),
        target_cgpa: Some(target.to_string()),
    }
}

#[test]
fn test_form_to_projection() {
    let query = form("1", "3.50", "3.50", "3.75")
        .validate()
        .expect("Form should be valid");
    let result = calculate_required_sgpa(&query).expect("Semester 1 has room to plan");
    assert!((result.required_sgpa - 3.3125).abs() < 1e-12);
    assert_eq!(result.achievability, Achievability::Moderate);
}

#[test]
fn test_unreachable_target_is_impossible() {
    let query = form("7", "2.0", "2.0", "4.0")
        .validate()
        .expect("Form should be valid");
    let result = calculate_required_sgpa(&query).expect("Semester 7 has room to plan");
    assert!(result.required_sgpa > 4.0);
    assert_eq!(result.achievability, Achievability::Impossible);
}

#[test]
fn test_rejected_form_never_computes() {
    let errors = form("3", "4.2", "3.0", "")
        .validate()
        .expect_err("Form should be rejected");
    assert_eq!(errors.0.len(), 2);
    assert!(errors.for_field(GpaField::CurrentSgpa).is_some());
    assert!(errors.for_field(GpaField::TargetCgpa).is_some());
    assert!(errors.for_field(GpaField::CurrentSemester).is_none());
}

#[test]
fn test_final_semester_carries_the_whole_gap() {
    let query = form("8", "3.0", "3.0", "3.2")
        .validate()
        .expect("Form should be valid");
    let result = calculate_required_sgpa(&query).expect("Semester 8 still has one slot");
    assert_eq!(result.remaining_semesters, 1);
    assert!((result.required_sgpa - 1.6).abs() < 1e-9);
}

#[test]
fn test_grade_boundaries() {
    let at = |marks: f64| {
        let mut a = Assessment::new(AssessmentKind::Final, 100.0);
        a.set_achieved(marks);
        calculate_grade(&[a])
    };
    assert_eq!(at(90.0).letter, LetterGrade::A);
    assert_eq!(at(89.999).letter, LetterGrade::AMinus);
    assert_eq!(at(59.99).letter, LetterGrade::F);
    assert!(at(59.99).grade_point.abs() < f64::EPSILON);

    let empty = calculate_grade(&[]);
    assert_eq!(empty.letter, LetterGrade::F);
    assert!(empty.total_percentage.abs() < f64::EPSILON);
}

#[test]
fn test_required_final_examples() {
    let b = required_final_score(50.0, TargetGrade::B, 40.0).expect("Valid inputs");
    assert!((b.required_final - 25.0).abs() < f64::EPSILON);
    assert!(b.is_possible);

    let a = required_final_score(40.0, TargetGrade::A, 40.0).expect("Valid inputs");
    assert!((a.required_unclamped - 50.0).abs() < f64::EPSILON);
    assert!(!a.is_possible);
}

#[test]
fn test_letter_gpa_from_cli_entries() {
    let entries: Vec<LetterEntry> = ["A:3", "b+:4", "C:0"]
        .iter()
        .map(|s| s.parse().expect("Entry should parse"))
        .collect();
    let expected = (4.0 * 3.0 + 3.3 * 4.0) / 7.0;
    assert!((letter_gpa(&entries) - expected).abs() < 1e-9);
    assert!("A3".parse::<LetterEntry>().is_err());
}
