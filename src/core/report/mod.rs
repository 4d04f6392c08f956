//! Grade report generation
//!
//! Renders the tracked courses, their grades and the overall CGPA as a
//! Markdown or HTML document.

pub mod formats;

use crate::core::grading::{self, format_gpa};
use crate::core::models::{Course, LetterGrade};
use crate::core::tracker::GradedCourse;
use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Data needed to render a grade report
#[derive(Debug, Clone)]
pub struct GradeReportContext<'a> {
    /// Report heading
    pub title: String,
    /// Courses with their current grades
    pub courses: Vec<GradedCourse<'a>>,
}

impl<'a> GradeReportContext<'a> {
    /// Grade every course and build the context
    #[must_use]
    pub fn new(title: impl Into<String>, courses: &'a [Course]) -> Self {
        Self {
            title: title.into(),
            courses: courses
                .iter()
                .map(|course| GradedCourse {
                    course,
                    grade: course.grade(),
                })
                .collect(),
        }
    }

    /// Number of courses
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Sum of course credits
    #[must_use]
    pub fn total_credits(&self) -> f64 {
        self.courses.iter().map(|g| g.course.credits).sum()
    }

    /// Credit-weighted CGPA of the courses
    #[must_use]
    pub fn cgpa(&self) -> f64 {
        grading::weighted_gpa(
            self.courses
                .iter()
                .map(|g| (g.grade.grade_point, g.course.credits)),
        )
    }

    /// CGPA rounded for display
    #[must_use]
    pub fn cgpa_display(&self) -> String {
        format_gpa(self.cgpa())
    }

    /// Course count per letter, best first
    #[must_use]
    pub fn distribution(&self) -> BTreeMap<LetterGrade, usize> {
        grading::grade_distribution(self.courses.iter().map(|g| g.grade.letter))
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &GradeReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &GradeReportContext) -> Result<String, Box<dyn Error>>;
}
