//! Course model

use super::assessment::{Assessment, AssessmentTemplate};
use super::grade::CourseGrade;
use serde::{Deserialize, Serialize};

/// A tracked course and its weighted assessments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique id assigned when the course is added
    pub id: u64,

    /// Course name (e.g., "Data Structures")
    pub name: String,

    /// Course code (e.g., "CSE220")
    pub code: String,

    /// Credit hours (can be fractional)
    pub credits: f64,

    /// Graded components, in template order
    pub assessments: Vec<Assessment>,
}

impl Course {
    /// Create a course with ungraded assessments from a template
    ///
    /// # Arguments
    /// * `id` - Unique course id
    /// * `name` - Course name
    /// * `code` - Course code
    /// * `credits` - Credit hours
    /// * `template` - Assessment weights to start from
    #[must_use]
    pub fn new(
        id: u64,
        name: String,
        code: String,
        credits: f64,
        template: &AssessmentTemplate,
    ) -> Self {
        Self {
            id,
            name,
            code,
            credits,
            assessments: template.instantiate(),
        }
    }

    /// Current grade from the achieved marks
    #[must_use]
    pub fn grade(&self) -> CourseGrade {
        crate::core::grading::calculate_grade(&self.assessments)
    }

    /// The final examination, if the course has one
    #[must_use]
    pub fn final_assessment(&self) -> Option<&Assessment> {
        self.assessments.iter().find(|a| a.is_final())
    }

    /// Marks achieved in everything except the final
    #[must_use]
    pub fn non_final_total(&self) -> f64 {
        self.assessments
            .iter()
            .filter(|a| !a.is_final())
            .map(Assessment::achieved)
            .sum()
    }

    /// Clamp every stored score back into range
    pub fn normalize(&mut self) {
        for assessment in &mut self.assessments {
            assessment.normalize();
        }
    }

    /// Display label, "CODE - Name" or just the name when there is no code
    #[must_use]
    pub fn label(&self) -> String {
        if self.code.trim().is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.code, self.name)
        }
    }
}
