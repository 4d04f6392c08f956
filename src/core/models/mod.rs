//! Data models for the student toolkit

pub mod assessment;
pub mod course;
pub mod grade;
pub mod semester;

pub use assessment::{
    Assessment, AssessmentKind, AssessmentTemplate, TemplateEntry, TemplateError,
};
pub use course::Course;
pub use grade::{CourseGrade, LetterGrade};
pub use semester::{SemesterRecord, PROGRAM_SEMESTERS, SEMESTER_TABLE, TOTAL_PROGRAM_CREDITS};
