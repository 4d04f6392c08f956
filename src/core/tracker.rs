//! Weighted grade tracker
//!
//! Holds the tracked course list, the staging draft for the next course, and
//! the assessment template. Every mutation is written through the
//! [`TrackerStore`] before it returns.

use crate::core::grading;
use crate::core::models::{AssessmentTemplate, Course, CourseGrade};
use crate::core::store::{StoreError, TrackerStore};
use crate::{debug, info, warn};
use std::time::{SystemTime, UNIX_EPOCH};

/// Credits the staging draft starts with
pub const DEFAULT_DRAFT_CREDITS: f64 = 3.0;

/// Tracker failures
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// The draft has no course name
    #[error("Course name is required")]
    MissingName,

    /// The draft's credits are zero, negative or not a number
    #[error("Credits must be a positive number, got {0}")]
    InvalidCredits(f64),

    /// No course at this position
    #[error("No course at position {index} ({count} tracked)")]
    CourseIndexOutOfRange {
        /// Requested 0-based index
        index: usize,
        /// Number of tracked courses
        count: usize,
    },

    /// No assessment at this position in the course
    #[error("Course '{course}' has no assessment at position {index} ({count} assessments)")]
    AssessmentIndexOutOfRange {
        /// Course label
        course: String,
        /// Requested 0-based index
        index: usize,
        /// Number of assessments in the course
        count: usize,
    },

    /// Persisting the change failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Input staging record for the next course
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
    /// Course name
    pub name: String,
    /// Course code
    pub code: String,
    /// Credit hours
    pub credits: f64,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            credits: DEFAULT_DRAFT_CREDITS,
        }
    }
}

/// Tracked course with its current grade
#[derive(Debug, Clone, Copy)]
pub struct GradedCourse<'a> {
    /// The course
    pub course: &'a Course,
    /// Its current grade
    pub grade: CourseGrade,
}

/// Course list bound to a store
pub struct GradeTracker<S: TrackerStore> {
    store: S,
    template: AssessmentTemplate,
    courses: Vec<Course>,
    /// Staging record consumed by [`GradeTracker::add_course`]
    pub draft: CourseDraft,
}

impl<S: TrackerStore> GradeTracker<S> {
    /// Load the tracked courses from a store.
    ///
    /// Stored scores are re-clamped to their weights on load. Courses whose
    /// credits are not a positive number are skipped with a warning.
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the store cannot be read.
    pub fn open(store: S, template: AssessmentTemplate) -> Result<Self, StoreError> {
        let mut courses = store.load()?;
        courses.retain(|course| {
            let keep = grading::counts_credits(course.credits);
            if !keep {
                warn!(
                    "Skipping stored course {} with invalid credits {}",
                    course.label(),
                    course.credits
                );
            }
            keep
        });
        for course in &mut courses {
            course.normalize();
        }
        debug!("Grade tracker opened with {} course(s)", courses.len());

        Ok(Self {
            store,
            template,
            courses,
            draft: CourseDraft::default(),
        })
    }

    /// Tracked courses, in insertion order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Template used for new courses
    #[must_use]
    pub const fn template(&self) -> &AssessmentTemplate {
        &self.template
    }

    /// Course at a 0-based position
    ///
    /// # Errors
    /// Returns [`TrackerError::CourseIndexOutOfRange`] for a bad index.
    pub fn course(&self, index: usize) -> Result<&Course, TrackerError> {
        self.courses
            .get(index)
            .ok_or(TrackerError::CourseIndexOutOfRange {
                index,
                count: self.courses.len(),
            })
    }

    /// Add a course from the draft.
    ///
    /// The new course gets a unique id and fresh assessments from the
    /// template; the draft is reset afterwards.
    ///
    /// # Errors
    /// Returns [`TrackerError::MissingName`] or [`TrackerError::InvalidCredits`]
    /// for a bad draft (the draft is left untouched), or a store error.
    pub fn add_course(&mut self) -> Result<&Course, TrackerError> {
        let name = self.draft.name.trim();
        if name.is_empty() {
            return Err(TrackerError::MissingName);
        }
        let credits = self.draft.credits;
        if !grading::counts_credits(credits) {
            return Err(TrackerError::InvalidCredits(credits));
        }

        let course = Course::new(
            self.next_id(),
            name.to_string(),
            self.draft.code.trim().to_string(),
            credits,
            &self.template,
        );
        info!("Adding course {} (id {})", course.label(), course.id);

        let mut staged = self.courses.clone();
        staged.push(course);
        self.commit(staged)?;
        self.draft = CourseDraft::default();

        let last = self.courses.len() - 1;
        Ok(&self.courses[last])
    }

    /// Store a score for one assessment, clamped to its weight.
    ///
    /// Returns the value actually stored.
    ///
    /// # Errors
    /// Returns an index error for a bad position, or a store error.
    pub fn update_assessment(
        &mut self,
        course_index: usize,
        assessment_index: usize,
        value: f64,
    ) -> Result<f64, TrackerError> {
        let mut staged = self.courses.clone();
        let count = staged.len();
        let course = staged
            .get_mut(course_index)
            .ok_or(TrackerError::CourseIndexOutOfRange {
                index: course_index,
                count,
            })?;

        let assessment_count = course.assessments.len();
        let label = course.label();
        let assessment = course.assessments.get_mut(assessment_index).ok_or(
            TrackerError::AssessmentIndexOutOfRange {
                course: label,
                index: assessment_index,
                count: assessment_count,
            },
        )?;

        let stored = assessment.set_achieved(value);
        if (stored - value).abs() > f64::EPSILON {
            debug!(
                "Score {value} for {} clamped to {stored} (weight {})",
                assessment.kind, assessment.weight
            );
        }

        self.commit(staged)?;
        Ok(stored)
    }

    /// Remove a course by position and return it
    ///
    /// # Errors
    /// Returns [`TrackerError::CourseIndexOutOfRange`] for a bad index, or a
    /// store error.
    pub fn delete_course(&mut self, index: usize) -> Result<Course, TrackerError> {
        if index >= self.courses.len() {
            return Err(TrackerError::CourseIndexOutOfRange {
                index,
                count: self.courses.len(),
            });
        }
        let mut staged = self.courses.clone();
        let removed = staged.remove(index);
        self.commit(staged)?;
        info!("Removed course {}", removed.label());
        Ok(removed)
    }

    /// Every course with its current grade
    #[must_use]
    pub fn grades(&self) -> Vec<GradedCourse<'_>> {
        self.courses
            .iter()
            .map(|course| GradedCourse {
                course,
                grade: course.grade(),
            })
            .collect()
    }

    /// Credit-weighted CGPA over all tracked courses (0.0 when empty)
    #[must_use]
    pub fn cgpa(&self) -> f64 {
        grading::calculate_cgpa(&self.courses)
    }

    /// Save a new course list, then adopt it; a failed save changes nothing
    fn commit(&mut self, courses: Vec<Course>) -> Result<(), StoreError> {
        self.store.save(&courses)?;
        self.courses = courses;
        Ok(())
    }

    /// Millisecond timestamp, bumped past every existing id
    fn next_id(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        let floor = self
            .courses
            .iter()
            .map(|c| c.id.saturating_add(1))
            .max()
            .unwrap_or(0);
        now.max(floor)
    }
}
