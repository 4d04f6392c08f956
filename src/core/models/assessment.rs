//! Assessments and the weight template courses are created from

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tolerance when checking that template weights add up to 100
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Kind of graded component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssessmentKind {
    /// Attendance marks
    Attendance,
    /// In-class tests
    #[serde(rename = "Class Tests")]
    ClassTests,
    /// Mid-term examination
    #[serde(rename = "Mid Term")]
    MidTerm,
    /// Final examination
    Final,
    /// Take-home assignments
    Assignment,
    /// Quizzes
    Quiz,
    /// Lab work
    Lab,
    /// Course project
    Project,
    /// Presentations
    Presentation,
}

impl AssessmentKind {
    /// Every kind, in display order
    pub const ALL: [Self; 9] = [
        Self::Attendance,
        Self::ClassTests,
        Self::MidTerm,
        Self::Final,
        Self::Assignment,
        Self::Quiz,
        Self::Lab,
        Self::Project,
        Self::Presentation,
    ];

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Attendance => "Attendance",
            Self::ClassTests => "Class Tests",
            Self::MidTerm => "Mid Term",
            Self::Final => "Final",
            Self::Assignment => "Assignment",
            Self::Quiz => "Quiz",
            Self::Lab => "Lab",
            Self::Project => "Project",
            Self::Presentation => "Presentation",
        }
    }
}

impl fmt::Display for AssessmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AssessmentKind {
    type Err = String;

    /// Accepts labels case-insensitively, ignoring spaces, dashes and underscores
    /// ("Mid Term", "midterm", "mid-term").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squash = |v: &str| {
            v.chars()
                .filter(|c| !matches!(c, ' ' | '-' | '_'))
                .collect::<String>()
                .to_ascii_lowercase()
        };
        let wanted = squash(s);
        Self::ALL
            .into_iter()
            .find(|kind| squash(kind.label()) == wanted)
            .ok_or_else(|| format!("Unknown assessment type: '{s}'"))
    }
}

/// A graded component of a course.
///
/// `achieved` is in percentage points and always lies in `[0, weight]`;
/// writes go through [`Assessment::set_achieved`], which clamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Component kind
    pub kind: AssessmentKind,

    /// Share of the course total, in percentage points
    pub weight: f64,

    achieved: f64,
}

impl Assessment {
    /// Create an ungraded assessment
    #[must_use]
    pub const fn new(kind: AssessmentKind, weight: f64) -> Self {
        Self {
            kind,
            weight,
            achieved: 0.0,
        }
    }

    /// Marks achieved so far
    #[must_use]
    pub const fn achieved(&self) -> f64 {
        self.achieved
    }

    /// Store a score, clamped to `[0, weight]`. NaN stores 0.
    ///
    /// Returns the value actually stored.
    pub fn set_achieved(&mut self, value: f64) -> f64 {
        self.achieved = clamp_score(value, self.weight);
        self.achieved
    }

    /// Re-apply the clamp to whatever is currently stored
    pub fn normalize(&mut self) {
        self.set_achieved(self.achieved);
    }

    /// Whether this is the final examination
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.kind == AssessmentKind::Final
    }
}

fn clamp_score(value: f64, weight: f64) -> f64 {
    let upper = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, upper)
    }
}

/// Errors raised while validating an assessment template
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TemplateError {
    /// The template has no entries
    #[error("Assessment template is empty")]
    Empty,

    /// A weight is zero, negative or not a number
    #[error("Weight for '{kind}' must be a positive number, got {weight}")]
    InvalidWeight {
        /// Offending kind
        kind: AssessmentKind,
        /// Offending weight
        weight: f64,
    },

    /// The same kind appears twice
    #[error("Assessment type '{0}' appears more than once")]
    DuplicateKind(AssessmentKind),

    /// Weights do not add up to 100
    #[error("Assessment weights must sum to 100, got {0}")]
    WeightSum(f64),
}

/// One `{kind, weight}` pair of a template
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Component kind
    pub kind: AssessmentKind,
    /// Weight in percentage points
    pub weight: f64,
}

/// Ordered list of components every new course starts with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentTemplate {
    entries: Vec<TemplateEntry>,
}

impl AssessmentTemplate {
    /// Build and validate a template
    ///
    /// # Errors
    /// Returns a [`TemplateError`] if the entries are empty, contain a
    /// non-positive weight or a repeated kind, or do not sum to 100.
    pub fn new(entries: Vec<TemplateEntry>) -> Result<Self, TemplateError> {
        let template = Self { entries };
        template.validate()?;
        Ok(template)
    }

    /// Check the template invariants
    ///
    /// # Errors
    /// See [`AssessmentTemplate::new`].
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.entries.is_empty() {
            return Err(TemplateError::Empty);
        }

        for (idx, entry) in self.entries.iter().enumerate() {
            if !entry.weight.is_finite() || entry.weight <= 0.0 {
                return Err(TemplateError::InvalidWeight {
                    kind: entry.kind,
                    weight: entry.weight,
                });
            }
            if self.entries[..idx].iter().any(|e| e.kind == entry.kind) {
                return Err(TemplateError::DuplicateKind(entry.kind));
            }
        }

        let sum = self.total_weight();
        if (sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(TemplateError::WeightSum(sum));
        }
        Ok(())
    }

    /// Template entries in order
    #[must_use]
    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    /// Sum of all weights
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Fresh, ungraded assessments for a new course
    #[must_use]
    pub fn instantiate(&self) -> Vec<Assessment> {
        self.entries
            .iter()
            .map(|e| Assessment::new(e.kind, e.weight))
            .collect()
    }
}

impl Default for AssessmentTemplate {
    fn default() -> Self {
        Self {
            entries: vec![
                TemplateEntry {
                    kind: AssessmentKind::Attendance,
                    weight: 10.0,
                },
                TemplateEntry {
                    kind: AssessmentKind::ClassTests,
                    weight: 15.0,
                },
                TemplateEntry {
                    kind: AssessmentKind::Assignment,
                    weight: 10.0,
                },
                TemplateEntry {
                    kind: AssessmentKind::MidTerm,
                    weight: 25.0,
                },
                TemplateEntry {
                    kind: AssessmentKind::Final,
                    weight: 40.0,
                },
            ],
        }
    }
}

impl fmt::Display for AssessmentTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{} {}", e.kind, e.weight))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
