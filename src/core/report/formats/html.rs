//! HTML report generator
//!
//! Generates a self-contained HTML grade report with embedded CSS. The page
//! is rendered from an askama template, so course names are HTML-escaped.

use crate::core::report::{GradeReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Assessment line of a course row
struct AssessmentRow {
    kind: String,
    weight: String,
    achieved: String,
}

/// One course in the report
struct CourseRow {
    position: usize,
    code: String,
    name: String,
    label: String,
    credits: String,
    total: String,
    letter: String,
    point: String,
    assessments: Vec<AssessmentRow>,
}

/// Courses earning one letter
struct DistributionRow {
    letter: String,
    count: usize,
}

#[derive(Template)]
#[template(path = "grade_report.html")]
struct GradeReportPage<'a> {
    title: &'a str,
    course_count: usize,
    total_credits: String,
    cgpa: String,
    rows: Vec<CourseRow>,
    distribution: Vec<DistributionRow>,
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn build_page<'a>(ctx: &'a GradeReportContext) -> GradeReportPage<'a> {
        let rows = ctx
            .courses
            .iter()
            .enumerate()
            .map(|(idx, graded)| CourseRow {
                position: idx + 1,
                code: graded.course.code.clone(),
                name: graded.course.name.clone(),
                label: graded.course.label(),
                credits: format!("{:.1}", graded.course.credits),
                total: format!("{:.2}%", graded.grade.total_percentage),
                letter: graded.grade.letter.to_string(),
                point: format!("{:.1}", graded.grade.grade_point),
                assessments: graded
                    .course
                    .assessments
                    .iter()
                    .map(|a| AssessmentRow {
                        kind: a.kind.to_string(),
                        weight: format!("{:.1}", a.weight),
                        achieved: format!("{:.2}", a.achieved()),
                    })
                    .collect(),
            })
            .collect();

        let distribution = ctx
            .distribution()
            .into_iter()
            .map(|(letter, count)| DistributionRow {
                letter: letter.to_string(),
                count,
            })
            .collect();

        GradeReportPage {
            title: &ctx.title,
            course_count: ctx.course_count(),
            total_credits: format!("{:.1}", ctx.total_credits()),
            cgpa: ctx.cgpa_display(),
            rows,
            distribution,
        }
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &GradeReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &GradeReportContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::build_page(ctx).render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::tests::sample_courses;

    #[test]
    fn test_render_escapes_names() {
        let courses = sample_courses();
        let ctx = GradeReportContext::new("Spring 2025", &courses);
        let html = HtmlReporter::new().render(&ctx).unwrap();

        assert!(html.contains("<title>Spring 2025</title>"));
        assert!(html.contains("Physics &lt;I&gt;"));
        assert!(!html.contains("Physics <I>"));
        assert!(html.contains(&ctx.cgpa_display()));
        assert!(html.contains("Mid Term"));
    }

    #[test]
    fn test_render_empty() {
        let ctx = GradeReportContext::new("Nothing", &[]);
        let html = HtmlReporter::new().render(&ctx).unwrap();
        assert!(html.contains("No courses tracked."));
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades.html");
        let courses = sample_courses();
        let ctx = GradeReportContext::new("Spring", &courses);
        HtmlReporter::new().generate(&ctx, &path).unwrap();
        assert!(std::fs::read_to_string(path).unwrap().contains("Algorithms"));
    }
}
