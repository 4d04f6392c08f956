//! Markdown report generator
//!
//! Generates grade reports as Markdown tables. These render well in GitHub,
//! GitLab, and VS Code.

use crate::core::report::{GradeReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/grade_report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &GradeReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{title}}", &ctx.title);
        output = output.replace("{{course_count}}", &ctx.course_count().to_string());
        output = output.replace("{{total_credits}}", &format!("{:.1}", ctx.total_credits()));
        output = output.replace("{{cgpa}}", &ctx.cgpa_display());

        output = output.replace("{{course_table}}", &Self::generate_course_table(ctx));
        output = output.replace(
            "{{assessment_details}}",
            &Self::generate_assessment_details(ctx),
        );
        output = output.replace("{{distribution}}", &Self::generate_distribution(ctx));

        output
    }

    /// One row per course with its grade
    fn generate_course_table(ctx: &GradeReportContext) -> String {
        if ctx.courses.is_empty() {
            return "_No courses tracked._\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| # | Code | Course | Credits | Total | Grade | Point |\n");
        table.push_str("|---|---|---|---|---|---|---|\n");

        for (idx, graded) in ctx.courses.iter().enumerate() {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {:.1} | {:.2}% | {} | {:.1} |",
                idx + 1,
                escape_cell(&graded.course.code),
                escape_cell(&graded.course.name),
                graded.course.credits,
                graded.grade.total_percentage,
                graded.grade.letter,
                graded.grade.grade_point
            );
        }
        table
    }

    /// Per-course assessment tables
    fn generate_assessment_details(ctx: &GradeReportContext) -> String {
        let mut out = String::new();
        for graded in &ctx.courses {
            let _ = writeln!(out, "### {}\n", escape_cell(&graded.course.label()));
            out.push_str("| Assessment | Weight | Achieved |\n");
            out.push_str("|---|---|---|\n");
            for a in &graded.course.assessments {
                let _ = writeln!(out, "| {} | {:.1} | {:.2} |", a.kind, a.weight, a.achieved());
            }
            out.push('\n');
        }
        out
    }

    fn generate_distribution(ctx: &GradeReportContext) -> String {
        let distribution = ctx.distribution();
        if distribution.is_empty() {
            return "_No grades yet._\n".to_string();
        }

        let mut out = String::new();
        out.push_str("| Grade | Courses |\n|---|---|\n");
        for (letter, count) in distribution {
            let _ = writeln!(out, "| {letter} | {count} |");
        }
        out
    }
}

/// Keep user text from breaking the table layout
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &GradeReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &GradeReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::tests::sample_courses;

    #[test]
    fn test_render_contains_summary_and_rows() {
        let courses = sample_courses();
        let ctx = GradeReportContext::new("Spring 2025", &courses);
        let md = MarkdownReporter::new().render(&ctx).unwrap();

        assert!(md.starts_with("# Spring 2025"));
        assert!(md.contains(&format!("**{}**", ctx.cgpa_display())));
        assert!(md.contains("| 1 | CSE221 | Algorithms | 3.0 | 100.00% | A | 4.0 |"));
        assert!(md.contains("### PHY111 - Physics <I>"));
        assert!(md.contains("| C+ | 1 |"));
        assert!(!md.contains("{{"));
    }

    #[test]
    fn test_render_empty() {
        let ctx = GradeReportContext::new("Nothing", &[]);
        let md = MarkdownReporter::new().render(&ctx).unwrap();
        assert!(md.contains("_No courses tracked._"));
        assert!(md.contains("_No grades yet._"));
    }

    #[test]
    fn test_pipes_are_escaped() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
    }
}
