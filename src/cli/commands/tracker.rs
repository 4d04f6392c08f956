//! Grade tracker command handler

use super::{fail, record_activity, to_index};
use crate::args::TrackerSubcommand;
use std::fs;
use std::path::{Path, PathBuf};
use student_toolkit::config::Config;
use student_toolkit::core::grading::format_gpa;
use student_toolkit::core::report::{
    GradeReportContext, HtmlReporter, MarkdownReporter, ReportFormat, ReportGenerator,
};
use student_toolkit::core::store::JsonFileStore;
use student_toolkit::core::tracker::{CourseDraft, GradeTracker};
use student_toolkit::verbose;

const TOOL_NAME: &str = "Grade Tracker";

/// Open the tracker on the configured data directory and dispatch
pub fn run(subcommand: TrackerSubcommand, config: &Config) {
    let store = JsonFileStore::in_dir(&config.data_dir());
    verbose!("Tracked courses file: {}", store.path().display());

    let mut tracker = match GradeTracker::open(store, config.assessment_template()) {
        Ok(tracker) => tracker,
        Err(e) => fail(e),
    };

    match subcommand {
        TrackerSubcommand::Add {
            name,
            code,
            credits,
        } => handle_add(&mut tracker, name, code, credits, config),
        TrackerSubcommand::Score {
            course,
            assessment,
            value,
        } => handle_score(&mut tracker, course, assessment, value, config),
        TrackerSubcommand::Remove { course } => handle_remove(&mut tracker, course, config),
        TrackerSubcommand::List => print_courses(&tracker),
        TrackerSubcommand::Report { format, output } => {
            handle_report(&tracker, &format, output.as_deref(), config);
        }
    }
}

fn handle_add(
    tracker: &mut GradeTracker<JsonFileStore>,
    name: String,
    code: String,
    credits: f64,
    config: &Config,
) {
    tracker.draft = CourseDraft {
        name,
        code,
        credits,
    };
    let (label, components) = match tracker.add_course() {
        Ok(course) => (course.label(), course.assessments.len()),
        Err(e) => fail(e),
    };

    println!("✓ Tracking {label} with {components} assessment(s)");
    println!("  Template: {}", tracker.template());
    record_activity(config, TOOL_NAME, &format!("Added {label}"));
}

fn handle_score(
    tracker: &mut GradeTracker<JsonFileStore>,
    course: usize,
    assessment: usize,
    value: f64,
    config: &Config,
) {
    let ci = to_index(course, tracker.courses().len(), "course").unwrap_or_else(|e| fail(e));
    let assessment_count = tracker.courses()[ci].assessments.len();
    let ai = to_index(assessment, assessment_count, "assessment").unwrap_or_else(|e| fail(e));

    let stored = match tracker.update_assessment(ci, ai, value) {
        Ok(stored) => stored,
        Err(e) => fail(e),
    };

    let updated = &tracker.courses()[ci];
    let slot = &updated.assessments[ai];
    if (stored - value).abs() > f64::EPSILON {
        println!(
            "! {value} is outside 0-{} for {}; stored {stored}",
            slot.weight, slot.kind
        );
    }
    let grade = updated.grade();
    println!(
        "✓ {}: {} = {stored}/{} (total {:.2}%, {})",
        updated.label(),
        slot.kind,
        slot.weight,
        grade.total_percentage,
        grade.letter
    );
    record_activity(
        config,
        TOOL_NAME,
        &format!("{} now at {:.2}% ({})", updated.label(), grade.total_percentage, grade.letter),
    );
}

fn handle_remove(tracker: &mut GradeTracker<JsonFileStore>, course: usize, config: &Config) {
    let idx = to_index(course, tracker.courses().len(), "course").unwrap_or_else(|e| fail(e));
    match tracker.delete_course(idx) {
        Ok(removed) => {
            println!("✓ Removed {}", removed.label());
            record_activity(config, TOOL_NAME, &format!("Removed {}", removed.label()));
        }
        Err(e) => fail(e),
    }
}

fn print_courses(tracker: &GradeTracker<JsonFileStore>) {
    let graded = tracker.grades();
    if graded.is_empty() {
        println!("No courses tracked yet. Add one with `tracker add <NAME>`.");
        return;
    }

    println!("\n=== Tracked Courses ===\n");
    for (idx, entry) in graded.iter().enumerate() {
        println!(
            "{}. {} ({} cr): {:.2}% {} ({:.1})",
            idx + 1,
            entry.course.label(),
            entry.course.credits,
            entry.grade.total_percentage,
            entry.grade.letter,
            entry.grade.grade_point
        );
        for (a_idx, assessment) in entry.course.assessments.iter().enumerate() {
            println!(
                "     {}) {:<14} {:>6.2} / {}",
                a_idx + 1,
                assessment.kind.to_string(),
                assessment.achieved(),
                assessment.weight
            );
        }
    }
    println!("\nCGPA: {}", format_gpa(tracker.cgpa()));
}

fn handle_report(
    tracker: &GradeTracker<JsonFileStore>,
    format: &str,
    output: Option<&Path>,
    config: &Config,
) {
    let format: ReportFormat = format.parse().unwrap_or_else(|e: String| fail(e));

    let output_path: PathBuf = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let dir = config.reports_dir();
            if fs::create_dir_all(&dir).is_err() {
                fail(format!("Failed to create reports directory: {}", dir.display()));
            }
            dir.join(format!("grade_report.{}", format.extension()))
        }
    };

    let ctx = GradeReportContext::new("Grade Report", tracker.courses());
    let generator: Box<dyn ReportGenerator> = match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
    };

    if let Err(e) = generator.generate(&ctx, &output_path) {
        fail(format!("Failed to write report: {e}"));
    }
    println!("✓ Report generated: {}", output_path.display());
    record_activity(
        config,
        TOOL_NAME,
        &format!("{format} report for {} course(s)", ctx.course_count()),
    );
}
