//! Final exam calculator command handler

use super::{fail, record_activity, to_index};
use student_toolkit::config::Config;
use student_toolkit::core::final_exam::{
    required_final_for_course, required_final_score, FinalExamRequirement, TargetGrade,
};
use student_toolkit::core::store::JsonFileStore;
use student_toolkit::core::tracker::GradeTracker;

/// Print the Final marks needed for one target grade, or for every grade
pub fn run(
    course: Option<usize>,
    current_total: Option<f64>,
    final_weight: f64,
    target: Option<&str>,
    config: &Config,
) {
    let targets: Vec<TargetGrade> = match target {
        Some(t) => vec![t.parse().unwrap_or_else(|e: String| fail(e))],
        None => TargetGrade::ALL.to_vec(),
    };

    let (subject, requirements) = if let Some(position) = course {
        let store = JsonFileStore::in_dir(&config.data_dir());
        let tracker = GradeTracker::open(store, config.assessment_template())
            .unwrap_or_else(|e| fail(e));
        let idx = to_index(position, tracker.courses().len(), "course").unwrap_or_else(|e| fail(e));
        let tracked = &tracker.courses()[idx];

        let requirements: Vec<FinalExamRequirement> = targets
            .iter()
            .map(|t| required_final_for_course(tracked, *t).unwrap_or_else(|e| fail(e)))
            .collect();
        (tracked.label(), requirements)
    } else {
        let Some(current) = current_total else {
            fail("Provide --course <N> or --current-total <MARKS>");
        };
        let requirements: Vec<FinalExamRequirement> = targets
            .iter()
            .map(|t| required_final_score(current, *t, final_weight).unwrap_or_else(|e| fail(e)))
            .collect();
        (format!("{current} marks so far"), requirements)
    };

    println!("\n=== Final Exam Planner: {subject} ===\n");
    for req in &requirements {
        println!("{}", describe(req));
    }

    if let [single] = requirements.as_slice() {
        record_activity(config, "Final Exam Calculator", &describe(single));
    } else {
        let reachable = requirements.iter().filter(|r| r.is_possible).count();
        record_activity(
            config,
            "Final Exam Calculator",
            &format!(
                "{subject}: {reachable} of {} grades still reachable",
                requirements.len()
            ),
        );
    }
}

fn describe(req: &FinalExamRequirement) -> String {
    if req.already_secured() {
        format!(
            "✓ {:<5} already secured (needs {:.0}% total)",
            req.target,
            req.target.required_total()
        )
    } else if req.is_possible {
        format!(
            "✓ {:<5} needs {:.2} / {} on the Final",
            req.target, req.required_final, req.final_weight
        )
    } else {
        format!(
            "✗ {:<5} out of reach (would need {:.2} / {})",
            req.target, req.required_unclamped, req.final_weight
        )
    }
}
