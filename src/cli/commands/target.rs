//! GPA target command handler

use super::record_activity;
use student_toolkit::config::Config;
use student_toolkit::core::grading::format_gpa;
use student_toolkit::core::projection::{
    calculate_required_sgpa, plan_scenarios, GpaQuery, GpaQueryInput,
};
use student_toolkit::{info, verbose};

/// Validate the inputs, print the required SGPA and optionally the scenario outlook
pub fn run(input: &GpaQueryInput, plan: bool, config: &Config) {
    let query = match input.validate() {
        Ok(query) => query,
        Err(errors) => {
            for error in &errors.0 {
                eprintln!("✗ {}", error.message);
            }
            std::process::exit(1);
        }
    };

    verbose!(
        "Semester {}, SGPA {}, CGPA {}, target {}",
        query.current_semester(),
        format_gpa(query.current_sgpa()),
        format_gpa(query.current_cgpa()),
        format_gpa(query.target_cgpa())
    );

    match calculate_required_sgpa(&query) {
        Ok(result) => {
            println!("\n=== GPA Target ===\n");
            println!(
                "Required SGPA: {} (over {} remaining semester(s))",
                format_gpa(result.required_sgpa),
                result.remaining_semesters
            );
            println!("Outlook: {}", result.achievability);
            println!("{}", result.achievability.message());

            info!(
                "Target {} from semester {} needs SGPA {}",
                format_gpa(query.target_cgpa()),
                query.current_semester(),
                format_gpa(result.required_sgpa)
            );
            record_activity(
                config,
                "GPA Target",
                &format!(
                    "Target CGPA {} needs SGPA {} ({})",
                    format_gpa(query.target_cgpa()),
                    format_gpa(result.required_sgpa),
                    result.achievability
                ),
            );
        }
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }

    if plan {
        print_plan(&query);
    }
}

fn print_plan(query: &GpaQuery) {
    let plan = plan_scenarios(query);

    println!("\n=== Credit Outlook ===\n");
    println!("Remaining credits: {}", plan.remaining_credits);
    println!(
        "Average needed over remaining credits: {}",
        format_gpa(plan.required_average)
    );
    println!();
    println!(
        "{:<10} {:>6} {:>10} {:>16} {:>14}",
        "Effort", "GPA", "Possible", "Semesters needed", "Credits/sem"
    );
    for scenario in &plan.scenarios {
        println!(
            "{:<10} {:>6} {:>10} {:>16} {:>14}",
            scenario.effort.to_string(),
            format_gpa(scenario.effort.gpa()),
            if scenario.possible { "yes" } else { "no" },
            scenario.semesters_needed,
            scenario.credits_per_semester
        );
    }
}
