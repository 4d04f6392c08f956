//! Letter-grade GPA command handler

use super::{fail, record_activity};
use student_toolkit::config::Config;
use student_toolkit::core::grading::{
    counts_credits, format_gpa, letter_credits, letter_gpa, LetterEntry,
};
use student_toolkit::warn;

/// Parse `GRADE:CREDITS` entries and print the credit-weighted GPA
pub fn run(entries: &[String], config: &Config) {
    let mut parsed = Vec::with_capacity(entries.len());
    for raw in entries {
        match raw.parse::<LetterEntry>() {
            Ok(entry) => parsed.push(entry),
            Err(e) => fail(e),
        }
    }

    let skipped = parsed.iter().filter(|e| !counts_credits(e.credits)).count();
    if skipped > 0 {
        warn!("Skipping {skipped} entr(ies) without positive credits");
    }

    let credits = letter_credits(&parsed);
    let gpa = letter_gpa(&parsed);

    println!("GPA: {} over {credits} credit(s)", format_gpa(gpa));
    record_activity(
        config,
        "CGPA Calculator",
        &format!("GPA {} over {credits} credit(s)", format_gpa(gpa)),
    );
}
