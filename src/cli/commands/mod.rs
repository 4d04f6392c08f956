//! CLI command handlers for the student toolkit.
//!
//! Each subcommand is implemented in its own submodule. Tool runs that
//! produce a result are recorded in the recent-activity history.

pub mod config;
pub mod final_exam;
pub mod gpa;
pub mod history;
pub mod target;
pub mod timetable;
pub mod tracker;

use student_toolkit::config::Config;
use student_toolkit::core::activity::RecentActivities;
use student_toolkit::core::store::ACTIVITY_FILE;
use student_toolkit::{debug, warn};

/// Append a run to the recent-activity history.
///
/// History is best effort; failures are logged and never abort a command.
pub fn record_activity(config: &Config, tool: &str, summary: &str) {
    let path = config.data_dir().join(ACTIVITY_FILE);
    let mut history = match RecentActivities::load(&path) {
        Ok(history) => history,
        Err(e) => {
            warn!("Starting a fresh activity history: {e}");
            RecentActivities::default()
        }
    };
    history.record(tool, summary);
    match history.save(&path) {
        Ok(()) => debug!("Recorded activity for {tool}"),
        Err(e) => warn!("Could not save activity history: {e}"),
    }
}

/// Print an error line and exit with status 1.
pub fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("✗ {message}");
    std::process::exit(1);
}

/// Check a 1-based position typed by the user and convert it to an index.
///
/// # Errors
/// Returns a printable message when the position is zero or past the end.
pub fn to_index(position: usize, count: usize, what: &str) -> Result<usize, String> {
    if position == 0 || position > count {
        return Err(format!("No {what} #{position} (1-{count} available)"));
    }
    Ok(position - 1)
}
