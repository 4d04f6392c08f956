//! Recent activity command handler

use super::fail;
use student_toolkit::config::Config;
use student_toolkit::core::activity::RecentActivities;
use student_toolkit::core::store::ACTIVITY_FILE;
use std::time::{SystemTime, UNIX_EPOCH};

/// Print the most recent tool runs, newest first
pub fn run(config: &Config) {
    let path = config.data_dir().join(ACTIVITY_FILE);
    let history = match RecentActivities::load(&path) {
        Ok(history) => history,
        Err(e) => fail(e),
    };

    if history.is_empty() {
        println!("No recent activity.");
        return;
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());

    println!("\n=== Recent Activity ===\n");
    for activity in history.iter() {
        println!(
            "{:<8} {:<22} {}",
            age(now.saturating_sub(activity.timestamp)),
            activity.tool,
            activity.summary
        );
    }
}

fn age(seconds: u64) -> String {
    match seconds {
        0..=59 => "now".to_string(),
        60..=3_599 => format!("{}m ago", seconds / 60),
        3_600..=86_399 => format!("{}h ago", seconds / 3_600),
        _ => format!("{}d ago", seconds / 86_400),
    }
}
