//! Recent activity history

use crate::core::store::{read_json, write_json, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum number of entries kept
pub const MAX_RECENT_ACTIVITIES: usize = 5;

/// One completed tool run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Tool that ran (e.g., "GPA Target")
    pub tool: String,
    /// One-line outcome
    pub summary: String,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

/// Most recent activities, newest first, capped at [`MAX_RECENT_ACTIVITIES`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentActivities {
    entries: VecDeque<Activity>,
}

impl RecentActivities {
    /// Load from a JSON file; a missing file is an empty history
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let mut history: Self = read_json(path)?.unwrap_or_default();
        history.entries.truncate(MAX_RECENT_ACTIVITIES);
        Ok(history)
    }

    /// Write to a JSON file
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_json(path, self)
    }

    /// Record a run stamped with the current time
    pub fn record(&mut self, tool: &str, summary: &str) {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        self.push(Activity {
            tool: tool.to_string(),
            summary: summary.to_string(),
            timestamp,
        });
    }

    /// Add an entry at the front, dropping the oldest beyond the cap
    pub fn push(&mut self, activity: Activity) {
        self.entries.push_front(activity);
        self.entries.truncate(MAX_RECENT_ACTIVITIES);
    }

    /// Entries, newest first
    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.entries.iter()
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(n: u64) -> Activity {
        Activity {
            tool: "GPA Target".to_string(),
            summary: format!("run {n}"),
            timestamp: n,
        }
    }

    #[test]
    fn test_cap_keeps_newest() {
        let mut history = RecentActivities::default();
        for n in 0..8 {
            history.push(activity(n));
        }
        assert_eq!(history.len(), MAX_RECENT_ACTIVITIES);
        let stamps: Vec<u64> = history.iter().map(|a| a.timestamp).collect();
        assert_eq!(stamps, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_record_stamps_time() {
        let mut history = RecentActivities::default();
        assert!(history.is_empty());
        history.record("Grade Tracker", "Added CSE220");
        let first = history.iter().next().unwrap();
        assert_eq!(first.tool, "Grade Tracker");
        assert!(first.timestamp > 0);
    }
}
