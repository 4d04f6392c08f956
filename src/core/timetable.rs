//! Weekly class timetable
//!
//! A grid of day × time-slot cells. Cells are keyed `"<Day>-<Slot>"` and only
//! filled cells are stored.

use crate::core::store::{read_json, write_json, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;

/// Default teaching days
pub const DEFAULT_DAYS: [&str; 5] = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday"];

/// Default 75-minute slots
pub const DEFAULT_TIME_SLOTS: [&str; 8] = [
    "08:00 AM - 09:15 AM",
    "09:15 AM - 10:30 AM",
    "10:30 AM - 11:45 AM",
    "11:45 AM - 01:00 PM",
    "01:00 PM - 02:15 PM",
    "02:15 PM - 03:30 PM",
    "03:30 PM - 04:45 PM",
    "04:45 PM - 06:00 PM",
];

/// Timetable failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimetableError {
    /// Day is not part of the grid
    #[error("Unknown day: '{0}'")]
    UnknownDay(String),

    /// Slot is not part of the grid
    #[error("Unknown time slot: '{0}'")]
    UnknownSlot(String),

    /// A class needs a name
    #[error("Class name must not be empty")]
    EmptyClassName,

    /// Term date not in `YYYY-MM-DD` form
    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// Term ends before it starts
    #[error("Term end {end} is before its start {start}")]
    EndBeforeStart {
        /// First day of term
        start: String,
        /// Last day of term
        end: String,
    },
}

/// A class occupying one cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    /// Course name or code
    pub name: String,
    /// Room, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

/// Term shown in the timetable header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSettings {
    /// Term name (e.g., "Fall")
    pub semester: String,
    /// Calendar year
    #[serde(default)]
    pub year: Option<i32>,
    /// First day of term, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Last day of term, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Default for TermSettings {
    fn default() -> Self {
        Self {
            semester: "Fall".to_string(),
            year: None,
            start_date: None,
            end_date: None,
        }
    }
}

impl TermSettings {
    /// Set the term's start and end dates; `None` leaves a date unchanged.
    ///
    /// ISO dates compare correctly as strings, so the order check is textual.
    ///
    /// # Errors
    /// Returns [`TimetableError::InvalidDate`] for a malformed date or
    /// [`TimetableError::EndBeforeStart`] if the term would end before it
    /// starts. Nothing changes on error.
    pub fn set_dates(
        &mut self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<(), TimetableError> {
        let start = match start {
            Some(date) => Some(parse_date(date)?),
            None => self.start_date.clone(),
        };
        let end = match end {
            Some(date) => Some(parse_date(date)?),
            None => self.end_date.clone(),
        };

        if let (Some(first), Some(last)) = (&start, &end) {
            if last < first {
                return Err(TimetableError::EndBeforeStart {
                    start: first.clone(),
                    end: last.clone(),
                });
            }
        }

        self.start_date = start;
        self.end_date = end;
        Ok(())
    }

    /// "2025-01-12 to 2025-05-01", with "?" for an unset end
    #[must_use]
    pub fn date_range(&self) -> Option<String> {
        match (&self.start_date, &self.end_date) {
            (None, None) => None,
            (start, end) => Some(format!(
                "{} to {}",
                start.as_deref().unwrap_or("?"),
                end.as_deref().unwrap_or("?")
            )),
        }
    }
}

fn parse_date(raw: &str) -> Result<String, TimetableError> {
    let date = raw.trim();
    let invalid = || TimetableError::InvalidDate(raw.to_string());

    let mut parts = date.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    if year.len() != 4 || month.len() != 2 || day.len() != 2 {
        return Err(invalid());
    }

    let year: u32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;
    let days_in_month = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        _ => return Err(invalid()),
    };
    if day == 0 || day > days_in_month {
        return Err(invalid());
    }
    Ok(date.to_string())
}

/// Day × slot grid of classes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Columns of the grid
    pub days: Vec<String>,
    /// Rows of the grid
    pub time_slots: Vec<String>,
    /// Filled cells keyed by [`Timetable::cell_key`]
    #[serde(default)]
    pub classes: BTreeMap<String, ClassEntry>,
    /// Header information
    #[serde(default)]
    pub settings: TermSettings,
}

impl Default for Timetable {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS.iter().map(ToString::to_string).collect(),
            time_slots: DEFAULT_TIME_SLOTS.iter().map(ToString::to_string).collect(),
            classes: BTreeMap::new(),
            settings: TermSettings::default(),
        }
    }
}

impl Timetable {
    /// Load from a JSON file; a missing file gives the default grid
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        Ok(read_json(path)?.unwrap_or_default())
    }

    /// Write to a JSON file
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_json(path, self)
    }

    /// Cell key for a day and slot
    #[must_use]
    pub fn cell_key(day: &str, slot: &str) -> String {
        format!("{day}-{slot}")
    }

    /// Resolve a day name, case-insensitively
    ///
    /// # Errors
    /// Returns [`TimetableError::UnknownDay`] if no column matches.
    pub fn resolve_day(&self, day: &str) -> Result<&str, TimetableError> {
        self.days
            .iter()
            .find(|d| d.eq_ignore_ascii_case(day.trim()))
            .map(String::as_str)
            .ok_or_else(|| TimetableError::UnknownDay(day.to_string()))
    }

    /// Resolve a slot given as its 1-based row number or its exact label
    ///
    /// # Errors
    /// Returns [`TimetableError::UnknownSlot`] if no row matches.
    pub fn resolve_slot(&self, slot: &str) -> Result<&str, TimetableError> {
        let wanted = slot.trim();
        let by_number = wanted
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| self.time_slots.get(idx));

        by_number
            .or_else(|| self.time_slots.iter().find(|s| s.eq_ignore_ascii_case(wanted)))
            .map(String::as_str)
            .ok_or_else(|| TimetableError::UnknownSlot(slot.to_string()))
    }

    /// Put a class in a cell, replacing whatever was there
    ///
    /// # Errors
    /// Returns a [`TimetableError`] for an unknown day/slot or an empty name.
    pub fn set_class(
        &mut self,
        day: &str,
        slot: &str,
        name: &str,
        room: Option<String>,
    ) -> Result<(), TimetableError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TimetableError::EmptyClassName);
        }
        let key = Self::cell_key(self.resolve_day(day)?, self.resolve_slot(slot)?);
        self.classes.insert(
            key,
            ClassEntry {
                name: name.to_string(),
                room,
            },
        );
        Ok(())
    }

    /// Empty a cell, returning what was in it
    ///
    /// # Errors
    /// Returns a [`TimetableError`] for an unknown day or slot.
    pub fn clear_class(
        &mut self,
        day: &str,
        slot: &str,
    ) -> Result<Option<ClassEntry>, TimetableError> {
        let key = Self::cell_key(self.resolve_day(day)?, self.resolve_slot(slot)?);
        Ok(self.classes.remove(&key))
    }

    /// Class in a cell, if any
    ///
    /// # Errors
    /// Returns a [`TimetableError`] for an unknown day or slot.
    pub fn class_at(&self, day: &str, slot: &str) -> Result<Option<&ClassEntry>, TimetableError> {
        let key = Self::cell_key(self.resolve_day(day)?, self.resolve_slot(slot)?);
        Ok(self.classes.get(&key))
    }

    /// Header line, e.g. "Fall 2025" or "Fall"
    #[must_use]
    pub fn title(&self) -> String {
        match self.settings.year {
            Some(year) => format!("{} {year}", self.settings.semester),
            None => self.settings.semester.clone(),
        }
    }

    /// Markdown table with one row per slot and one column per day
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "## Timetable: {}\n", self.title());
        if let Some(range) = self.settings.date_range() {
            let _ = writeln!(out, "Term: {range}\n");
        }

        let _ = write!(out, "| Time |");
        for day in &self.days {
            let _ = write!(out, " {day} |");
        }
        let _ = write!(out, "\n|------|");
        for _ in &self.days {
            let _ = write!(out, "------|");
        }
        out.push('\n');

        for slot in &self.time_slots {
            let _ = write!(out, "| {slot} |");
            for day in &self.days {
                let cell = self
                    .classes
                    .get(&Self::cell_key(day, slot))
                    .map_or_else(String::new, |entry| match &entry.room {
                        Some(room) => format!("{} ({room})", entry.name),
                        None => entry.name.clone(),
                    });
                let _ = write!(out, " {cell} |");
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let t = Timetable::default();
        assert_eq!(t.days.len(), 5);
        assert_eq!(t.time_slots.len(), 8);
        assert!(t.classes.is_empty());
    }

    #[test]
    fn test_set_and_get_class() {
        let mut t = Timetable::default();
        t.set_class("monday", "2", "CSE220", Some("UB1201".to_string()))
            .unwrap();

        let key = Timetable::cell_key("Monday", "09:15 AM - 10:30 AM");
        assert_eq!(t.classes.get(&key).unwrap().name, "CSE220");

        let by_label = t.class_at("Monday", "09:15 am - 10:30 am").unwrap();
        assert_eq!(by_label.unwrap().room.as_deref(), Some("UB1201"));
    }

    #[test]
    fn test_overwrite_and_clear() {
        let mut t = Timetable::default();
        t.set_class("Sunday", "1", "MAT110", None).unwrap();
        t.set_class("Sunday", "1", "PHY111", None).unwrap();
        assert_eq!(t.classes.len(), 1);

        let removed = t.clear_class("Sunday", "1").unwrap();
        assert_eq!(removed.unwrap().name, "PHY111");
        assert!(t.clear_class("Sunday", "1").unwrap().is_none());
    }

    #[test]
    fn test_unknown_cells() {
        let mut t = Timetable::default();
        assert_eq!(
            t.set_class("Friday", "1", "X", None).unwrap_err(),
            TimetableError::UnknownDay("Friday".to_string())
        );
        assert_eq!(
            t.set_class("Monday", "9", "X", None).unwrap_err(),
            TimetableError::UnknownSlot("9".to_string())
        );
        assert_eq!(
            t.set_class("Monday", "0", "X", None).unwrap_err(),
            TimetableError::UnknownSlot("0".to_string())
        );
        assert_eq!(
            t.set_class("Monday", "1", "  ", None).unwrap_err(),
            TimetableError::EmptyClassName
        );
    }

    #[test]
    fn test_markdown_rendering() {
        let mut t = Timetable::default();
        t.settings.year = Some(2025);
        t.set_class("Tuesday", "3", "CSE220", Some("7A".to_string()))
            .unwrap();
        let md = t.to_markdown();
        assert!(md.contains("## Timetable: Fall 2025"));
        assert!(md.contains("| Time | Sunday | Monday | Tuesday | Wednesday | Thursday |"));
        assert!(md.contains("CSE220 (7A)"));
        assert_eq!(md.lines().filter(|l| l.starts_with("| ")).count(), 9);
        assert!(!md.contains("Term:"));

        t.settings
            .set_dates(Some("2025-01-12"), Some("2025-05-01"))
            .unwrap();
        assert!(t.to_markdown().contains("Term: 2025-01-12 to 2025-05-01"));
    }

    #[test]
    fn test_term_dates() {
        let mut settings = TermSettings::default();
        assert_eq!(settings.date_range(), None);

        settings.set_dates(Some("2024-02-29"), None).unwrap();
        assert_eq!(settings.date_range().unwrap(), "2024-02-29 to ?");

        assert_eq!(
            settings.set_dates(None, Some("2024-01-31")).unwrap_err(),
            TimetableError::EndBeforeStart {
                start: "2024-02-29".to_string(),
                end: "2024-01-31".to_string(),
            }
        );
        assert_eq!(settings.end_date, None);

        for bad in ["2023-02-29", "2024-13-01", "2024-4-01", "01/02/2024", ""] {
            assert_eq!(
                settings.set_dates(Some(bad), None).unwrap_err(),
                TimetableError::InvalidDate(bad.to_string())
            );
        }
        assert_eq!(settings.start_date.as_deref(), Some("2024-02-29"));
    }

    #[test]
    fn test_settings_without_dates_still_load() {
        let settings: TermSettings =
            serde_json::from_str(r#"{"semester":"Spring","year":2024}"#).unwrap();
        assert_eq!(settings.semester, "Spring");
        assert_eq!(settings.start_date, None);
    }
}
