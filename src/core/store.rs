//! Persistence ports for tool state
//!
//! Tool state (tracked courses, the timetable, recent activity) lives in
//! small JSON documents. Computation code only sees the [`TrackerStore`]
//! trait, so it can run against an in-memory store in tests.

use crate::core::models::Course;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name of the tracked-course document inside the data directory
pub const COURSES_FILE: &str = "courses.json";

/// File name of the timetable document inside the data directory
pub const TIMETABLE_FILE: &str = "timetable.json";

/// File name of the recent-activity document inside the data directory
pub const ACTIVITY_FILE: &str = "activity.json";

/// Storage failures
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file exists but does not hold the expected document
    #[error("Malformed data in {path}: {source}")]
    Format {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },
}

/// Load/save port for the grade tracker's course list
pub trait TrackerStore {
    /// Load every stored course; an absent store yields an empty list
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the backing data cannot be read or parsed.
    fn load(&self) -> Result<Vec<Course>, StoreError>;

    /// Replace the stored courses
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the backing data cannot be written.
    fn save(&self, courses: &[Course]) -> Result<(), StoreError>;
}

/// Read a JSON document, returning `None` if the file does not exist
///
/// # Errors
/// Returns a [`StoreError`] on I/O failure or malformed content.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StoreError::Format {
            path: path.to_path_buf(),
            source,
        })
}

/// Write a JSON document, creating parent directories as needed
///
/// # Errors
/// Returns a [`StoreError`] if serialization or any file operation fails.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(io_err)
}

/// Course store backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at an explicit file path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`COURSES_FILE`] inside a data directory
    #[must_use]
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(COURSES_FILE))
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TrackerStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Course>, StoreError> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    fn save(&self, courses: &[Course]) -> Result<(), StoreError> {
        write_json(&self.path, courses)
    }
}

/// Course store held in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    courses: RefCell<Vec<Course>>,
    saves: RefCell<usize>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with courses
    #[must_use]
    pub fn with_courses(courses: Vec<Course>) -> Self {
        Self {
            courses: RefCell::new(courses),
            saves: RefCell::new(0),
        }
    }

    /// Snapshot of what was last saved
    #[must_use]
    pub fn snapshot(&self) -> Vec<Course> {
        self.courses.borrow().clone()
    }

    /// How many times `save` has been called
    #[must_use]
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl TrackerStore for MemoryStore {
    fn load(&self) -> Result<Vec<Course>, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, courses: &[Course]) -> Result<(), StoreError> {
        *self.courses.borrow_mut() = courses.to_vec();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

impl<S: TrackerStore + ?Sized> TrackerStore for &S {
    fn load(&self) -> Result<Vec<Course>, StoreError> {
        (**self).load()
    }

    fn save(&self, courses: &[Course]) -> Result<(), StoreError> {
        (**self).save(courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::AssessmentTemplate;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());

        let course = Course::new(
            7,
            "Algorithms".to_string(),
            "CSE221".to_string(),
            3.0,
            &AssessmentTemplate::default(),
        );
        store.save(std::slice::from_ref(&course)).unwrap();
        assert_eq!(store.load().unwrap(), vec![course]);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_store_by_reference() {
        let store = MemoryStore::new();
        let by_ref: &MemoryStore = &store;
        by_ref.save(&[]).unwrap();
        assert_eq!(store.save_count(), 1);
    }
}
