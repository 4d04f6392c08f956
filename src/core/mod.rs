//! Core computations shared by every front-end

pub mod activity;
pub mod final_exam;
pub mod grading;
pub mod models;
pub mod projection;
pub mod report;
pub mod store;
pub mod timetable;
pub mod tracker;

/// Returns the current version of the `student-toolkit` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
