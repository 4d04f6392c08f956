//! Shared library for the student toolkit
//! Contains the GPA, grading and planning computations used by the CLI

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::get_version;
