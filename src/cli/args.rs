//! CLI argument definitions for the student toolkit

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use student_toolkit::config::ConfigOverrides;
use student_toolkit::logger::Level;

/// CLI log level argument
///
/// Converts to a lowercase string for config storage and to
/// [`Level`] for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `data_dir`, `template`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum TrackerSubcommand {
    /// Track a new course using the configured assessment template.
    Add {
        /// Course name
        #[arg(value_name = "NAME")]
        name: String,

        /// Course code (e.g., CSE220)
        #[arg(short, long, value_name = "CODE", default_value = "")]
        code: String,

        /// Credit hours
        #[arg(long, value_name = "CREDITS", default_value_t = 3.0)]
        credits: f64,
    },
    /// Record marks for one assessment of a course.
    ///
    /// Marks are clamped to the assessment's weight.
    Score {
        /// Course number as shown by `tracker list` (1-based)
        #[arg(value_name = "COURSE")]
        course: usize,

        /// Assessment number within the course (1-based)
        #[arg(value_name = "ASSESSMENT")]
        assessment: usize,

        /// Marks achieved
        #[arg(value_name = "MARKS", allow_negative_numbers = true)]
        value: f64,
    },
    /// Stop tracking a course.
    Remove {
        /// Course number as shown by `tracker list` (1-based)
        #[arg(value_name = "COURSE")]
        course: usize,
    },
    /// List tracked courses with their grades and the overall CGPA.
    List,
    /// Write a grade report for the tracked courses.
    Report {
        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "markdown")]
        format: String,

        /// Output file path (optional; defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum TimetableSubcommand {
    /// Put a class in a cell of the weekly grid.
    Set {
        /// Day name (e.g., Monday)
        #[arg(value_name = "DAY")]
        day: String,

        /// Time slot number (1-based) or its exact label
        #[arg(value_name = "SLOT")]
        slot: String,

        /// Class name or course code
        #[arg(value_name = "NAME")]
        name: String,

        /// Room
        #[arg(short, long, value_name = "ROOM")]
        room: Option<String>,
    },
    /// Empty a cell of the weekly grid.
    Clear {
        /// Day name
        #[arg(value_name = "DAY")]
        day: String,

        /// Time slot number (1-based) or its exact label
        #[arg(value_name = "SLOT")]
        slot: String,
    },
    /// Print the weekly grid as a Markdown table.
    Show,
    /// Change the term shown in the timetable header.
    Settings {
        /// Term name (e.g., Fall, Spring)
        #[arg(long, value_name = "TERM")]
        semester: Option<String>,

        /// Calendar year
        #[arg(long, value_name = "YEAR")]
        year: Option<i32>,

        /// First day of term (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        start: Option<String>,

        /// Last day of term (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        end: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Project the semester GPA needed to reach a target CGPA.
    ///
    /// Values are validated together and every problem is reported at once.
    Target {
        /// Current semester (1-8)
        #[arg(long, value_name = "N")]
        semester: Option<String>,

        /// GPA of the current semester (0.0-4.0)
        #[arg(long, value_name = "GPA")]
        sgpa: Option<String>,

        /// Current cumulative GPA (0.0-4.0)
        #[arg(long, value_name = "GPA")]
        cgpa: Option<String>,

        /// Target cumulative GPA (0.0-4.0)
        #[arg(long, value_name = "GPA")]
        target: Option<String>,

        /// Also print a credit-based outlook across effort levels
        #[arg(long)]
        plan: bool,
    },
    /// Track weighted course grades.
    Tracker {
        #[command(subcommand)]
        subcommand: TrackerSubcommand,
    },
    /// Compute the Final exam marks needed for a target grade.
    ///
    /// Either point at a tracked course, or give the current total directly.
    Final {
        /// Tracked course number (1-based); uses its own marks and Final weight
        #[arg(long, value_name = "COURSE", conflicts_with = "current_total")]
        course: Option<usize>,

        /// Marks earned so far out of 100, excluding the Final
        #[arg(long, value_name = "MARKS")]
        current_total: Option<f64>,

        /// Weight of the Final exam
        #[arg(long, value_name = "WEIGHT", default_value_t = 40.0)]
        final_weight: f64,

        /// Target grade (A, A-, B+, B, B-, C+, C, Pass); all grades when omitted
        #[arg(long, value_name = "GRADE")]
        target: Option<String>,
    },
    /// Compute a credit-weighted GPA from letter grades.
    Gpa {
        /// Entries as GRADE:CREDITS (e.g., A:3 B+:4)
        #[arg(value_name = "ENTRIES", num_args = 1..)]
        entries: Vec<String>,
    },
    /// Manage the weekly class timetable.
    Timetable {
        #[command(subcommand)]
        subcommand: TimetableSubcommand,
    },
    /// Show the most recent tool runs.
    History,
}

#[derive(Parser, Debug)]
#[command(
    name = "studenttoolkit",
    about = "Student toolkit command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config data directory
    #[arg(long = "config-data-dir", value_name = "DIR")]
    pub config_data_dir: Option<PathBuf>,

    /// Override config data directory (short form)
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--data-dir`) take precedence over long-form
    /// flags (e.g., `--config-data-dir`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            data_dir: path_string(self.data_dir.as_ref())
                .or_else(|| path_string(self.config_data_dir.as_ref())),
            reports_dir: path_string(self.reports_dir.as_ref())
                .or_else(|| path_string(self.config_reports_dir.as_ref())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli() -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            config_data_dir: None,
            data_dir: None,
            config_reports_dir: None,
            reports_dir: None,
            command: Command::Config { subcommand: None },
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = bare_cli().to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.data_dir.is_none());
        assert!(overrides.reports_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli {
            config_level: Some(LogLevelArg::Debug),
            config_log_file: Some(PathBuf::from("/tmp/test.log")),
            config_verbose: Some(true),
            data_dir: Some(PathBuf::from("/data")),
            reports_dir: Some(PathBuf::from("/reports")),
            ..bare_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.data_dir, Some("/data".to_string()));
        assert_eq!(overrides.reports_dir, Some("/reports".to_string()));
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let cli = Cli {
            config_data_dir: Some(PathBuf::from("/long/data")),
            data_dir: Some(PathBuf::from("/short/data")),
            config_reports_dir: Some(PathBuf::from("/long/reports")),
            reports_dir: Some(PathBuf::from("/short/reports")),
            ..bare_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.data_dir, Some("/short/data".to_string()));
        assert_eq!(overrides.reports_dir, Some("/short/reports".to_string()));
    }

    #[test]
    fn test_long_form_when_short_form_absent() {
        let cli = Cli {
            config_data_dir: Some(PathBuf::from("/long/data")),
            config_reports_dir: Some(PathBuf::from("/long/reports")),
            ..bare_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.data_dir, Some("/long/data".to_string()));
        assert_eq!(overrides.reports_dir, Some("/long/reports".to_string()));
    }

    #[test]
    fn test_parse_target_and_tracker_commands() {
        let cli = Cli::parse_from([
            "studenttoolkit",
            "target",
            "--semester",
            "1",
            "--sgpa",
            "3.5",
            "--cgpa",
            "3.5",
            "--target",
            "3.3",
            "--plan",
        ]);
        match cli.command {
            Command::Target { semester, plan, .. } => {
                assert_eq!(semester.as_deref(), Some("1"));
                assert!(plan);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::parse_from(["studenttoolkit", "tracker", "score", "1", "2", "12.5"]);
        match cli.command {
            Command::Tracker {
                subcommand:
                    TrackerSubcommand::Score {
                        course,
                        assessment,
                        value,
                    },
            } => {
                assert_eq!((course, assessment), (1, 2));
                assert!((value - 12.5).abs() < f64::EPSILON);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_final_course_conflicts_with_total() {
        let result = Cli::try_parse_from([
            "studenttoolkit",
            "final",
            "--course",
            "1",
            "--current-total",
            "50",
        ]);
        assert!(result.is_err());
    }
}
