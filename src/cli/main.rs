//! Command-line interface entry point for the student toolkit

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use student_toolkit::config::Config;
use student_toolkit::info;
use student_toolkit::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Target {
            semester,
            sgpa,
            cgpa,
            target,
            plan,
        } => {
            let input = student_toolkit::core::projection::GpaQueryInput {
                current_semester: semester,
                current_sgpa: sgpa,
                current_cgpa: cgpa,
                target_cgpa: target,
            };
            commands::target::run(&input, plan, &config);
        }
        Command::Tracker { subcommand } => {
            commands::tracker::run(subcommand, &config);
        }
        Command::Final {
            course,
            current_total,
            final_weight,
            target,
        } => {
            commands::final_exam::run(
                course,
                current_total,
                final_weight,
                target.as_deref(),
                &config,
            );
        }
        Command::Gpa { entries } => {
            commands::gpa::run(&entries, &config);
        }
        Command::Timetable { subcommand } => {
            commands::timetable::run(subcommand, &config);
        }
        Command::History => {
            commands::history::run(&config);
        }
    }
}
