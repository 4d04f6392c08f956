//! Timetable command handler

use super::{fail, record_activity};
use crate::args::TimetableSubcommand;
use student_toolkit::config::Config;
use student_toolkit::core::store::TIMETABLE_FILE;
use student_toolkit::core::timetable::Timetable;

/// Load the timetable, apply the subcommand and save any change
pub fn run(subcommand: TimetableSubcommand, config: &Config) {
    let path = config.data_dir().join(TIMETABLE_FILE);
    let mut timetable = Timetable::load(&path).unwrap_or_else(|e| fail(e));

    let summary = match subcommand {
        TimetableSubcommand::Show => {
            print!("{}", timetable.to_markdown());
            return;
        }
        TimetableSubcommand::Set {
            day,
            slot,
            name,
            room,
        } => {
            timetable
                .set_class(&day, &slot, &name, room)
                .unwrap_or_else(|e| fail(e));
            format!("{} on {day}, slot {slot}", name.trim())
        }
        TimetableSubcommand::Clear { day, slot } => {
            match timetable.clear_class(&day, &slot).unwrap_or_else(|e| fail(e)) {
                Some(removed) => format!("Cleared {} from {day}, slot {slot}", removed.name),
                None => {
                    println!("✓ {day}, slot {slot} was already empty");
                    return;
                }
            }
        }
        TimetableSubcommand::Settings {
            semester,
            year,
            start,
            end,
        } => {
            if let Err(e) = timetable
                .settings
                .set_dates(start.as_deref(), end.as_deref())
            {
                fail(e);
            }
            if let Some(term) = semester {
                timetable.settings.semester = term;
            }
            if year.is_some() {
                timetable.settings.year = year;
            }
            match timetable.settings.date_range() {
                Some(range) => format!("Term set to {} ({range})", timetable.title()),
                None => format!("Term set to {}", timetable.title()),
            }
        }
    };

    if let Err(e) = timetable.save(&path) {
        fail(e);
    }
    println!("✓ {summary}");
    record_activity(config, "Class Timetable", &summary);
}
