//! A small school week used by the `demo` command and in tests.

use std::path::Path;

use log::info;

use crate::config::RunConfig;
use crate::data::{Catalog, Room, SchedulingInput, SessionRequirement, Subject, Teacher};
use crate::error::DemoError;
use crate::report::{Workbook, render_console};
use crate::solver::Allocator;

pub fn demo_input() -> SchedulingInput {
    let teachers = vec![
        Teacher::new("Dr. Lopez", ["Mathematics I", "Mathematics II", "Algebra"]),
        Teacher::new("Ms. Garcia", ["Literature", "Spanish", "History"]),
        Teacher::new("Eng. Perez", ["Physics I", "Chemistry", "Programming"]),
        Teacher::new("Mr. Diaz", ["Physical Education", "Art"]),
    ];

    let rooms = vec![
        Room::new("A101", 30),
        Room::new("A102", 25),
        Room::new("B201", 40),
        Room::new("Chemistry Lab", 20),
        Room::new("Gym", 100),
    ];

    let subjects = vec![
        Subject::new("Mathematics I", 2),
        Subject::new("Literature", 1),
        Subject::new("Physics I", 2),
        Subject::new("History", 1),
        Subject::new("Programming", 3).with_min_capacity(25),
        Subject::new("Physical Education", 2).with_min_capacity(50),
    ];

    let sessions = vec![
        SessionRequirement::new("MI1A", "Mathematics I", "1A", 25),
        SessionRequirement::new("LIT1B", "Literature", "1B", 20),
        SessionRequirement::new("FI1A", "Physics I", "1A", 22),
        SessionRequirement::new("HIST2A", "History", "2A", 35),
        SessionRequirement::new("PROG3C", "Programming", "3C", 28),
        SessionRequirement::new("EF4D", "Physical Education", "4D", 60),
        SessionRequirement::new("MI1C", "Mathematics I", "1C", 20),
        SessionRequirement::new("LIT1C", "Literature", "1C", 20),
    ];

    SchedulingInput {
        catalog: Catalog::new(teachers, rooms, subjects),
        sessions,
        config: RunConfig::default(),
    }
}

/// Allocates the demo week, exports it to `export_path` (format chosen by
/// extension) and returns the console rendering.
pub fn run_demo(export_path: impl AsRef<Path>) -> Result<String, DemoError> {
    let export_path = export_path.as_ref();
    let input = demo_input();
    let schedule = Allocator::new(&input.catalog, &input.config).allocate(&input.sessions)?;

    Workbook::from_schedule(&input.catalog, &schedule).write(export_path)?;
    info!("Timetable exported to '{}'", export_path.display());

    Ok(render_console(&schedule))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use crate::schedule::Placement;

    #[test]
    fn demo_fits_on_monday() {
        let input = demo_input();
        let schedule = Allocator::new(&input.catalog, &input.config)
            .allocate(&input.sessions)
            .unwrap();

        assert!(schedule.unplaced_sessions().is_empty());
        assert_eq!(schedule.len(), input.sessions.len());
        assert!(schedule.all_assignments().all(|a| a.day == 0));
    }

    #[test]
    fn demo_places_longest_session_first() {
        let input = demo_input();
        let schedule = Allocator::new(&input.catalog, &input.config)
            .allocate(&input.sessions)
            .unwrap();

        let expected = [
            ("PROG3C", 0, "Eng. Perez", "A101"),
            ("MI1A", 0, "Dr. Lopez", "A102"),
            ("FI1A", 3, "Eng. Perez", "A101"),
            ("EF4D", 0, "Mr. Diaz", "Gym"),
            ("MI1C", 2, "Dr. Lopez", "A102"),
            ("LIT1B", 0, "Ms. Garcia", "B201"),
            ("HIST2A", 1, "Ms. Garcia", "B201"),
            ("LIT1C", 2, "Ms. Garcia", "B201"),
        ];
        for (id, start, teacher, room) in expected {
            let Placement::Placed(a) = schedule.placement_of(id) else {
                panic!("{id} should be placed");
            };
            assert_eq!(
                (a.start_slot, a.teacher.name.as_str(), a.room.name.as_str()),
                (start, teacher, room),
                "{id}"
            );
        }
    }

    #[test]
    fn demo_exports_xlsx_and_renders_console() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timetable.xlsx");
        let text = run_demo(&path).unwrap();

        assert!(text.starts_with("--- Generated timetable ---"));
        assert!(std::fs::read(&path).unwrap().starts_with(b"PK"));
    }

    #[test]
    fn demo_reports_unwritable_export() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_demo(dir.path().join("timetable.docx")).unwrap_err();
        assert!(matches!(err, DemoError::Export(ExportError::UnsupportedFormat(_))));
    }
}
