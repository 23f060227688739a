//! Input checks run before any session is processed.
//!
//! The allocator trusts its input; everything it would silently misbehave on
//! is rejected here instead:
//! - zero or implausibly many slots per day, missing or repeated weekdays
//! - duplicate teacher, room, subject or session identities
//! - subjects lasting zero slots
//! - sessions naming a subject the catalog does not know

use std::collections::HashSet;

use log::warn;

use crate::config::{MAX_SLOTS_PER_DAY, RunConfig};
use crate::data::{Catalog, SessionRequirement};
use crate::error::ConfigError;

/// Checks the catalog and run configuration on their own.
pub fn validate_catalog(catalog: &Catalog, config: &RunConfig) -> Result<(), ConfigError> {
    if config.slots_per_day == 0 {
        return Err(ConfigError::ZeroSlotsPerDay);
    }
    if config.slots_per_day > MAX_SLOTS_PER_DAY {
        return Err(ConfigError::TooManySlots(config.slots_per_day));
    }
    if config.weekdays.is_empty() {
        return Err(ConfigError::NoWeekdays);
    }
    first_duplicate(config.weekdays.iter().map(String::as_str))
        .map_or(Ok(()), |d| Err(ConfigError::DuplicateWeekday(d.to_string())))?;

    first_duplicate(catalog.teachers.iter().map(|t| t.name.as_str()))
        .map_or(Ok(()), |n| Err(ConfigError::DuplicateTeacher(n.to_string())))?;
    first_duplicate(catalog.rooms.iter().map(|r| r.name.as_str()))
        .map_or(Ok(()), |n| Err(ConfigError::DuplicateRoom(n.to_string())))?;
    first_duplicate(catalog.subjects.iter().map(|s| s.name.as_str()))
        .map_or(Ok(()), |n| Err(ConfigError::DuplicateSubject(n.to_string())))?;

    if let Some(subject) = catalog.subjects.iter().find(|s| s.duration_slots == 0) {
        return Err(ConfigError::ZeroDuration(subject.name.clone()));
    }

    // Not an error: such a teacher is simply never picked for that subject.
    for teacher in &catalog.teachers {
        for subject in &teacher.qualified_subjects {
            if catalog.subject(subject).is_none() {
                warn!("Teacher {} is qualified for unknown subject '{}'", teacher.name, subject);
            }
        }
    }

    Ok(())
}

/// Checks a full allocation request.
pub fn validate(
    catalog: &Catalog,
    config: &RunConfig,
    sessions: &[SessionRequirement],
) -> Result<(), ConfigError> {
    validate_catalog(catalog, config)?;

    first_duplicate(sessions.iter().map(|s| s.id.as_str()))
        .map_or(Ok(()), |id| Err(ConfigError::DuplicateSession(id.to_string())))?;

    match sessions.iter().find(|s| catalog.subject(&s.subject).is_none()) {
        Some(session) => Err(ConfigError::UnknownSubject {
            session: session.id.clone(),
            subject: session.subject.clone(),
        }),
        None => Ok(()),
    }
}

fn first_duplicate<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    names.into_iter().find(|name| !seen.insert(*name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Room, Subject, Teacher};

    fn sample_catalog() -> Catalog {
        Catalog::new(
            vec![
                Teacher::new("Ada", ["Math"]),
                Teacher::new("Grace", ["Physics"]),
            ],
            vec![Room::new("R1", 20), Room::new("R2", 30)],
            vec![Subject::new("Math", 2), Subject::new("Physics", 1)],
        )
    }

    fn sample_sessions() -> Vec<SessionRequirement> {
        vec![
            SessionRequirement::new("M-1A", "Math", "1A", 18),
            SessionRequirement::new("P-1A", "Physics", "1A", 18),
        ]
    }

    #[test]
    fn test_valid_input() {
        let result = validate(&sample_catalog(), &RunConfig::default(), &sample_sessions());
        assert!(result.is_ok());
    }

    #[test]
    fn test_zero_slots_per_day() {
        let config = RunConfig::new(["Monday"], 0);
        let err = validate(&sample_catalog(), &config, &sample_sessions()).unwrap_err();
        assert_eq!(err, ConfigError::ZeroSlotsPerDay);
    }

    #[test]
    fn test_too_many_slots_per_day() {
        let config = RunConfig::new(["Monday"], u32::MAX);
        let err = validate(&sample_catalog(), &config, &sample_sessions()).unwrap_err();
        assert_eq!(err, ConfigError::TooManySlots(u32::MAX));

        let config = RunConfig::new(["Monday"], MAX_SLOTS_PER_DAY);
        assert!(validate(&sample_catalog(), &config, &sample_sessions()).is_ok());
    }

    #[test]
    fn test_no_weekdays() {
        let config = RunConfig::new(Vec::<String>::new(), 5);
        let err = validate(&sample_catalog(), &config, &sample_sessions()).unwrap_err();
        assert_eq!(err, ConfigError::NoWeekdays);
    }

    #[test]
    fn test_duplicate_weekday() {
        let config = RunConfig::new(["Monday", "Monday"], 5);
        let err = validate(&sample_catalog(), &config, &sample_sessions()).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateWeekday("Monday".to_string()));
    }

    #[test]
    fn test_duplicate_room() {
        let mut catalog = sample_catalog();
        catalog.rooms.push(Room::new("R1", 50));
        let err = validate(&catalog, &RunConfig::default(), &sample_sessions()).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateRoom("R1".to_string()));
    }

    #[test]
    fn test_duplicate_teacher() {
        let mut catalog = sample_catalog();
        catalog.teachers.push(Teacher::new("Ada", ["Physics"]));
        let err = validate(&catalog, &RunConfig::default(), &sample_sessions()).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateTeacher("Ada".to_string()));
    }

    #[test]
    fn test_zero_duration_subject() {
        let mut catalog = sample_catalog();
        catalog.subjects.push(Subject::new("Recess", 0));
        let err = validate(&catalog, &RunConfig::default(), &sample_sessions()).unwrap_err();
        assert_eq!(err, ConfigError::ZeroDuration("Recess".to_string()));
    }

    #[test]
    fn test_duplicate_session() {
        let mut sessions = sample_sessions();
        sessions.push(SessionRequirement::new("M-1A", "Math", "1B", 10));
        let err = validate(&sample_catalog(), &RunConfig::default(), &sessions).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateSession("M-1A".to_string()));
    }

    #[test]
    fn test_unknown_subject() {
        let sessions = vec![SessionRequirement::new("C-1A", "Chemistry", "1A", 10)];
        let err = validate(&sample_catalog(), &RunConfig::default(), &sessions).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownSubject {
                session: "C-1A".to_string(),
                subject: "Chemistry".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_qualification_is_tolerated() {
        let mut catalog = sample_catalog();
        catalog.teachers.push(Teacher::new("Linus", ["Kernels"]));
        assert!(validate(&catalog, &RunConfig::default(), &sample_sessions()).is_ok());
    }
}
