use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::config::RunConfig;

// Type aliases for clarity
pub type Timeslot = u32;
pub type DayIndex = usize;

/// Represents a teacher and the subjects they are qualified to teach.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub name: String,
    pub qualified_subjects: BTreeSet<String>,
}

impl Teacher {
    pub fn new<I, S>(name: impl Into<String>, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            qualified_subjects: subjects.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_qualified_for(&self, subject: &str) -> bool {
        self.qualified_subjects.contains(subject)
    }
}

/// Represents a physical room with a given seating capacity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Room {
    pub name: String,
    pub capacity: u32,
}

impl Room {
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }

    pub fn seats(&self, required: u32) -> bool {
        self.capacity >= required
    }
}

/// Represents a subject: how many contiguous slots a session of it lasts and
/// the smallest room it can be taught in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub name: String,
    pub duration_slots: u32,
    #[serde(default)]
    pub min_capacity: u32,
}

impl Subject {
    pub fn new(name: impl Into<String>, duration_slots: u32) -> Self {
        Self {
            name: name.into(),
            duration_slots,
            min_capacity: 0,
        }
    }

    pub fn with_min_capacity(mut self, min_capacity: u32) -> Self {
        self.min_capacity = min_capacity;
        self
    }
}

/// One class session that has to be placed somewhere in the week.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequirement {
    pub id: String,
    pub subject: String,
    pub group: String,
    #[serde(default)]
    pub enrollment: u32,
}

impl SessionRequirement {
    pub fn new(
        id: impl Into<String>,
        subject: impl Into<String>,
        group: impl Into<String>,
        enrollment: u32,
    ) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            group: group.into(),
            enrollment,
        }
    }
}

impl fmt::Display for SessionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({})", self.subject, self.group)
    }
}

/// The immutable set of teachers, rooms and subjects a run allocates against.
///
/// Order matters: teachers and rooms are tried in the order given here.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Catalog {
    pub teachers: Vec<Teacher>,
    pub rooms: Vec<Room>,
    pub subjects: Vec<Subject>,
}

impl Catalog {
    pub fn new(teachers: Vec<Teacher>, rooms: Vec<Room>, subjects: Vec<Subject>) -> Self {
        Self {
            teachers,
            rooms,
            subjects,
        }
    }

    pub fn subject(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.name == name)
    }
}

/// The complete input for the scheduling problem.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingInput {
    #[serde(flatten)]
    pub catalog: Catalog,
    pub sessions: Vec<SessionRequirement>,
    #[serde(flatten)]
    pub config: RunConfig,
}

/// A committed assignment with every reference resolved to a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentView {
    pub session_id: String,
    pub subject: String,
    pub group: String,
    pub day: String,
    pub start_slot: Timeslot,
    pub end_slot: Timeslot,
    pub teacher: String,
    pub room: String,
}

impl fmt::Display for AssignmentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' ({}) with {} in {} on {} slots {}-{}",
            self.subject, self.group, self.teacher, self.room, self.day, self.start_slot, self.end_slot
        )
    }
}

/// The final output of the solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingOutput {
    pub assignments: Vec<AssignmentView>,
    pub unplaced: Vec<String>,
}
