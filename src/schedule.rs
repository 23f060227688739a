//! The timetable produced by an allocation run.
//!
//! A schedule is read-only outside the engine. Several assignments may share
//! a (day, slot) when they use different rooms and teachers; each day keeps a
//! sparse map from slot to the assignments occupying it, in commit order.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::config::RunConfig;
use crate::data::{AssignmentView, DayIndex, Room, SchedulingOutput, SessionRequirement, Subject, Teacher, Timeslot};

/// A session committed to a day, a slot range, a teacher and a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment<'a> {
    pub day: DayIndex,
    pub start_slot: Timeslot,
    pub teacher: &'a Teacher,
    pub room: &'a Room,
    pub session: &'a SessionRequirement,
    pub subject: &'a Subject,
}

impl Assignment<'_> {
    #[inline]
    pub fn slots(&self) -> Range<Timeslot> {
        self.start_slot..self.start_slot + self.subject.duration_slots
    }

    /// Last occupied slot, inclusive.
    #[inline]
    pub fn end_slot(&self) -> Timeslot {
        self.start_slot + self.subject.duration_slots - 1
    }

    pub fn occupies(&self, day: DayIndex, slot: Timeslot) -> bool {
        self.day == day && self.slots().contains(&slot)
    }
}

/// Outcome of one session after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement<'a> {
    Unplaced,
    Placed(Assignment<'a>),
}

impl Placement<'_> {
    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed(_))
    }
}

#[derive(Debug, Clone)]
pub struct Schedule<'a> {
    config: &'a RunConfig,
    assignments: Vec<Assignment<'a>>,
    grid: Vec<BTreeMap<Timeslot, Vec<usize>>>,
    unplaced: Vec<&'a SessionRequirement>,
}

impl<'a> Schedule<'a> {
    pub(crate) fn new(config: &'a RunConfig) -> Self {
        Self {
            config,
            assignments: Vec::new(),
            grid: vec![BTreeMap::new(); config.weekdays.len()],
            unplaced: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, assignment: Assignment<'a>) {
        let index = self.assignments.len();
        if let Some(day) = self.grid.get_mut(assignment.day) {
            for slot in assignment.slots() {
                day.entry(slot).or_default().push(index);
            }
        }
        self.assignments.push(assignment);
    }

    pub(crate) fn record_unplaced(&mut self, session: &'a SessionRequirement) {
        self.unplaced.push(session);
    }

    pub fn config(&self) -> &'a RunConfig {
        self.config
    }

    /// First assignment committed at this day and slot, if any.
    pub fn assignment_at(&self, day: DayIndex, slot: Timeslot) -> Option<&Assignment<'a>> {
        self.assignments_at(day, slot).next()
    }

    /// Every assignment occupying this day and slot, in commit order.
    pub fn assignments_at(&self, day: DayIndex, slot: Timeslot) -> impl Iterator<Item = &Assignment<'a>> {
        self.grid
            .get(day)
            .and_then(|d| d.get(&slot))
            .into_iter()
            .flatten()
            .map(move |&i| &self.assignments[i])
    }

    pub fn room_assignment_at(&self, day: DayIndex, slot: Timeslot, room: &str) -> Option<&Assignment<'a>> {
        self.assignments_at(day, slot).find(|a| a.room.name == room)
    }

    pub fn teacher_assignment_at(&self, day: DayIndex, slot: Timeslot, teacher: &str) -> Option<&Assignment<'a>> {
        self.assignments_at(day, slot).find(|a| a.teacher.name == teacher)
    }

    /// All assignments ordered by day, then starting slot, then commit order.
    pub fn all_assignments(&self) -> impl Iterator<Item = &Assignment<'a>> {
        self.grid.iter().flat_map(move |day| {
            day.iter().flat_map(move |(&slot, occupants)| {
                occupants
                    .iter()
                    .map(move |&i| &self.assignments[i])
                    .filter(move |a| a.start_slot == slot)
            })
        })
    }

    /// Sessions that could not be placed, in the order they were attempted.
    pub fn unplaced_sessions(&self) -> &[&'a SessionRequirement] {
        &self.unplaced
    }

    pub fn placement_of(&self, session_id: &str) -> Placement<'a> {
        self.assignments
            .iter()
            .find(|a| a.session.id == session_id)
            .map_or(Placement::Unplaced, |a| Placement::Placed(*a))
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn day_label(&self, day: DayIndex) -> &'a str {
        self.config.weekdays.get(day).map_or("", String::as_str)
    }

    pub fn view(&self, assignment: &Assignment<'_>) -> AssignmentView {
        AssignmentView {
            session_id: assignment.session.id.clone(),
            subject: assignment.subject.name.clone(),
            group: assignment.session.group.clone(),
            day: self.day_label(assignment.day).to_string(),
            start_slot: assignment.start_slot,
            end_slot: assignment.end_slot(),
            teacher: assignment.teacher.name.clone(),
            room: assignment.room.name.clone(),
        }
    }

    pub fn to_output(&self) -> SchedulingOutput {
        SchedulingOutput {
            assignments: self.all_assignments().map(|a| self.view(a)).collect(),
            unplaced: self.unplaced.iter().map(|s| s.id.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        config: RunConfig,
        teachers: Vec<Teacher>,
        rooms: Vec<Room>,
        subjects: Vec<Subject>,
        sessions: Vec<SessionRequirement>,
    }

    fn fixture() -> Fixture {
        Fixture {
            config: RunConfig::new(["Mon", "Tue"], 4),
            teachers: vec![Teacher::new("Ada", ["Math"]), Teacher::new("Grace", ["Math"])],
            rooms: vec![Room::new("R1", 30), Room::new("R2", 30)],
            subjects: vec![Subject::new("Math", 2)],
            sessions: vec![
                SessionRequirement::new("S1", "Math", "1A", 10),
                SessionRequirement::new("S2", "Math", "1B", 10),
                SessionRequirement::new("S3", "Math", "1C", 10),
            ],
        }
    }

    fn assignment<'a>(f: &'a Fixture, day: DayIndex, start: Timeslot, who: usize, session: usize) -> Assignment<'a> {
        Assignment {
            day,
            start_slot: start,
            teacher: &f.teachers[who],
            room: &f.rooms[who],
            session: &f.sessions[session],
            subject: &f.subjects[0],
        }
    }

    #[test]
    fn record_fills_every_occupied_slot() {
        let f = fixture();
        let mut schedule = Schedule::new(&f.config);
        schedule.record(assignment(&f, 1, 1, 0, 0));

        assert!(schedule.assignment_at(1, 0).is_none());
        assert_eq!(schedule.assignment_at(1, 1).unwrap().session.id, "S1");
        assert_eq!(schedule.assignment_at(1, 2).unwrap().session.id, "S1");
        assert!(schedule.assignment_at(1, 3).is_none());
        assert!(schedule.assignment_at(0, 1).is_none());
        assert!(schedule.assignment_at(5, 1).is_none());
    }

    #[test]
    fn parallel_assignments_share_a_slot() {
        let f = fixture();
        let mut schedule = Schedule::new(&f.config);
        schedule.record(assignment(&f, 0, 0, 0, 0));
        schedule.record(assignment(&f, 0, 1, 1, 1));

        assert_eq!(schedule.assignments_at(0, 1).count(), 2);
        assert_eq!(schedule.assignment_at(0, 1).unwrap().session.id, "S1");
        assert_eq!(schedule.room_assignment_at(0, 1, "R2").unwrap().session.id, "S2");
        assert_eq!(schedule.teacher_assignment_at(0, 0, "Ada").unwrap().session.id, "S1");
        assert!(schedule.teacher_assignment_at(0, 0, "Grace").is_none());
    }

    #[test]
    fn all_assignments_are_ordered_by_day_then_slot() {
        let f = fixture();
        let mut schedule = Schedule::new(&f.config);
        schedule.record(assignment(&f, 1, 0, 0, 0));
        schedule.record(assignment(&f, 0, 2, 0, 1));
        schedule.record(assignment(&f, 0, 0, 1, 2));

        let ids: Vec<&str> = schedule.all_assignments().map(|a| a.session.id.as_str()).collect();
        assert_eq!(ids, vec!["S3", "S2", "S1"]);
    }

    #[test]
    fn placement_reports_unplaced_and_placed() {
        let f = fixture();
        let mut schedule = Schedule::new(&f.config);
        schedule.record(assignment(&f, 0, 0, 0, 0));
        schedule.record_unplaced(&f.sessions[1]);

        assert!(schedule.placement_of("S1").is_placed());
        assert_eq!(schedule.placement_of("S2"), Placement::Unplaced);
        assert_eq!(schedule.unplaced_sessions().len(), 1);
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn output_resolves_names() {
        let f = fixture();
        let mut schedule = Schedule::new(&f.config);
        schedule.record(assignment(&f, 1, 2, 1, 0));
        schedule.record_unplaced(&f.sessions[2]);

        let output = schedule.to_output();
        assert_eq!(output.unplaced, vec!["S3".to_string()]);
        let view = &output.assignments[0];
        assert_eq!(view.day, "Tue");
        assert_eq!((view.start_slot, view.end_slot), (2, 3));
        assert_eq!(view.teacher, "Grace");
        assert_eq!(view.room, "R2");
        assert_eq!(view.group, "1A");
    }
}
