use itertools::{Itertools, iproduct};
use log::{debug, info, trace, warn};
use std::time::Instant;

use crate::config::RunConfig;
use crate::data::{Catalog, Room, SessionRequirement, Subject, Teacher, Timeslot};
use crate::error::ConfigError;
use crate::ledger::AvailabilityLedger;
use crate::schedule::{Assignment, Schedule};
use crate::validation;

/// A single placement decision taken during a run.
#[derive(Debug, Clone, Copy)]
pub enum Decision<'s, 'a> {
    Attempting(&'a SessionRequirement),
    Placed(&'s Assignment<'a>),
    Unplaced(&'a SessionRequirement),
}

/// Receives every placement decision as it is taken.
pub trait PlacementObserver {
    fn on_decision(&mut self, decision: Decision<'_, '_>);
}

/// Forwards decisions to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl PlacementObserver for LogObserver {
    fn on_decision(&mut self, decision: Decision<'_, '_>) {
        match decision {
            Decision::Attempting(session) => debug!("Trying to place {}", session),
            Decision::Placed(a) => debug!(
                "Placed {} with {} in {} on day {} slots {}-{}",
                a.session,
                a.teacher.name,
                a.room.name,
                a.day,
                a.start_slot,
                a.end_slot()
            ),
            Decision::Unplaced(session) => debug!("Could not place {}", session),
        }
    }
}

/// Greedy first-fit timetable allocator.
///
/// Sessions are tried longest first; for each one the search walks
/// day → starting slot → teacher → room in configured and catalog order
/// and commits the first combination whose teacher and room are free for
/// the whole slot range. A session that fits nowhere is recorded as
/// unplaced and never revisited.
pub struct Allocator<'a> {
    catalog: &'a Catalog,
    config: &'a RunConfig,
}

impl<'a> Allocator<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a RunConfig) -> Self {
        Self { catalog, config }
    }

    /// Validates the request, then allocates every session.
    pub fn allocate(&self, sessions: &'a [SessionRequirement]) -> Result<Schedule<'a>, ConfigError> {
        self.allocate_with(sessions, &mut LogObserver)
    }

    pub fn allocate_with(
        &self,
        sessions: &'a [SessionRequirement],
        observer: &mut dyn PlacementObserver,
    ) -> Result<Schedule<'a>, ConfigError> {
        validation::validate(self.catalog, self.config, sessions)?;
        Ok(self.run(sessions, observer))
    }

    fn run(&self, sessions: &'a [SessionRequirement], observer: &mut dyn PlacementObserver) -> Schedule<'a> {
        let start_time = Instant::now();
        info!(
            "Allocating {} sessions over {} days of {} slots with {} teachers and {} rooms...",
            sessions.len(),
            self.config.weekdays.len(),
            self.config.slots_per_day,
            self.catalog.teachers.len(),
            self.catalog.rooms.len()
        );

        let mut ledger = AvailabilityLedger::new(self.config.weekdays.len(), self.config.slots_per_day);
        let mut schedule = Schedule::new(self.config);

        // sorted_by_key is stable, so equal durations keep input order
        let pending = sessions
            .iter()
            .map(|s| (s, self.catalog.subject(&s.subject)))
            .sorted_by_key(|(_, subject)| std::cmp::Reverse(subject.map_or(0, |s| s.duration_slots)));

        for (session, subject) in pending {
            observer.on_decision(Decision::Attempting(session));
            let Some(subject) = subject else {
                warn!("{} names unknown subject, leaving it unplaced", session);
                schedule.record_unplaced(session);
                observer.on_decision(Decision::Unplaced(session));
                continue;
            };
            match self.find_slot(&ledger, session, subject) {
                Some(assignment) => {
                    ledger.commit(
                        assignment.day,
                        assignment.slots(),
                        &assignment.teacher.name,
                        &assignment.room.name,
                    );
                    schedule.record(assignment);
                    observer.on_decision(Decision::Placed(&assignment));
                }
                None => {
                    schedule.record_unplaced(session);
                    observer.on_decision(Decision::Unplaced(session));
                }
            }
        }

        info!(
            "Allocation finished in {:.2?}: {} placed, {} unplaced",
            start_time.elapsed(),
            schedule.len(),
            schedule.unplaced_sessions().len()
        );
        schedule
    }

    fn find_slot(
        &self,
        ledger: &AvailabilityLedger<'a>,
        session: &'a SessionRequirement,
        subject: &'a Subject,
    ) -> Option<Assignment<'a>> {
        let duration = subject.duration_slots;
        let Some(last_start) = self.config.slots_per_day.checked_sub(duration) else {
            trace!("{} is longer than a day, skipping search", session);
            return None;
        };

        let teachers: Vec<&'a Teacher> = self
            .catalog
            .teachers
            .iter()
            .filter(|t| t.is_qualified_for(&subject.name))
            .collect();
        let required = session.enrollment.max(subject.min_capacity);
        let rooms: Vec<&'a Room> = self.catalog.rooms.iter().filter(|r| r.seats(required)).collect();
        trace!(
            "{}: {} qualified teachers, {} rooms seating {}",
            session,
            teachers.len(),
            rooms.len(),
            required
        );

        iproduct!(
            0..self.config.weekdays.len(),
            0..=last_start,
            teachers.iter().copied(),
            rooms.iter().copied()
        )
        .find(|&(day, start, teacher, room)| {
            ledger.is_free(day, start..start + duration, &teacher.name, &room.name)
        })
        .map(|(day, start_slot, teacher, room): (usize, Timeslot, _, _)| Assignment {
            day,
            start_slot,
            teacher,
            room,
            session,
            subject,
        })
    }
}
