//! Per-day, per-slot record of which teachers and rooms are committed.
//!
//! The ledger is the only place conflicts are decided. It is derived state:
//! a name is present at (day, slot) exactly when some committed assignment
//! holds that teacher or room there.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use crate::data::{DayIndex, Timeslot};

#[derive(Debug, Default, Clone)]
struct SlotUsage<'a> {
    teachers: HashSet<&'a str>,
    rooms: HashSet<&'a str>,
}

/// Sparse: only (day, slot) pairs that hold a commitment have an entry.
#[derive(Debug, Clone)]
pub struct AvailabilityLedger<'a> {
    day_count: usize,
    slots_per_day: Timeslot,
    usage: HashMap<(DayIndex, Timeslot), SlotUsage<'a>>,
}

impl<'a> AvailabilityLedger<'a> {
    pub fn new(day_count: usize, slots_per_day: Timeslot) -> Self {
        Self {
            day_count,
            slots_per_day,
            usage: HashMap::new(),
        }
    }

    fn in_bounds(&self, day: DayIndex, slots: &Range<Timeslot>) -> bool {
        day < self.day_count && slots.end <= self.slots_per_day
    }

    /// True iff neither the teacher nor the room is committed anywhere in
    /// `slots` on `day`. Slots outside the configured week count as taken.
    pub fn is_free(&self, day: DayIndex, slots: Range<Timeslot>, teacher: &str, room: &str) -> bool {
        if !self.in_bounds(day, &slots) {
            return false;
        }
        slots.into_iter().all(|slot| match self.usage.get(&(day, slot)) {
            Some(u) => !u.teachers.contains(teacher) && !u.rooms.contains(room),
            None => true,
        })
    }

    /// Records both names in every slot of the range. No conflict check.
    pub fn commit(&mut self, day: DayIndex, slots: Range<Timeslot>, teacher: &'a str, room: &'a str) {
        if !self.in_bounds(day, &slots) {
            return;
        }
        for slot in slots {
            let u = self.usage.entry((day, slot)).or_default();
            u.teachers.insert(teacher);
            u.rooms.insert(room);
        }
    }

    #[cfg(test)]
    fn teacher_busy(&self, day: DayIndex, slot: Timeslot, teacher: &str) -> bool {
        self.usage.get(&(day, slot)).is_some_and(|u| u.teachers.contains(teacher))
    }

    #[cfg(test)]
    fn room_busy(&self, day: DayIndex, slot: Timeslot, room: &str) -> bool {
        self.usage.get(&(day, slot)).is_some_and(|u| u.rooms.contains(room))
    }
}
