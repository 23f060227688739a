//! Greedy weekly timetable allocation.
//!
//! Class sessions are placed onto (day, slot, teacher, room) combinations so
//! that no teacher or room is double-booked, every room seats its class and
//! every teacher is qualified for what they teach. Sessions that fit nowhere
//! are reported as unplaced rather than failing the run.

pub mod config;
pub mod data;
pub mod error;
pub mod ledger;
pub mod report;
pub mod sample;
pub mod schedule;
pub mod server;
pub mod solver;
pub mod validation;

pub use config::{RunConfig, ServerConfig};
pub use data::{Catalog, Room, SchedulingInput, SchedulingOutput, SessionRequirement, Subject, Teacher};
pub use error::{ConfigError, DemoError, ExportError};
pub use schedule::{Assignment, Placement, Schedule};
pub use solver::{Allocator, Decision, LogObserver, PlacementObserver};
