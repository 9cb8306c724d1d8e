//! Planned time blocks.
//!
//! Shared by schedulers (which produce blocks) and planners (which return them).

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::task::Task;

/// A concrete placement of a task inside the planning window.
///
/// Invariant: `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlannedBlock<'a> {
    pub task: &'a Task,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl<'a> PlannedBlock<'a> {
    pub fn new(task: &'a Task, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        debug_assert!(end > start, "planned block must have positive length");
        Self { task, start, end }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

impl fmt::Display for PlannedBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}  {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M"),
            self.task.name
        )
    }
}
