//! Schedulers: lay an already-ordered task list out into time blocks.
//!
//! Callers guarantee `day_end > day_start`. Running out of window is not an error: the
//! blocks placed so far are returned and the rest of the list is dropped (not deferred).

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::block::PlannedBlock;
use crate::task::Task;

pub const DEFAULT_WORK_MINUTES: i32 = 25;
pub const DEFAULT_BREAK_MINUTES: i32 = 5;

pub trait Scheduler {
    fn schedule<'a>(
        &self,
        tasks: &[&'a Task],
        day_start: NaiveDateTime,
        day_end: NaiveDateTime,
    ) -> Vec<PlannedBlock<'a>>;
}

/// One block per task, back to back, in the given order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequentialScheduler;

impl Scheduler for SequentialScheduler {
    fn schedule<'a>(
        &self,
        tasks: &[&'a Task],
        day_start: NaiveDateTime,
        day_end: NaiveDateTime,
    ) -> Vec<PlannedBlock<'a>> {
        let mut blocks = Vec::new();
        let mut cursor = day_start;

        for (i, &task) in tasks.iter().enumerate() {
            if !task.is_schedulable() {
                continue;
            }

            let end = match cursor.checked_add_signed(Duration::minutes(i64::from(task.duration))) {
                Some(end) if end <= day_end => end,
                _ => {
                    debug!(
                        task = %task.name,
                        dropped = tasks.len() - i,
                        "sequential: window exhausted"
                    );
                    break;
                }
            };

            blocks.push(PlannedBlock::new(task, cursor, end));
            cursor = end;
        }

        blocks
    }
}

/// Splits tasks into work blocks separated by short breaks.
///
/// Breaks are gaps, not blocks. A break only follows a work block while the same task
/// still has minutes left; consecutive tasks start back to back. The last chunk of a
/// task is sized to whatever remains, so a task never gets more work time than its
/// duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroScheduler {
    pub work_minutes: i32,
    pub break_minutes: i32,
}

impl PomodoroScheduler {
    /// Non-positive lengths fall back to 1 minute of work / no break.
    pub fn new(work_minutes: i32, break_minutes: i32) -> Self {
        Self {
            work_minutes: work_minutes.max(1),
            break_minutes: break_minutes.max(0),
        }
    }
}

impl Default for PomodoroScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_MINUTES, DEFAULT_BREAK_MINUTES)
    }
}

impl Scheduler for PomodoroScheduler {
    fn schedule<'a>(
        &self,
        tasks: &[&'a Task],
        day_start: NaiveDateTime,
        day_end: NaiveDateTime,
    ) -> Vec<PlannedBlock<'a>> {
        let mut blocks = Vec::new();
        let mut cursor = day_start;
        // Deserialized values bypass `new`.
        let work_minutes = self.work_minutes.max(1);
        let break_len = Duration::minutes(i64::from(self.break_minutes.max(0)));

        for &task in tasks {
            let mut remaining = task.duration;
            if remaining <= 0 {
                continue;
            }

            while remaining > 0 {
                let chunk = remaining.min(work_minutes);
                let end = match cursor.checked_add_signed(Duration::minutes(i64::from(chunk))) {
                    Some(end) if end <= day_end => end,
                    _ => {
                        debug!(task = %task.name, remaining, "pomodoro: no room for work block");
                        return blocks;
                    }
                };

                blocks.push(PlannedBlock::new(task, cursor, end));
                remaining -= chunk;
                cursor = end;

                if remaining > 0 {
                    match cursor.checked_add_signed(break_len) {
                        Some(break_end) if break_end <= day_end => cursor = break_end,
                        _ => {
                            debug!(task = %task.name, remaining, "pomodoro: no room for break");
                            return blocks;
                        }
                    }
                }
            }
        }

        blocks
    }
}

/// Closed set of schedulers a planner can delegate to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchedulerKind {
    #[default]
    Sequential,
    Pomodoro(PomodoroScheduler),
}

impl SchedulerKind {
    pub fn pomodoro() -> Self {
        SchedulerKind::Pomodoro(PomodoroScheduler::default())
    }
}

impl Scheduler for SchedulerKind {
    fn schedule<'a>(
        &self,
        tasks: &[&'a Task],
        day_start: NaiveDateTime,
        day_end: NaiveDateTime,
    ) -> Vec<PlannedBlock<'a>> {
        match self {
            SchedulerKind::Sequential => SequentialScheduler.schedule(tasks, day_start, day_end),
            SchedulerKind::Pomodoro(p) => p.schedule(tasks, day_start, day_end),
        }
    }
}
