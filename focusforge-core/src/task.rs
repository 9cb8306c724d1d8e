//! Task model consumed by the planning core.
//!
//! Tasks are owned by the caller; strategies, schedulers and planners only read them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Difficulty used when a task does not carry one (1-5 scale).
pub const DEFAULT_DIFFICULTY: i32 = 3;

/// Priority used when a task does not carry one.
pub const DEFAULT_PRIORITY: i32 = 1;

/// Category that the balanced planner treats as a micro-break.
pub const RECOVERY_CATEGORY: &str = "recovery";

/// A schedulable unit of work.
///
/// Note: names are not required to be unique. Optional numeric fields stay optional
/// here; use the `*_or_default` accessors when scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,

    /// Minutes. Zero or negative means there is nothing to schedule.
    #[serde(default)]
    pub duration: i32,

    /// Free-form, e.g. "study", "admin", "recovery".
    #[serde(default)]
    pub category: Option<String>,

    /// 1-5 difficulty.
    #[serde(default)]
    pub difficulty: Option<i32>,

    #[serde(default)]
    pub priority: Option<i32>,

    /// Calendar day the task is due.
    #[serde(default)]
    pub deadline: Option<NaiveDate>,

    #[serde(default)]
    pub must_do_today: bool,

    #[serde(default)]
    pub completed: bool,

    /// Hint that the task wants to be worked in pomodoros.
    #[serde(default)]
    pub pomodoro: bool,

    #[serde(default)]
    pub planned_distractions: Option<u32>,

    #[serde(default)]
    pub notes: String,
}

impl Task {
    pub fn new(name: impl Into<String>, duration: i32) -> Self {
        Self {
            name: name.into(),
            duration,
            category: None,
            difficulty: None,
            priority: None,
            deadline: None,
            must_do_today: false,
            completed: false,
            pomodoro: false,
            planned_distractions: None,
            notes: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: i32) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn must_do_today(mut self) -> Self {
        self.must_do_today = true;
        self
    }

    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    pub fn with_pomodoro(mut self) -> Self {
        self.pomodoro = true;
        self
    }

    pub fn with_planned_distractions(mut self, count: u32) -> Self {
        self.planned_distractions = Some(count);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Duration in hours; negative durations count as zero.
    pub fn duration_hours(&self) -> f64 {
        f64::from(self.duration.max(0)) / 60.0
    }

    /// Whether a scheduler has anything to place for this task.
    pub fn is_schedulable(&self) -> bool {
        self.duration > 0
    }

    /// Difficulty, falling back to 3 when unset or zero.
    pub fn difficulty_or_default(&self) -> i32 {
        match self.difficulty {
            Some(d) if d != 0 => d,
            _ => DEFAULT_DIFFICULTY,
        }
    }

    /// Priority, falling back to 1 when unset or zero.
    pub fn priority_or_default(&self) -> i32 {
        match self.priority {
            Some(p) if p != 0 => p,
            _ => DEFAULT_PRIORITY,
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn is_recovery(&self) -> bool {
        self.category() == Some(RECOVERY_CATEGORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_and_zero_fields() {
        let t = Task::new("Read", 30);
        assert_eq!(t.difficulty_or_default(), 3);
        assert_eq!(t.priority_or_default(), 1);

        let zeroed = Task::new("Read", 30).with_difficulty(0).with_priority(0);
        assert_eq!(zeroed.difficulty_or_default(), 3);
        assert_eq!(zeroed.priority_or_default(), 1);

        let set = Task::new("Read", 30).with_difficulty(5).with_priority(4);
        assert_eq!(set.difficulty_or_default(), 5);
        assert_eq!(set.priority_or_default(), 4);
    }

    #[test]
    fn negative_duration_is_not_schedulable() {
        let t = Task::new("Broken", -10);
        assert!(!t.is_schedulable());
        assert_eq!(t.duration_hours(), 0.0);
        assert!(Task::new("Ok", 1).is_schedulable());
    }

    #[test]
    fn recovery_detection_is_exact() {
        assert!(Task::new("Stretch", 10).with_category("recovery").is_recovery());
        assert!(!Task::new("Stretch", 10).with_category("Recovery").is_recovery());
        assert!(!Task::new("Stretch", 10).is_recovery());
    }

    #[test]
    fn bookkeeping_fields_round_trip_through_json() {
        let t = Task::new("Deep work", 90)
            .with_category("study")
            .with_planned_distractions(2)
            .with_notes("phone in the other room");
        assert_eq!(t.planned_distractions, Some(2));
        assert_eq!(t.notes, "phone in the other room");

        let back: Task = serde_json::from_str(&serde_json::to_string(&t).unwrap()).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let t: Task = serde_json::from_str(r#"{"name": "Email", "duration": 20}"#).unwrap();
        assert_eq!(t.name, "Email");
        assert_eq!(t.duration, 20);
        assert!(t.category.is_none());
        assert!(!t.completed);
        assert!(t.notes.is_empty());
    }
}
