//! Priority strategies: score a task so planners can order it.
//!
//! Higher score = more urgent/important. Scoring is pure; the planning day is passed
//! in rather than read from the clock.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::Task;

pub const MIN_ENERGY: i32 = 1;
pub const MAX_ENERGY: i32 = 5;
pub const DEFAULT_ENERGY: i32 = 3;

/// Flat bonus for tasks marked must-do-today.
const MUST_DO_TODAY_BONUS: f64 = 10.0;

pub trait PriorityStrategy {
    fn score(&self, task: &Task, today: NaiveDate) -> f64;
}

/// Urgency from deadline proximity: `1 / max(days_left, 1)`. Overdue, due today and due
/// tomorrow all score 1.0. Tasks without a deadline have no urgency.
pub fn deadline_urgency(task: &Task, today: NaiveDate) -> f64 {
    match task.deadline {
        Some(deadline) => {
            let days_left = (deadline - today).num_days();
            1.0 / days_left.max(1) as f64
        }
        None => 0.0,
    }
}

/// Importance weight of a category. Unknown and missing categories weigh 1.0.
pub fn category_weight(category: Option<&str>) -> f64 {
    match category {
        Some("study") => 3.0,
        Some("recovery") => 2.0,
        // admin, other, unset
        _ => 1.0,
    }
}

pub fn clamp_energy(level: i32) -> i32 {
    level.clamp(MIN_ENERGY, MAX_ENERGY)
}

/// Baseline: explicit priority minus a light penalty for long tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplePriority;

impl PriorityStrategy for SimplePriority {
    fn score(&self, task: &Task, _today: NaiveDate) -> f64 {
        f64::from(task.priority_or_default()) - 0.2 * task.duration_hours()
    }
}

/// Emphasizes deadlines, category importance and difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeadlinePriority;

impl PriorityStrategy for DeadlinePriority {
    fn score(&self, task: &Task, today: NaiveDate) -> f64 {
        let urgency = deadline_urgency(task, today);
        let importance = category_weight(task.category());
        let difficulty = f64::from(task.difficulty_or_default());

        let mut score =
            4.0 * urgency + 3.0 * importance + 2.0 * difficulty - 0.3 * task.duration_hours();

        if task.must_do_today {
            score += MUST_DO_TODAY_BONUS;
        }
        score
    }
}

/// Matches task difficulty against the user's current energy level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyAwarePriority {
    energy_level: i32,
}

impl EnergyAwarePriority {
    /// Energy outside 1..=5 is clamped, never rejected.
    pub fn new(energy_level: i32) -> Self {
        Self {
            energy_level: clamp_energy(energy_level),
        }
    }

    pub fn energy_level(&self) -> i32 {
        self.energy_level
    }
}

impl Default for EnergyAwarePriority {
    fn default() -> Self {
        Self::new(DEFAULT_ENERGY)
    }
}

impl PriorityStrategy for EnergyAwarePriority {
    fn score(&self, task: &Task, today: NaiveDate) -> f64 {
        let difficulty = clamp_energy(task.difficulty_or_default());
        let diff = (difficulty - self.energy_level).abs();
        let compatibility = (5.0 - f64::from(diff)).max(0.0);

        2.5 * compatibility + 3.0 * deadline_urgency(task, today)
    }
}

/// Closed set of strategies a planner can be configured with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyKind {
    Simple,
    #[default]
    Deadline,
    EnergyAware { energy_level: i32 },
}

impl PriorityStrategy for StrategyKind {
    fn score(&self, task: &Task, today: NaiveDate) -> f64 {
        match *self {
            StrategyKind::Simple => SimplePriority.score(task, today),
            StrategyKind::Deadline => DeadlinePriority.score(task, today),
            StrategyKind::EnergyAware { energy_level } => {
                EnergyAwarePriority::new(energy_level).score(task, today)
            }
        }
    }
}
