//! Planner: pairs one priority strategy with one scheduler.
//!
//! Flow: score + stable-sort tasks (descending), optionally rebalance, then hand the
//! ordered list to the scheduler.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::block::PlannedBlock;
use crate::error::{PlanError, PlanResult, ensure_window};
use crate::priority::{DEFAULT_ENERGY, PriorityStrategy, StrategyKind, clamp_energy};
use crate::scheduler::{Scheduler, SchedulerKind};
use crate::task::Task;

/// Regular tasks placed between two recovery tasks in balanced mode.
pub const DEFAULT_RECOVERY_INTERVAL: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannerMode {
    /// Deadline-driven ordering.
    Study,
    /// Difficulty matched to energy level.
    Energy,
    /// Deadline ordering with recovery tasks interleaved.
    Balanced,
}

impl PlannerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlannerMode::Study => "study",
            PlannerMode::Energy => "energy",
            PlannerMode::Balanced => "balanced",
        }
    }
}

impl fmt::Display for PlannerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlannerMode {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "study" => Ok(PlannerMode::Study),
            "energy" => Ok(PlannerMode::Energy),
            "balanced" => Ok(PlannerMode::Balanced),
            _ => Err(PlanError::UnknownMode(s.to_string())),
        }
    }
}

/// Unresolved planner settings. `None` means "use the mode's default".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub mode: PlannerMode,
    #[serde(default)]
    pub energy_level: Option<i32>,
    /// Only honoured in balanced mode; study and energy modes fix their strategy.
    #[serde(default)]
    pub strategy: Option<StrategyKind>,
    #[serde(default)]
    pub scheduler: Option<SchedulerKind>,
    #[serde(default)]
    pub recovery_interval: Option<i64>,
}

impl PlannerConfig {
    pub fn new(mode: PlannerMode) -> Self {
        Self {
            mode,
            energy_level: None,
            strategy: None,
            scheduler: None,
            recovery_interval: None,
        }
    }

    pub fn with_energy_level(mut self, level: i32) -> Self {
        self.energy_level = Some(level);
        self
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_scheduler(mut self, scheduler: SchedulerKind) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn with_recovery_interval(mut self, interval: i64) -> Self {
        self.recovery_interval = Some(interval);
        self
    }
}

/// A fully resolved planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planner {
    mode: PlannerMode,
    strategy: StrategyKind,
    scheduler: SchedulerKind,
    recovery_interval: usize,
}

impl Planner {
    /// Resolve every optional setting once.
    pub fn from_config(config: PlannerConfig) -> Self {
        let scheduler = config.scheduler.unwrap_or_default();
        let strategy = match config.mode {
            PlannerMode::Study => StrategyKind::Deadline,
            PlannerMode::Energy => StrategyKind::EnergyAware {
                energy_level: clamp_energy(config.energy_level.unwrap_or(DEFAULT_ENERGY)),
            },
            PlannerMode::Balanced => config.strategy.unwrap_or_default(),
        };
        let recovery_interval = config
            .recovery_interval
            .map(|n| n.max(1) as usize)
            .unwrap_or(DEFAULT_RECOVERY_INTERVAL);

        debug!(
            mode = %config.mode,
            ?strategy,
            ?scheduler,
            recovery_interval,
            "planner resolved"
        );

        Self {
            mode: config.mode,
            strategy,
            scheduler,
            recovery_interval,
        }
    }

    pub fn study(scheduler: Option<SchedulerKind>) -> Self {
        Self::from_config(PlannerConfig {
            scheduler,
            ..PlannerConfig::new(PlannerMode::Study)
        })
    }

    pub fn energy(energy_level: i32, scheduler: Option<SchedulerKind>) -> Self {
        Self::from_config(PlannerConfig {
            energy_level: Some(energy_level),
            scheduler,
            ..PlannerConfig::new(PlannerMode::Energy)
        })
    }

    pub fn balanced(strategy: Option<StrategyKind>, scheduler: Option<SchedulerKind>) -> Self {
        Self::from_config(PlannerConfig {
            strategy,
            scheduler,
            ..PlannerConfig::new(PlannerMode::Balanced)
        })
    }

    pub fn mode(&self) -> PlannerMode {
        self.mode
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    pub fn scheduler(&self) -> SchedulerKind {
        self.scheduler
    }

    pub fn recovery_interval(&self) -> usize {
        self.recovery_interval
    }

    /// Build the day's blocks. The planning day for deadline math is `day_start`'s date.
    pub fn generate<'a, I>(
        &self,
        tasks: I,
        day_start: NaiveDateTime,
        day_end: NaiveDateTime,
    ) -> PlanResult<Vec<PlannedBlock<'a>>>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        ensure_window(day_start, day_end)?;
        let today = day_start.date();

        let ordered = match self.mode {
            PlannerMode::Study | PlannerMode::Energy => {
                sort_by_score(tasks, &self.strategy, today)
            }
            PlannerMode::Balanced => self.balance(tasks, today),
        };

        trace!(
            order = ?ordered.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            "planner order"
        );

        Ok(self.scheduler.schedule(&ordered, day_start, day_end))
    }

    /// Sort regular tasks, then slot one recovery task in after every
    /// `recovery_interval` regular ones. Recovery tasks keep their input order.
    fn balance<'a>(
        &self,
        tasks: impl IntoIterator<Item = &'a Task>,
        today: NaiveDate,
    ) -> Vec<&'a Task> {
        let (recovery, regular): (Vec<&Task>, Vec<&Task>) =
            tasks.into_iter().partition(|t| t.is_recovery());

        let regular = sort_by_score(regular, &self.strategy, today);

        let mut combined = Vec::with_capacity(regular.len() + recovery.len());
        let mut recovery = recovery.into_iter();
        for (i, task) in regular.into_iter().enumerate() {
            combined.push(task);
            if (i + 1) % self.recovery_interval == 0 {
                if let Some(r) = recovery.next() {
                    combined.push(r);
                }
            }
        }
        combined.extend(recovery);
        combined
    }
}

/// Stable descending sort: equal scores keep their input order.
pub fn sort_by_score<'a, I, S>(tasks: I, strategy: &S, today: NaiveDate) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
    S: PriorityStrategy + ?Sized,
{
    let mut scored: Vec<(f64, &'a Task)> = tasks
        .into_iter()
        .map(|t| (strategy.score(t, today), t))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, t)| t).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority::SimplePriority;
    use chrono::Duration;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    fn names<'a>(blocks: &[PlannedBlock<'a>]) -> Vec<&'a str> {
        blocks.iter().map(|b| b.task.name.as_str()).collect()
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("study".parse::<PlannerMode>(), Ok(PlannerMode::Study));
        assert_eq!("ENERGY".parse::<PlannerMode>(), Ok(PlannerMode::Energy));
        assert_eq!(" Balanced ".parse::<PlannerMode>(), Ok(PlannerMode::Balanced));
        assert_eq!(
            "unknown".parse::<PlannerMode>(),
            Err(PlanError::UnknownMode("unknown".into()))
        );
        assert_eq!(PlannerMode::Balanced.to_string(), "balanced");
    }

    #[test]
    fn config_resolves_defaults() {
        let study = Planner::study(None);
        assert_eq!(study.strategy(), StrategyKind::Deadline);
        assert_eq!(study.scheduler(), SchedulerKind::Sequential);

        let energy = Planner::energy(11, Some(SchedulerKind::pomodoro()));
        assert_eq!(energy.strategy(), StrategyKind::EnergyAware { energy_level: 5 });
        assert_eq!(energy.scheduler(), SchedulerKind::pomodoro());

        let balanced = Planner::balanced(None, None);
        assert_eq!(balanced.strategy(), StrategyKind::Deadline);
        assert_eq!(balanced.recovery_interval(), DEFAULT_RECOVERY_INTERVAL);

        let simple = Planner::balanced(Some(StrategyKind::Simple), None);
        assert_eq!(simple.strategy(), StrategyKind::Simple);
    }

    #[test]
    fn study_ignores_configured_strategy() {
        let p = Planner::from_config(
            PlannerConfig::new(PlannerMode::Study).with_strategy(StrategyKind::Simple),
        );
        assert_eq!(p.strategy(), StrategyKind::Deadline);
    }

    #[test]
    fn recovery_interval_is_clamped() {
        let p = Planner::from_config(
            PlannerConfig::new(PlannerMode::Balanced).with_recovery_interval(-3),
        );
        assert_eq!(p.recovery_interval(), 1);
    }

    #[test]
    fn rejects_inverted_window() {
        let tasks = vec![Task::new("Study", 30).with_category("study")];
        let err = Planner::study(None).generate(&tasks, at(10, 0), at(9, 0));
        assert!(matches!(err, Err(PlanError::InvalidWindow { .. })));
        assert!(Planner::study(None).generate(&tasks, at(9, 0), at(9, 0)).is_err());
    }

    #[test]
    fn study_orders_by_deadline_score() {
        let tasks = vec![
            Task::new("Admin", 20).with_category("admin"),
            Task::new("Study", 30).with_category("study"),
        ];
        let blocks = Planner::study(None).generate(&tasks, at(9, 0), at(10, 30)).unwrap();
        assert_eq!(names(&blocks), vec!["Study", "Admin"]);
    }

    #[test]
    fn sort_is_stable_for_equal_scores() {
        let tasks: Vec<Task> = ["one", "two", "three", "four"]
            .iter()
            .map(|n| Task::new(*n, 10).with_category("study"))
            .collect();
        let sorted = sort_by_score(&tasks, &SimplePriority, day());
        let order: Vec<&str> = sorted.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(order, vec!["one", "two", "three", "four"]);
    }

    #[test]
    fn balanced_interleaves_after_every_two() {
        // Scores descending A > B > C via deadlines; R is recovery.
        let tasks = vec![
            Task::new("R", 5).with_category("recovery"),
            Task::new("C", 10).with_category("study"),
            Task::new("B", 10).with_category("study").with_deadline(day() + Duration::days(2)),
            Task::new("A", 10).with_category("study").with_deadline(day()),
        ];
        let blocks = Planner::balanced(None, None).generate(&tasks, at(9, 0), at(12, 0)).unwrap();
        assert_eq!(names(&blocks), vec!["A", "B", "R", "C"]);
    }

    #[test]
    fn balanced_appends_leftover_recovery_in_input_order() {
        let tasks = vec![
            Task::new("Walk", 10).with_category("recovery"),
            Task::new("Study", 30).with_category("study"),
            Task::new("Stretch", 5).with_category("recovery"),
            // difficulty 5 would win a score sort; recovery tasks are never sorted
            Task::new("Nap", 20).with_category("recovery").with_difficulty(5),
        ];
        let blocks = Planner::balanced(None, None).generate(&tasks, at(9, 0), at(12, 0)).unwrap();
        assert_eq!(names(&blocks), vec!["Study", "Walk", "Stretch", "Nap"]);
    }

    #[test]
    fn balanced_interval_of_one() {
        let tasks = vec![
            Task::new("Task A", 10).with_category("study").with_deadline(day()),
            Task::new("Task B", 10).with_category("study").with_deadline(day() + Duration::days(1)),
            Task::new("Break", 5).with_category("recovery"),
        ];
        let p = Planner::from_config(
            PlannerConfig::new(PlannerMode::Balanced).with_recovery_interval(-3),
        );
        let blocks = p.generate(&tasks, at(9, 0), at(9, 40)).unwrap();
        assert_eq!(names(&blocks), vec!["Task A", "Break", "Task B"]);
    }

    #[test]
    fn energy_low_prefers_easy() {
        let tasks = vec![
            Task::new("Hard Task", 40).with_category("study").with_difficulty(5),
            Task::new("Easy Task", 20).with_category("study").with_difficulty(1),
        ];
        let blocks = Planner::energy(1, None).generate(&tasks, at(9, 0), at(10, 30)).unwrap();
        assert_eq!(names(&blocks), vec!["Easy Task", "Hard Task"]);

        let blocks = Planner::energy(5, None).generate(&tasks, at(9, 0), at(10, 30)).unwrap();
        assert_eq!(names(&blocks), vec!["Hard Task", "Easy Task"]);
    }

    #[test]
    fn generate_is_idempotent() {
        let tasks = vec![
            Task::new("A", 30).with_category("study"),
            Task::new("B", 20).with_category("admin").with_deadline(day()),
            Task::new("C", 10).with_category("recovery"),
        ];
        let planner = Planner::balanced(None, Some(SchedulerKind::pomodoro()));
        let first = planner.generate(&tasks, at(9, 0), at(11, 0)).unwrap();
        let second = planner.generate(&tasks, at(9, 0), at(11, 0)).unwrap();
        assert_eq!(first, second);
    }
}
