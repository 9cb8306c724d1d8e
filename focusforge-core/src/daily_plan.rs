//! Daily plan entry point: window parsing, task filtering and planner selection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::block::PlannedBlock;
use crate::error::{PlanResult, ensure_window};
use crate::planner::{Planner, PlannerConfig, PlannerMode};
use crate::priority::{DEFAULT_ENERGY, clamp_energy};
use crate::scheduler::{PomodoroScheduler, SchedulerKind};
use crate::task::Task;
use crate::time::clock_on;

/// Everything needed to plan one day, with the defaults the CLI falls back to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyPlanRequest {
    /// "study", "energy" or "balanced".
    pub mode: String,
    pub energy_level: i32,
    /// "HH:MM"
    pub start: String,
    /// "HH:MM"
    pub end: String,
    /// Use pomodoro blocks when any active task asks for them.
    pub prefer_pomodoro: bool,
    pub pomodoro: PomodoroScheduler,
    pub recovery_interval: Option<i64>,
}

impl Default for DailyPlanRequest {
    fn default() -> Self {
        Self {
            mode: PlannerMode::Study.to_string(),
            energy_level: DEFAULT_ENERGY,
            start: "09:00".to_string(),
            end: "18:00".to_string(),
            prefer_pomodoro: true,
            pomodoro: PomodoroScheduler::default(),
            recovery_interval: None,
        }
    }
}

/// Parse a free-form energy level. Missing or non-numeric input gives the default;
/// numbers are clamped to 1..=5.
pub fn normalize_energy_level(raw: Option<&str>) -> i32 {
    raw.and_then(|s| s.trim().parse::<i32>().ok())
        .map(clamp_energy)
        .unwrap_or(DEFAULT_ENERGY)
}

/// Build a planner from a mode string. Unknown modes are rejected here, before any
/// scheduling happens.
pub fn planner_for_mode(
    mode: &str,
    energy_level: i32,
    scheduler: Option<SchedulerKind>,
    recovery_interval: Option<i64>,
) -> PlanResult<Planner> {
    let mode: PlannerMode = mode.parse()?;
    Ok(Planner::from_config(PlannerConfig {
        energy_level: Some(energy_level),
        scheduler,
        recovery_interval,
        ..PlannerConfig::new(mode)
    }))
}

/// Active = not completed and has a positive duration.
pub fn is_active(task: &Task) -> bool {
    !task.completed && task.is_schedulable()
}

/// Plan `day` for `tasks`.
///
/// Completed and zero-duration tasks are skipped. Pomodoro scheduling is used when the
/// request prefers it and at least one active task asks for it.
pub fn generate_daily_plan<'a>(
    tasks: &'a [Task],
    request: &DailyPlanRequest,
    day: NaiveDate,
) -> PlanResult<Vec<PlannedBlock<'a>>> {
    let start = clock_on(day, &request.start, "start time")?;
    let end = clock_on(day, &request.end, "end time")?;
    ensure_window(start, end)?;

    let active: Vec<&Task> = tasks.iter().filter(|t| is_active(t)).collect();
    let scheduler = (request.prefer_pomodoro && active.iter().any(|t| t.pomodoro))
        .then_some(SchedulerKind::Pomodoro(request.pomodoro));

    let planner = planner_for_mode(
        &request.mode,
        request.energy_level,
        scheduler,
        request.recovery_interval,
    )?;

    if active.is_empty() {
        debug!(total = tasks.len(), "no active tasks; empty plan");
        return Ok(Vec::new());
    }

    planner.generate(active, start, end)
}
