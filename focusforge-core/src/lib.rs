//! focusforge-core: task scoring, time-block scheduling and daily planning

pub mod block;
pub mod daily_plan;
pub mod error;
pub mod planner;
pub mod priority;
pub mod scheduler;
pub mod task;
pub mod time;

pub use block::PlannedBlock;
pub use daily_plan::{
    DailyPlanRequest, generate_daily_plan, is_active, normalize_energy_level, planner_for_mode,
};
pub use error::{PlanError, PlanResult};
pub use planner::{DEFAULT_RECOVERY_INTERVAL, Planner, PlannerConfig, PlannerMode, sort_by_score};
pub use priority::{
    DeadlinePriority, EnergyAwarePriority, PriorityStrategy, SimplePriority, StrategyKind,
    category_weight, deadline_urgency,
};
pub use scheduler::{PomodoroScheduler, Scheduler, SchedulerKind, SequentialScheduler};
pub use task::{RECOVERY_CATEGORY, Task};
