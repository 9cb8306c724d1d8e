use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Args;
use focusforge_core::time::today_in;
use focusforge_core::{
    DailyPlanRequest, DeadlinePriority, PlannedBlock, PriorityStrategy, Task, generate_daily_plan,
    is_active, normalize_energy_level,
};
use focusforge_ingest::load_tasks;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{Config, load_config};

#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// Task file (.json, .csv or .md). Defaults to general.tasks_file
    #[arg(long)]
    pub tasks: Option<PathBuf>,

    /// Planner mode: study, energy or balanced
    #[arg(long)]
    pub mode: Option<String>,

    /// Energy level 1-5 (used by energy mode)
    #[arg(long)]
    pub energy: Option<String>,

    /// Day start, HH:MM
    #[arg(long)]
    pub start: Option<String>,

    /// Day end, HH:MM
    #[arg(long)]
    pub end: Option<String>,

    /// Never split tasks into pomodoro blocks
    #[arg(long, default_value_t = false)]
    pub no_pomodoro: bool,

    /// Plan this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Print the plan as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl PlanArgs {
    /// Command-line flags win over config values.
    pub fn apply(&self, mut req: DailyPlanRequest) -> DailyPlanRequest {
        if let Some(mode) = &self.mode {
            req.mode = mode.clone();
        }
        if self.energy.is_some() {
            req.energy_level = normalize_energy_level(self.energy.as_deref());
        }
        if let Some(start) = &self.start {
            req.start = start.clone();
        }
        if let Some(end) = &self.end {
            req.end = end.clone();
        }
        if self.no_pomodoro {
            req.prefer_pomodoro = false;
        }
        req
    }
}

pub fn run_plan(args: &PlanArgs) -> Result<()> {
    let cfg = load_config()?;
    let tasks = read_tasks(&cfg, args.tasks.as_deref())?;
    let day = match args.date {
        Some(d) => d,
        None => today_in(&cfg.general.timezone)?,
    };

    let req = args.apply(cfg.plan_request());
    debug!(?req, %day, "planning");

    let blocks = generate_daily_plan(&tasks, &req, day)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&blocks)?);
    } else {
        print!("{}", render_plan(&blocks, day));
    }

    let missed = unplaced(&tasks, &blocks);
    if !missed.is_empty() {
        eprintln!("{} active task(s) did not fit:", missed.len());
        for t in missed {
            eprintln!("  - {} ({}m)", t.name, t.duration);
        }
    }

    Ok(())
}

pub fn run_tasks(tasks_path: Option<&Path>) -> Result<()> {
    let cfg = load_config()?;
    let tasks = read_tasks(&cfg, tasks_path)?;
    let today = today_in(&cfg.general.timezone)?;
    print!("{}", render_task_list(&tasks, today));
    Ok(())
}

fn read_tasks(cfg: &Config, explicit: Option<&Path>) -> Result<Vec<Task>> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => cfg.tasks_path()?,
    };
    if !path.exists() {
        bail!(
            "Task file not found: {} (pass --tasks <path> or set general.tasks_file)",
            path.display()
        );
    }
    load_tasks(&path).with_context(|| format!("loading {}", path.display()))
}

pub fn render_plan(blocks: &[PlannedBlock<'_>], day: NaiveDate) -> String {
    let mut out = format!("# Plan for {}\n\n", day.format("%A %Y-%m-%d"));
    if blocks.is_empty() {
        out.push_str("Nothing to schedule.\n");
        return out;
    }
    for b in blocks {
        out.push_str(&b.to_string());
        out.push('\n');
    }
    let minutes: i64 = blocks.iter().map(PlannedBlock::duration_minutes).sum();
    out.push_str(&format!(
        "\n{} block(s), {}h{:02}m of work\n",
        blocks.len(),
        minutes / 60,
        minutes % 60
    ));
    out
}

/// Active tasks that got no block at all.
pub fn unplaced<'a>(tasks: &'a [Task], blocks: &[PlannedBlock<'_>]) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| is_active(t))
        .filter(|t| !blocks.iter().any(|b| std::ptr::eq(b.task, *t)))
        .collect()
}

pub fn render_task_list(tasks: &[Task], today: NaiveDate) -> String {
    let mut out = String::new();
    for t in tasks {
        let mark = if t.completed { "x" } else { " " };
        let score = DeadlinePriority.score(t, today);
        out.push_str(&format!("[{mark}] {score:>6.2}  {:>4}m  {}", t.duration, t.name));
        if let Some(cat) = t.category() {
            out.push_str(&format!("  #{cat}"));
        }
        if let Some(d) = t.deadline {
            out.push_str(&format!("  due:{d}"));
        }
        if t.must_do_today {
            out.push_str("  !today");
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "\n{} task(s), {} active\n",
        tasks.len(),
        tasks.iter().filter(|t| is_active(t)).count()
    ));
    out
}
