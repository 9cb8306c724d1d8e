use anyhow::{Context, Result};
use focusforge_core::{DEFAULT_RECOVERY_INTERVAL, DailyPlanRequest, PomodoroScheduler};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{default_tasks_path, ensure_focusforge_home, expand_user, focusforge_home};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub planner: PlannerSection,
    pub pomodoro: PomodoroSection,
    pub general: GeneralSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSection {
    /// "study", "energy" or "balanced"
    pub mode: String,
    pub energy_level: i32,
    pub start: String,
    pub end: String,
    /// Use pomodoro blocks when any active task asks for them.
    pub prefer_pomodoro: bool,
    pub recovery_interval: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PomodoroSection {
    pub work_minutes: i32,
    pub break_minutes: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSection {
    pub timezone: String,
    /// Defaults to tasks.json in the focusforge home directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks_file: Option<String>,
}

impl Default for PlannerSection {
    fn default() -> Self {
        let req = DailyPlanRequest::default();
        Self {
            mode: req.mode,
            energy_level: req.energy_level,
            start: req.start,
            end: req.end,
            prefer_pomodoro: req.prefer_pomodoro,
            recovery_interval: DEFAULT_RECOVERY_INTERVAL as i64,
        }
    }
}

impl Default for PomodoroSection {
    fn default() -> Self {
        let p = PomodoroScheduler::default();
        Self {
            work_minutes: p.work_minutes,
            break_minutes: p.break_minutes,
        }
    }
}

impl Default for GeneralSection {
    fn default() -> Self {
        Self {
            timezone: "America/Chicago".to_string(),
            tasks_file: None,
        }
    }
}

impl Config {
    pub fn plan_request(&self) -> DailyPlanRequest {
        DailyPlanRequest {
            mode: self.planner.mode.clone(),
            energy_level: self.planner.energy_level,
            start: self.planner.start.clone(),
            end: self.planner.end.clone(),
            prefer_pomodoro: self.planner.prefer_pomodoro,
            pomodoro: PomodoroScheduler::new(
                self.pomodoro.work_minutes,
                self.pomodoro.break_minutes,
            ),
            recovery_interval: Some(self.planner.recovery_interval),
        }
    }

    pub fn tasks_path(&self) -> Result<PathBuf> {
        match &self.general.tasks_file {
            Some(p) => expand_user(p),
            None => default_tasks_path(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(focusforge_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    ensure_focusforge_home()?;
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let p = config_path()?;
    let cfg = load_config_from(&p)?;
    let source = if p.exists() { "file" } else { "defaults" };
    println!("# {} ({})", p.display(), source);
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}
