//! Task file parsers, one module per on-disk format.

mod csv_tasks;
mod json;
mod markdown;

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use focusforge_core::Task;
use tracing::debug;

use crate::types::TaskFormat;

pub use csv_tasks::{parse_tasks_csv, parse_tasks_csv_reader};
pub use json::parse_tasks_json;
pub use markdown::parse_tasks_markdown;

/// Read a task file, picking the parser from its extension.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    let format = TaskFormat::from_path(path).ok_or_else(|| {
        anyhow!(
            "unsupported task file '{}': expected .json, .csv or .md",
            path.display()
        )
    })?;

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    let tasks = match format {
        TaskFormat::Json => parse_tasks_json(&text),
        TaskFormat::Csv => parse_tasks_csv(&text),
        TaskFormat::Markdown => parse_tasks_markdown(&text),
    }
    .with_context(|| format!("parsing {}", path.display()))?;

    debug!(path = %path.display(), ?format, count = tasks.len(), "loaded tasks");
    Ok(tasks)
}
