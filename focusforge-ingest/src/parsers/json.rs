//! JSON task files: a top-level array of objects.
//!
//!   [{"name": "Study MDS", "duration": 90, "category": "study", "pomodoro": true}]
//!
//! Entries that are not objects or have no name are skipped. Missing or malformed
//! optional fields fall back to defaults; a wrong top-level shape is an error.

use anyhow::{Context, Result, bail};
use focusforge_core::Task;
use serde_json::{Map, Value};
use tracing::debug;

use crate::types::{
    DEFAULT_FILE_DURATION, lenient_bool, lenient_date, lenient_int, normalize_category, to_i32,
};

pub fn parse_tasks_json(text: &str) -> Result<Vec<Task>> {
    let raw: Value = serde_json::from_str(text).context("parsing task JSON")?;
    let Value::Array(items) = raw else {
        bail!("task file must contain a JSON list");
    };

    let mut out = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        let Value::Object(obj) = item else {
            debug!(idx, "skipping non-object task entry");
            continue;
        };
        match task_from_object(obj) {
            Some(task) => out.push(task),
            None => debug!(idx, "skipping task entry without a name"),
        }
    }

    Ok(out)
}

fn task_from_object(obj: &Map<String, Value>) -> Option<Task> {
    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())?;

    let mut task = Task::new(
        name,
        int_field(obj, "duration").unwrap_or(DEFAULT_FILE_DURATION),
    );

    task.category = obj
        .get("category")
        .and_then(Value::as_str)
        .and_then(normalize_category);
    task.difficulty = int_field(obj, "difficulty");
    task.priority = int_field(obj, "priority");
    task.deadline = obj.get("deadline").and_then(Value::as_str).and_then(lenient_date);
    task.must_do_today = bool_field(obj, "must_do_today");
    task.completed = bool_field(obj, "completed");
    task.pomodoro = bool_field(obj, "pomodoro");
    task.planned_distractions = int_field(obj, "planned_distractions")
        .and_then(|n| u32::try_from(n).ok());
    task.notes = obj
        .get("notes")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(task)
}

fn int_field(obj: &Map<String, Value>, key: &str) -> Option<i32> {
    let n = match obj.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => lenient_int(s),
        _ => None,
    };
    n.and_then(to_i32)
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> bool {
    match obj.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => lenient_bool(s),
        Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
        _ => false,
    }
}
