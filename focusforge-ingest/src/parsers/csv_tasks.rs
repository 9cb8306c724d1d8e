//! CSV task files with a header row.
//!
//!   name,duration,category,difficulty,priority,deadline,must_do_today,completed,pomodoro
//!   Study MDS,90,study,4,2,2026-10-20,false,false,true
//!
//! Columns may come in any order and only `name` is required. Unknown columns are
//! ignored; rows without a name are skipped.

use std::collections::HashMap;
use std::io::Read;

use anyhow::{Context, Result, bail};
use focusforge_core::Task;
use tracing::debug;

use crate::types::{
    DEFAULT_FILE_DURATION, lenient_bool, lenient_date, lenient_int, normalize_category, to_i32,
};

pub fn parse_tasks_csv(text: &str) -> Result<Vec<Task>> {
    parse_tasks_csv_reader(text.as_bytes())
}

pub fn parse_tasks_csv_reader<R: Read>(reader: R) -> Result<Vec<Task>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: HashMap<String, usize> = rdr
        .headers()
        .context("reading CSV header")?
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_ascii_lowercase(), i))
        .collect();

    if !columns.contains_key("name") {
        bail!("task CSV needs a 'name' column");
    }

    let mut out = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("reading CSV row {}", row + 2))?;
        let field = |key: &str| {
            columns
                .get(key)
                .and_then(|&i| record.get(i))
                .filter(|s| !s.is_empty())
        };

        let Some(name) = field("name") else {
            debug!(row = row + 2, "skipping CSV row without a name");
            continue;
        };

        let int = |key: &str| field(key).and_then(lenient_int).and_then(to_i32);
        let flag = |key: &str| field(key).is_some_and(lenient_bool);

        let mut task = Task::new(name, int("duration").unwrap_or(DEFAULT_FILE_DURATION));
        task.category = field("category").and_then(normalize_category);
        task.difficulty = int("difficulty");
        task.priority = int("priority");
        task.deadline = field("deadline").and_then(lenient_date);
        task.must_do_today = flag("must_do_today");
        task.completed = flag("completed");
        task.pomodoro = flag("pomodoro");
        task.planned_distractions = int("planned_distractions").and_then(|n| u32::try_from(n).ok());
        task.notes = field("notes").unwrap_or_default().to_string();

        out.push(task);
    }

    Ok(out)
}
