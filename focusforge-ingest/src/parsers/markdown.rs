//! Markdown checklist task files.
//!
//!   - [ ] Study MDS 1h30m #study d4 p2 due:2026-10-20 @pomodoro
//!   - [x] Email admin 20m #admin
//!   * [ ] Submit form 15m !today
//!
//! Recognized tokens may appear anywhere after the checkbox; every other word is part of
//! the title. Lines that are not checklist items are ignored.

use anyhow::Result;
use focusforge_core::Task;
use regex::Regex;
use tracing::trace;

use crate::types::{DEFAULT_FILE_DURATION, lenient_date, normalize_category};

pub fn parse_tasks_markdown(text: &str) -> Result<Vec<Task>> {
    let item_re = Regex::new(r"^\s*[-*+]\s+\[(?P<mark>[ xX])\]\s+(?P<body>.+?)\s*$")?;
    // 45m, 2h, 1h30m
    let duration_re = Regex::new(r"^(?:(?P<h>\d+)h)?(?:(?P<m>\d+)m(?:in)?)?$")?;
    let level_re = Regex::new(r"^(?P<kind>[dp])(?P<n>\d)$")?;

    let mut out = Vec::new();

    for line in text.lines() {
        let Some(caps) = item_re.captures(line) else {
            continue;
        };

        let mut title: Vec<&str> = Vec::new();
        let mut duration = None;
        let mut category = None;
        let mut difficulty = None;
        let mut priority = None;
        let mut deadline = None;
        let mut must_do_today = false;
        let mut pomodoro = false;

        for word in caps["body"].split_whitespace() {
            if let Some(cat) = word.strip_prefix('#').and_then(normalize_category) {
                category = Some(cat);
            } else if let Some(date) = word.strip_prefix("due:") {
                deadline = lenient_date(date);
            } else if word.eq_ignore_ascii_case("!today") {
                must_do_today = true;
            } else if word.eq_ignore_ascii_case("@pomodoro") {
                pomodoro = true;
            } else if let Some(level) = level_re.captures(word) {
                let n: i32 = level["n"].parse()?;
                match &level["kind"] {
                    "d" => difficulty = Some(n),
                    _ => priority = Some(n),
                }
            } else if let Some(mins) = parse_duration(&duration_re, word) {
                duration = Some(mins);
            } else {
                title.push(word);
            }
        }

        if title.is_empty() {
            trace!(line, "checklist item has no title");
            continue;
        }

        let mut task = Task::new(title.join(" "), duration.unwrap_or(DEFAULT_FILE_DURATION));
        task.category = category;
        task.difficulty = difficulty;
        task.priority = priority;
        task.deadline = deadline;
        task.must_do_today = must_do_today;
        task.completed = !caps["mark"].trim().is_empty();
        task.pomodoro = pomodoro;

        out.push(task);
    }

    Ok(out)
}

fn parse_duration(re: &Regex, word: &str) -> Option<i32> {
    let caps = re.captures(word)?;
    if caps.name("h").is_none() && caps.name("m").is_none() {
        return None;
    }
    let hours: i32 = caps.name("h").map_or(Ok(0), |h| h.as_str().parse()).ok()?;
    let minutes: i32 = caps.name("m").map_or(Ok(0), |m| m.as_str().parse()).ok()?;
    hours.checked_mul(60)?.checked_add(minutes)
}
