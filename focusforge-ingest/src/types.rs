use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Duration given to file entries that do not state one.
pub const DEFAULT_FILE_DURATION: i32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskFormat {
    Json,
    Csv,
    Markdown,
}

impl TaskFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(TaskFormat::Json),
            "csv" => Some(TaskFormat::Csv),
            "md" | "markdown" => Some(TaskFormat::Markdown),
            _ => None,
        }
    }
}

/// Integer from loosely formatted text: "30", " 30 ", "30.0". Anything else is `None`.
pub(crate) fn lenient_int(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}

pub(crate) fn lenient_bool(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1" | "x"
    )
}

/// "YYYY-MM-DD"; anything else means no deadline.
pub(crate) fn lenient_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Categories compare lowercase, whatever the file says ("Recovery" is "recovery").
pub(crate) fn normalize_category(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_lowercase())
}

pub(crate) fn to_i32(n: i64) -> Option<i32> {
    i32::try_from(n).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(TaskFormat::from_path(Path::new("tasks.json")), Some(TaskFormat::Json));
        assert_eq!(TaskFormat::from_path(Path::new("a/b/TASKS.CSV")), Some(TaskFormat::Csv));
        assert_eq!(TaskFormat::from_path(Path::new("today.md")), Some(TaskFormat::Markdown));
        assert_eq!(TaskFormat::from_path(Path::new("tasks.txt")), None);
        assert_eq!(TaskFormat::from_path(Path::new("tasks")), None);
    }

    #[test]
    fn lenient_scalars() {
        assert_eq!(lenient_int(" 45 "), Some(45));
        assert_eq!(lenient_int("45.9"), Some(45));
        assert_eq!(lenient_int("forty"), None);
        assert!(lenient_bool("Yes"));
        assert!(lenient_bool("x"));
        assert!(!lenient_bool(""));
        assert!(!lenient_bool("nope"));
        assert_eq!(lenient_date("2026-10-20"), NaiveDate::from_ymd_opt(2026, 10, 20));
        assert_eq!(lenient_date("20/10/2026"), None);
        assert_eq!(normalize_category(" Recovery "), Some("recovery".to_string()));
        assert_eq!(normalize_category("  "), None);
    }
}
