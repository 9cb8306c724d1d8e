//! focusforge-ingest: lenient task-file loaders (JSON, CSV, markdown checklists).

pub mod parsers;
pub mod types;

pub use parsers::{
    load_tasks, parse_tasks_csv, parse_tasks_csv_reader, parse_tasks_json, parse_tasks_markdown,
};
pub use types::{DEFAULT_FILE_DURATION, TaskFormat};
