//! Errors raised while configuring or running a planner.

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The window is empty or inverted.
    #[error("end time must be after start time (window {start} .. {end})")]
    InvalidWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("unknown planner mode '{0}'. Use 'study', 'energy', or 'balanced'.")]
    UnknownMode(String),

    #[error("invalid {label} '{value}': expected HH:MM")]
    InvalidTime { label: String, value: String },
}

pub type PlanResult<T> = std::result::Result<T, PlanError>;

/// Reject windows where `end <= start`.
pub fn ensure_window(start: NaiveDateTime, end: NaiveDateTime) -> PlanResult<()> {
    if end <= start {
        return Err(PlanError::InvalidWindow { start, end });
    }
    Ok(())
}
