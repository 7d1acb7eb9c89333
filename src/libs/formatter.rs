//! Time formatting utilities for user-facing output.
//!
//! Countdowns (`MM:SS`) are used for the reminder text, toast countdowns and
//! the status and simulation tables. Minutes are not wrapped at 60, so 75
//! minutes renders as `75:00`. Negative inputs are treated as zero.
//!
//! ## Examples
//!
//! ```rust
//! use worktimer::libs::formatter::format_countdown;
//! use chrono::Duration;
//!
//! assert_eq!(format_countdown(&Duration::seconds(179)), "02:59");
//! ```

use crate::libs::engine::Frame;
use chrono::{Duration, NaiveDateTime};

/// A single engine frame rendered to strings for table output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedFrame {
    /// Wall-clock time of the tick (`HH:MM:SS`).
    pub time: String,
    /// Accumulated debt at the anchor (`MM:SS`).
    pub debt: String,
    /// Debt projected to the tick instant (`MM:SS`).
    pub projected: String,
    /// Reminder text, empty while hidden.
    pub message: String,
    pub urgency: u8,
    pub escalating: bool,
}

impl FormattedFrame {
    pub fn new(now: NaiveDateTime, frame: &Frame) -> Self {
        Self {
            time: now.format("%H:%M:%S").to_string(),
            debt: format_countdown(&frame.state.break_time),
            projected: format_countdown(&frame.state.next_break_time),
            message: if frame.directives.visible {
                frame.directives.message.clone()
            } else {
                String::new()
            },
            urgency: frame.directives.urgency.level(),
            escalating: frame.directives.escalating,
        }
    }
}

/// Formats a duration as `MM:SS`, truncating sub-second precision.
pub fn format_countdown(duration: &Duration) -> String {
    let secs = duration.num_seconds().max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
