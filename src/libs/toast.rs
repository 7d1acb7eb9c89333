//! Presentation of reminders.
//!
//! [`Toast`] is a message with an optional close countdown derived from an
//! explicit target timestamp. [`ConsoleSink`] turns engine frames into
//! terminal output, [`ReminderLog`] into lines of a log file.

use crate::libs::engine::{Frame, PresentationSink};
use crate::libs::formatter::format_countdown;
use crate::libs::messages::Message;
use crate::libs::policy::Urgency;
use crate::{msg_info, msg_success, msg_warning};
use anyhow::Result;
use chrono::{Duration, Local, NaiveDateTime};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    close_at: Option<NaiveDateTime>,
}

impl Toast {
    /// A toast that stays until closed explicitly.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            close_at: None,
        }
    }

    /// Sets the toast to close `after` from `now`.
    pub fn close_after(mut self, after: Duration, now: NaiveDateTime) -> Self {
        self.close_at = Some(now + after);
        self
    }

    pub fn close_at(&self) -> Option<NaiveDateTime> {
        self.close_at
    }

    /// Time left before the toast closes, never negative.
    pub fn close_remaining(&self, now: NaiveDateTime) -> Option<Duration> {
        self.close_at.map(|close_at| (close_at - now).max(Duration::zero()))
    }

    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.close_remaining(now).is_some_and(|remaining| remaining <= Duration::zero())
    }

    /// The message followed by the countdown, e.g. `Stretch (00:42)`.
    pub fn display_message(&self, now: NaiveDateTime) -> String {
        match self.close_remaining(now) {
            Some(remaining) => format!("{} ({})", self.message, format_countdown(&remaining)),
            None => self.message.clone(),
        }
    }
}

/// Turns frames into reminder notices, one per transition.
///
/// Only edges produce notices (shown, escalated, on break, hidden), so a
/// sink called ten times a second does not repeat itself.
#[derive(Debug, Default)]
struct ReminderEdges {
    last_urgency: Option<Urgency>,
}

impl ReminderEdges {
    fn notices(&mut self, frame: &Frame) -> Vec<Message> {
        let directives = &frame.directives;
        let mut notices = Vec::new();

        if directives.shown {
            notices.push(Message::BreakReminder(directives.message.clone()));
        }
        if directives.escalation_started {
            notices.push(Message::BreakEscalated);
        }
        if directives.visible && directives.urgency == Urgency::OnBreak && self.last_urgency != Some(Urgency::OnBreak) {
            notices.push(Message::BreakInProgress(directives.message.clone()));
        }
        if directives.hidden {
            notices.push(Message::BreakCompleted);
        }

        self.last_urgency = Some(directives.urgency);
        notices
    }
}

/// Prints reminder transitions to the terminal.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    edges: ReminderEdges,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresentationSink for ConsoleSink {
    fn present(&mut self, frame: &Frame) {
        for notice in self.edges.notices(frame) {
            match notice {
                Message::BreakInProgress(_) => msg_info!(notice),
                Message::BreakCompleted => msg_success!(notice),
                _ => msg_warning!(notice),
            }
        }
    }
}

/// Appends reminder transitions, with a timestamp, to a log file.
///
/// Used by the detached watcher, which has no terminal to print to.
#[derive(Debug)]
pub struct ReminderLog {
    path: PathBuf,
    file: File,
    edges: ReminderEdges,
}

impl ReminderLog {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file,
            edges: ReminderEdges::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PresentationSink for ReminderLog {
    fn present(&mut self, frame: &Frame) {
        for notice in self.edges.notices(frame) {
            let line = format!("{} {}", Local::now().format("%Y-%m-%d %H:%M:%S"), notice);
            if let Err(e) = writeln!(self.file, "{}", line).and_then(|_| self.file.flush()) {
                tracing::warn!(error = %e, path = %self.path.display(), "failed to write reminder log");
            }
        }
    }
}
