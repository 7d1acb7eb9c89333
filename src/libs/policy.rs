//! Reminder policy.
//!
//! Maps the break debt to presentation directives. Visibility and escalation
//! are level states held by the policy; the `shown`, `hidden` and
//! `escalation_started` fields of [`Directives`] are edges that are true for
//! exactly one evaluation, so side effects (alerts, toasts) fire once.

use crate::libs::config::TimerConfig;
use crate::libs::formatter::format_countdown;
use chrono::{Duration, NaiveDateTime};

/// Tolerance below `break_time` at which the reminder already shows.
const SHOW_TOLERANCE_MS: i64 = 1000;

/// Ordinal urgency of the reminder presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Urgency {
    Normal,
    Escalated,
    /// The user has already been away for at least a minimum break.
    OnBreak,
}

impl Urgency {
    pub fn level(self) -> u8 {
        match self {
            Urgency::Normal => 0,
            Urgency::Escalated => 1,
            Urgency::OnBreak => 2,
        }
    }
}

/// Output of one policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directives {
    pub visible: bool,
    /// Remaining break, `MM:SS`.
    pub message: String,
    pub escalating: bool,
    pub urgency: Urgency,
    /// The reminder became visible on this evaluation.
    pub shown: bool,
    /// The reminder was hidden on this evaluation.
    pub hidden: bool,
    /// Escalation rose on this evaluation.
    pub escalation_started: bool,
    /// The break was taken; committed debt must drop to zero.
    pub reset_debt: bool,
}

#[derive(Debug, Clone)]
pub struct NotificationPolicy {
    config: TimerConfig,
    visible: bool,
    escalating: bool,
}

impl NotificationPolicy {
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            config: config.clone(),
            visible: false,
            escalating: false,
        }
    }

    /// Evaluates show, message, hide, escalation and urgency, in that order.
    pub fn evaluate(
        &mut self,
        next_break_time: Duration,
        mut prev_break_time: Duration,
        prev_activity_date: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Directives {
        let break_time = self.config.break_time();

        let mut shown = false;
        if next_break_time >= break_time - Duration::milliseconds(SHOW_TOLERANCE_MS) && !self.visible {
            self.visible = true;
            shown = true;
            tracing::debug!(next_break_ms = next_break_time.num_milliseconds(), "reminder shown");
        }

        let message = format_countdown(&break_time.min(next_break_time));

        let mut hidden = false;
        if next_break_time <= Duration::zero() && self.visible {
            self.visible = false;
            hidden = true;
            prev_break_time = Duration::zero();
            tracing::debug!("reminder hidden, break acknowledged");
        }

        let escalating = prev_break_time >= break_time + self.config.interrupting_time();
        let escalation_started = escalating && !self.escalating;
        if escalation_started {
            tracing::debug!(debt_ms = prev_break_time.num_milliseconds(), "reminder escalated");
        }
        self.escalating = escalating;

        let urgency = if now - prev_activity_date > self.config.min_break_time_effective(self.visible) {
            Urgency::OnBreak
        } else if escalating {
            Urgency::Escalated
        } else {
            Urgency::Normal
        };

        Directives {
            visible: self.visible,
            message,
            escalating,
            urgency,
            shown,
            hidden,
            escalation_started,
            reset_debt: hidden,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_escalating(&self) -> bool {
        self.escalating
    }

    pub fn reset(&mut self) {
        self.visible = false;
        self.escalating = false;
    }
}
