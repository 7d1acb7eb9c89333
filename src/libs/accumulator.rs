//! Break debt accumulation.
//!
//! The accumulator keeps one scalar, the break debt, anchored at discrete
//! activity transitions:
//!
//! ```text
//!   activity mark moved by delta > 1s since the anchor
//!        │
//!        ├─ delta <  min break  → growth: debt += delta * break_time / activity_time
//!        │                         (1:1 once the debt is beyond break_time)
//!        └─ delta >= min break  → decay:  debt = max(0, min(debt, break_time) - delta)
//! ```
//!
//! Between transitions the debt shown to the user is a projection that decays
//! 1:1 from the anchor, so the countdown keeps moving while the user is away.

use crate::libs::config::TimerConfig;
use chrono::{Duration, NaiveDateTime};

/// Snapshot published once per tick for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityState {
    /// Anchor of the last committed growth or decay step.
    pub time_start: NaiveDateTime,
    /// Debt committed at the anchor.
    pub break_time: Duration,
    /// Debt projected to the current instant, assuming idleness since the anchor.
    pub next_break_time: Duration,
}

/// Applies one growth (`increment`) or decay step to `prev`.
///
/// Growth accrues at `break_time : activity_time`. If the accrued value would
/// pass `break_time`, the part beyond it is converted back to real time, so
/// debt beyond the target grows 1:1 with work; debt that is already beyond
/// the target simply adds `delta`.
///
/// Decay is exhausted from the nominal range first: the debt is capped at
/// `break_time` before `delta` is subtracted, and the result never drops
/// below zero.
pub fn calculate_break_time(prev: Duration, delta: Duration, increment: bool, config: &TimerConfig) -> Duration {
    let break_time = config.break_time();

    if !increment {
        return (prev.min(break_time) - delta).max(Duration::zero());
    }

    if prev > break_time {
        return prev + delta;
    }

    let break_ms = break_time.num_milliseconds() as i128;
    let activity_ms = config.activity_time().num_milliseconds() as i128;
    let raw_ms = prev.num_milliseconds() as i128 + delta.num_milliseconds() as i128 * break_ms / activity_ms;

    if raw_ms > break_ms {
        let excess_ms = (raw_ms - break_ms) * activity_ms / break_ms;
        break_time + Duration::milliseconds(excess_ms as i64)
    } else {
        Duration::milliseconds(raw_ms as i64)
    }
}

#[derive(Debug, Clone)]
pub struct BreakAccumulator {
    config: TimerConfig,
    prev_activity_date: NaiveDateTime,
    prev_break_time: Duration,
}

impl BreakAccumulator {
    /// Minimum anchor movement, in milliseconds, treated as a new activity transition.
    pub const TRANSITION_THRESHOLD_MS: i64 = 1000;

    pub fn new(config: &TimerConfig, now: NaiveDateTime) -> Self {
        Self {
            config: config.clone(),
            prev_activity_date: now,
            prev_break_time: Duration::zero(),
        }
    }

    /// Minimum inactivity that counts as a break.
    ///
    /// While the reminder is visible, a full `break_time` of absence is
    /// always enough even if `min_break_time` is configured longer.
    pub fn min_break_time_effective(&self, reminder_visible: bool) -> Duration {
        self.config.min_break_time_effective(reminder_visible)
    }

    /// Commits a step if the activity mark moved, then projects the debt to `now`.
    pub fn evaluate(&mut self, now: NaiveDateTime, last_activity_date: NaiveDateTime, reminder_visible: bool) -> ActivityState {
        let delta = last_activity_date - self.prev_activity_date;

        if delta > Duration::milliseconds(Self::TRANSITION_THRESHOLD_MS) {
            let increment = delta < self.min_break_time_effective(reminder_visible);
            let result = calculate_break_time(self.prev_break_time, delta, increment, &self.config);
            tracing::trace!(
                delta_ms = delta.num_milliseconds(),
                increment,
                debt_ms = result.num_milliseconds(),
                "break debt step"
            );
            self.prev_break_time = result;
            self.prev_activity_date = last_activity_date;
        }

        let elapsed = (now - self.prev_activity_date).max(Duration::zero());
        ActivityState {
            time_start: self.prev_activity_date,
            break_time: self.prev_break_time,
            next_break_time: calculate_break_time(self.prev_break_time, elapsed, false, &self.config),
        }
    }

    /// Drops the debt to zero after the user took the break.
    pub fn acknowledge_break(&mut self) {
        self.prev_break_time = Duration::zero();
    }

    /// Re-anchors at `now` with no debt.
    pub fn reset(&mut self, now: NaiveDateTime) {
        self.prev_activity_date = now;
        self.prev_break_time = Duration::zero();
    }

    pub fn prev_break_time(&self) -> Duration {
        self.prev_break_time
    }

    pub fn prev_activity_date(&self) -> NaiveDateTime {
        self.prev_activity_date
    }
}
