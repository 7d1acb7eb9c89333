//! Activity-rate sampler.
//!
//! The monitor turns the raw "time since last input" signal into a sticky
//! high-water mark, [`ActivityMonitor::last_activity_date`], marking the most
//! recent moment the user was confidently working.
//!
//! Every check interval the idle time is converted into the timestamp of the
//! last real input event. Fresh input timestamps are queued; the share of the
//! trailing window covered by queued samples is the *activity rate*. Only when
//! the rate computed from history (before the new sample is queued) exceeds
//! `min_rate` does the new input move the activity mark forward, so a single
//! stray mouse nudge after a long absence does not count as work.

use crate::libs::config::TimerConfig;
use crate::libs::idle::IdleTimeSource;
use chrono::{Duration, NaiveDateTime};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct ActivityMonitor {
    check_interval: Duration,
    window_time: Duration,
    min_rate: f64,
    samples: VecDeque<NaiveDateTime>,
    last_activity_date: NaiveDateTime,
    prev_input_date: NaiveDateTime,
    rate: f64,
}

impl ActivityMonitor {
    /// Creates a monitor that treats `now` as the last activity.
    pub fn new(config: &TimerConfig, now: NaiveDateTime) -> Self {
        Self {
            check_interval: config.check_interval(),
            window_time: config.window_time(),
            min_rate: config.min_rate,
            samples: VecDeque::new(),
            last_activity_date: now,
            prev_input_date: now,
            rate: 0.0,
        }
    }

    /// Samples `idle` and updates the activity mark.
    ///
    /// A query failure is treated as zero idle time: the user looks active,
    /// which can delay a reminder but never forces one. Idle times are
    /// clamped to `[0, window_time + 1 day]`; anything longer means the same.
    pub fn tick(&mut self, now: NaiveDateTime, idle: &dyn IdleTimeSource) {
        let max_idle_time = self.window_time + Duration::days(1);
        let idle_time = match idle.idle_time() {
            Ok(idle_time) => idle_time.clamp(Duration::zero(), max_idle_time),
            Err(e) => {
                tracing::warn!(error = %e, "idle time query failed, assuming user is active");
                Duration::zero()
            }
        };
        self.record_input(now, now - idle_time);
    }

    /// Processes one inferred input timestamp.
    ///
    /// Samples closer than one check interval to the previous one are
    /// duplicates of an input already seen and are ignored.
    pub fn record_input(&mut self, now: NaiveDateTime, input_date: NaiveDateTime) {
        if input_date - self.prev_input_date < self.check_interval {
            return;
        }
        self.prev_input_date = input_date;

        let window_start = now - self.window_time;
        while self.samples.front().is_some_and(|sample| *sample < window_start) {
            self.samples.pop_front();
        }

        self.rate = self.samples.len() as f64 * self.check_interval.num_milliseconds() as f64
            / self.window_time.num_milliseconds() as f64;
        self.samples.push_back(input_date);

        if self.rate > self.min_rate {
            self.last_activity_date = input_date;
        }
    }

    /// Most recent confidently-active timestamp.
    pub fn last_activity_date(&self) -> NaiveDateTime {
        self.last_activity_date
    }

    /// Activity rate computed for the last processed sample.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Number of samples currently inside the window.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Forgets all history and treats `now` as the last activity.
    pub fn reset(&mut self, now: NaiveDateTime) {
        self.samples.clear();
        self.last_activity_date = now;
        self.prev_input_date = now;
        self.rate = 0.0;
    }
}
