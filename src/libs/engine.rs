//! Periodic driver of the break timer.
//!
//! One [`Engine::tick`] runs the whole pipeline synchronously:
//!
//! ```text
//! ┌────────────────┐   ┌─────────────────┐   ┌──────────────────┐   ┌────────────────────┐
//! │ IdleTimeSource │──▶│ ActivityMonitor │──▶│ BreakAccumulator │──▶│ NotificationPolicy │──▶ Frame
//! └────────────────┘   └─────────────────┘   └──────────────────┘   └────────────────────┘
//! ```
//!
//! [`run`] calls `tick` on a tokio interval, hands every frame to a
//! [`PresentationSink`] and launches the escalation alert in the background.
//! All engine state is owned by the loop; nothing is shared or locked.

use crate::libs::accumulator::{ActivityState, BreakAccumulator};
use crate::libs::activity::ActivityMonitor;
use crate::libs::alert::{Alert, AlertSequence};
use crate::libs::config::{Config, TimerConfig};
use crate::libs::idle::IdleTimeSource;
use crate::libs::messages::Message;
use crate::libs::policy::{Directives, NotificationPolicy};
use crate::{msg_info, msg_warning};
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::time::{self, Instant, MissedTickBehavior};

/// Everything a sink needs to render one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub state: ActivityState,
    pub directives: Directives,
    pub last_activity_date: NaiveDateTime,
    /// Activity rate of the last processed input sample.
    pub rate: f64,
}

/// Receives one frame per tick.
pub trait PresentationSink {
    fn present(&mut self, frame: &Frame);
}

impl<T: PresentationSink + ?Sized> PresentationSink for Box<T> {
    fn present(&mut self, frame: &Frame) {
        (**self).present(frame);
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: TimerConfig,
    monitor: ActivityMonitor,
    accumulator: BreakAccumulator,
    policy: NotificationPolicy,
}

impl Engine {
    /// Creates an engine anchored at `now` with no debt.
    pub fn new(config: TimerConfig, now: NaiveDateTime) -> Self {
        Self {
            monitor: ActivityMonitor::new(&config, now),
            accumulator: BreakAccumulator::new(&config, now),
            policy: NotificationPolicy::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Runs one sampling and evaluation cycle.
    pub fn tick(&mut self, now: NaiveDateTime, idle: &dyn IdleTimeSource) -> Frame {
        self.monitor.tick(now, idle);
        let last_activity_date = self.monitor.last_activity_date();

        let state = self.accumulator.evaluate(now, last_activity_date, self.policy.is_visible());
        let directives = self
            .policy
            .evaluate(state.next_break_time, state.break_time, state.time_start, now);
        if directives.reset_debt {
            self.accumulator.acknowledge_break();
        }

        tracing::trace!(
            time_start = %state.time_start,
            break_ms = state.break_time.num_milliseconds(),
            next_break_ms = state.next_break_time.num_milliseconds(),
            visible = directives.visible,
            urgency = directives.urgency.level(),
            "tick"
        );

        Frame {
            state,
            directives,
            last_activity_date,
            rate: self.monitor.rate(),
        }
    }

    /// Swaps the configuration and starts over from `now` with zero debt.
    ///
    /// Debt accrued under the old ratio would be meaningless under the new one.
    pub fn reconfigure(&mut self, config: TimerConfig, now: NaiveDateTime) {
        *self = Engine::new(config, now);
        tracing::info!("timer reconfigured, break debt reset");
    }

    /// Drops all history and debt, keeping the configuration.
    pub fn reset(&mut self, now: NaiveDateTime) {
        self.monitor.reset(now);
        self.accumulator.reset(now);
        self.policy.reset();
    }

    pub fn break_debt(&self) -> chrono::Duration {
        self.accumulator.prev_break_time()
    }

    pub fn last_activity_date(&self) -> NaiveDateTime {
        self.monitor.last_activity_date()
    }

    pub fn is_visible(&self) -> bool {
        self.policy.is_visible()
    }

    pub fn is_escalating(&self) -> bool {
        self.policy.is_escalating()
    }
}

/// Detects edits of the configuration file.
#[derive(Debug)]
pub struct ConfigWatcher {
    path: PathBuf,
    modified_at: Option<SystemTime>,
}

impl ConfigWatcher {
    /// Watches the configuration file in the application data directory.
    pub fn new() -> Result<Self> {
        Ok(Self::at(Config::path()?))
    }

    /// Watches `path`, remembering its current modification time as the baseline.
    pub fn at(path: PathBuf) -> Self {
        let modified_at = Config::modified_at_path(&path);
        Self { path, modified_at }
    }

    /// Returns the new timer settings if the file changed and is valid.
    ///
    /// An invalid file is reported once per change and otherwise ignored.
    pub fn poll(&mut self) -> Option<TimerConfig> {
        let modified_at = Config::modified_at_path(&self.path);
        if modified_at == self.modified_at {
            return None;
        }
        self.modified_at = modified_at;

        match Config::read_from(&self.path) {
            Ok(config) => Some(config.timer_or_default()),
            Err(e) => {
                msg_warning!(Message::ConfigReloadFailed(e.to_string()));
                None
            }
        }
    }
}

/// Local wall-clock timestamps that advance with a monotonic clock.
///
/// The start time is read from the wall clock once; every later reading is
/// the start plus the monotonic time elapsed since, so DST changes and NTP
/// steps never move engine time backwards or make it jump.
#[derive(Debug, Clone, Copy)]
pub struct EngineClock {
    start: NaiveDateTime,
    started: Instant,
}

impl EngineClock {
    pub fn new() -> Self {
        Self::starting_at(Local::now().naive_local())
    }

    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            start,
            started: Instant::now(),
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        let elapsed = chrono::Duration::from_std(self.started.elapsed()).unwrap_or_else(|_| chrono::Duration::zero());
        self.start + elapsed
    }
}

impl Default for EngineClock {
    fn default() -> Self {
        Self::new()
    }
}

/// How often the configuration file is checked for changes.
const CONFIG_POLL_INTERVAL: Duration = Duration::from_secs(1);

fn tick_period(config: &TimerConfig) -> Duration {
    Duration::from_millis(config.check_interval.max(1))
}

/// Drives `engine` until `shutdown` resolves.
///
/// Tick timestamps come from `clock`. The escalation alert runs as a
/// background [`AlertSequence`]; a new escalation replaces the previous
/// sequence and shutdown cancels it.
pub async fn run<S, F>(
    mut engine: Engine,
    clock: &EngineClock,
    idle: &dyn IdleTimeSource,
    sink: &mut S,
    alert: Arc<dyn Alert>,
    mut config_watcher: Option<ConfigWatcher>,
    shutdown: F,
) -> Result<Engine>
where
    S: PresentationSink + Send,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    let mut interval = time::interval(tick_period(engine.config()));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut config_poll = time::interval(CONFIG_POLL_INTERVAL);
    config_poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut alert_sequence: Option<AlertSequence> = None;

    msg_info!(Message::MonitorStarted {
        activity_time: engine.config().activity_time,
        break_time: engine.config().break_time,
        check_interval: engine.config().check_interval,
    });

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                msg_info!(Message::MonitorShuttingDown);
                break;
            }
            _ = interval.tick() => {
                let frame = engine.tick(clock.now(), idle);
                if frame.directives.escalation_started {
                    alert_sequence = Some(AlertSequence::escalation(alert.clone()));
                }
                sink.present(&frame);
            }
            _ = config_poll.tick(), if config_watcher.is_some() => {
                let reloaded = config_watcher.as_mut().and_then(ConfigWatcher::poll);
                if let Some(config) = reloaded {
                    if config != *engine.config() {
                        let period_changed = config.check_interval != engine.config().check_interval;
                        engine.reconfigure(config, clock.now());
                        if period_changed {
                            interval = time::interval(tick_period(engine.config()));
                            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                        }
                        msg_info!(Message::ConfigReloaded);
                    }
                }
            }
        }
    }

    if let Some(sequence) = alert_sequence.take() {
        sequence.cancel();
    }

    Ok(engine)
}
