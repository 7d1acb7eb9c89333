//! Configuration management for the worktimer application.
//!
//! The configuration is a small JSON document stored in the platform-specific
//! application data directory (see [`DataStorage`]). It currently holds one
//! module, the break timer settings, which drive the activity sampler, the
//! break debt accumulator and the reminder policy.
//!
//! ## Timer Settings
//!
//! | Field               | Unit         | Meaning                                             |
//! |---------------------|--------------|-----------------------------------------------------|
//! | `activity_time`     | seconds      | Continuous work needed to owe a full break          |
//! | `break_time`        | seconds      | Length of the break the reminder asks for           |
//! | `interrupting_time` | seconds      | Extra debt beyond `break_time` before escalation    |
//! | `min_break_time`    | seconds      | Inactivity that counts as resting instead of noise  |
//! | `min_rate`          | ratio        | Activity rate above which input counts as work      |
//! | `window_time`       | seconds      | Trailing window used for the activity rate          |
//! | `check_interval`    | milliseconds | Sampling period of the idle-time source             |
//! | `key_feedback`      | flag         | Audible click on every key press                    |
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use worktimer::libs::config::Config;
//!
//! let config = Config::read()?;
//! let timer = config.timer_or_default();
//! println!("Break every {} seconds of work", timer.activity_time);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::error::ConfigError;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use chrono::Duration;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Upper bound for every duration setting, in seconds.
pub const MAX_DURATION_SECS: u64 = 24 * 60 * 60;

/// Break timer settings.
///
/// All durations are stored as plain integers so the JSON file stays easy to
/// edit by hand; use the accessor methods to get `chrono::Duration` values.
/// A configuration must pass [`TimerConfig::validate`] before it is handed to
/// the engine.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TimerConfig {
    /// Seconds of sustained activity needed to accrue a full `break_time` of debt.
    pub activity_time: u64,

    /// Seconds of break the reminder asks for.
    ///
    /// Debt accrues at the ratio `break_time : activity_time`, and the
    /// reminder appears once the debt reaches this value.
    pub break_time: u64,

    /// Seconds of debt beyond `break_time` tolerated before the reminder escalates.
    pub interrupting_time: u64,

    /// Seconds of contiguous inactivity required for an absence to pay debt back.
    ///
    /// Shorter gaps are treated as part of continuous work. Expected to be no
    /// larger than `break_time`; while the reminder is visible the smaller of
    /// the two is used.
    pub min_break_time: u64,

    /// Activity rate threshold.
    ///
    /// The rate is the share of the trailing window that contained fresh
    /// input samples. Input only counts as confident activity when the rate
    /// is strictly above this value.
    pub min_rate: f64,

    /// Length of the trailing activity window in seconds.
    pub window_time: u64,

    /// Sampling period in milliseconds.
    pub check_interval: u64,

    /// Plays a short click for every key press while the watcher runs.
    pub key_feedback: bool,
}

impl Default for TimerConfig {
    /// Half an hour of work earns a three minute break; three more minutes of
    /// ignoring the reminder escalate it; two idle minutes count as resting.
    fn default() -> Self {
        TimerConfig {
            activity_time: 30 * 60,
            break_time: 3 * 60,
            interrupting_time: 3 * 60,
            min_break_time: 2 * 60,
            min_rate: 0.1,
            window_time: 30,
            check_interval: 100,
            key_feedback: false,
        }
    }
}

impl TimerConfig {
    pub fn activity_time(&self) -> Duration {
        Duration::seconds(self.activity_time as i64)
    }

    pub fn break_time(&self) -> Duration {
        Duration::seconds(self.break_time as i64)
    }

    pub fn interrupting_time(&self) -> Duration {
        Duration::seconds(self.interrupting_time as i64)
    }

    pub fn min_break_time(&self) -> Duration {
        Duration::seconds(self.min_break_time as i64)
    }

    pub fn window_time(&self) -> Duration {
        Duration::seconds(self.window_time as i64)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::milliseconds(self.check_interval as i64)
    }

    /// Inactivity that counts as a break, given the reminder visibility.
    ///
    /// Once the reminder is showing, an absence of `break_time` is enough
    /// even when `min_break_time` is configured longer.
    pub fn min_break_time_effective(&self, reminder_visible: bool) -> Duration {
        if reminder_visible {
            self.min_break_time().min(self.break_time())
        } else {
            self.min_break_time()
        }
    }

    /// Checks the invariants the timer core relies on.
    ///
    /// Every duration must be positive and at most one day, and `min_rate`
    /// must be a finite, non-negative number. A `min_break_time` larger than `break_time` is
    /// accepted but reported, since the reminder then hides before a full
    /// minimum break has passed.
    ///
    /// # Errors
    ///
    /// Returns the first violated field as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        // (field, value, upper bound in the field's unit)
        let durations = [
            ("activity_time", self.activity_time, MAX_DURATION_SECS),
            ("break_time", self.break_time, MAX_DURATION_SECS),
            ("interrupting_time", self.interrupting_time, MAX_DURATION_SECS),
            ("min_break_time", self.min_break_time, MAX_DURATION_SECS),
            ("window_time", self.window_time, MAX_DURATION_SECS),
            ("check_interval", self.check_interval, MAX_DURATION_SECS * 1000),
        ];
        for &(field, value, max) in &durations {
            if value == 0 {
                return Err(ConfigError::NonPositive { field });
            }
            if value > max {
                return Err(ConfigError::TooLarge { field });
            }
        }

        if !self.min_rate.is_finite() || self.min_rate < 0.0 {
            return Err(ConfigError::InvalidRate(self.min_rate));
        }

        if self.min_break_time > self.break_time {
            tracing::warn!(
                min_break_time = self.min_break_time,
                break_time = self.break_time,
                "min_break_time exceeds break_time"
            );
        }

        Ok(())
    }

    /// Runs the interactive prompts for every timer field, using `self` as defaults.
    pub fn prompt(&self) -> Result<Self> {
        let theme = ColorfulTheme::default();
        let positive = |value: &u64| -> Result<(), String> {
            if *value > 0 {
                Ok(())
            } else {
                Err(Message::ValueMustBePositive.to_string())
            }
        };

        Ok(TimerConfig {
            activity_time: Input::with_theme(&theme)
                .with_prompt(Message::PromptActivityTime.to_string())
                .default(self.activity_time)
                .validate_with(positive)
                .interact_text()?,
            break_time: Input::with_theme(&theme)
                .with_prompt(Message::PromptBreakTime.to_string())
                .default(self.break_time)
                .validate_with(positive)
                .interact_text()?,
            interrupting_time: Input::with_theme(&theme)
                .with_prompt(Message::PromptInterruptingTime.to_string())
                .default(self.interrupting_time)
                .validate_with(positive)
                .interact_text()?,
            min_break_time: Input::with_theme(&theme)
                .with_prompt(Message::PromptMinBreakTime.to_string())
                .default(self.min_break_time)
                .validate_with(positive)
                .interact_text()?,
            min_rate: Input::with_theme(&theme)
                .with_prompt(Message::PromptMinRate.to_string())
                .default(self.min_rate)
                .validate_with(|value: &f64| -> Result<(), String> {
                    if value.is_finite() && *value >= 0.0 {
                        Ok(())
                    } else {
                        Err(Message::ValueMustBeNonNegative.to_string())
                    }
                })
                .interact_text()?,
            window_time: Input::with_theme(&theme)
                .with_prompt(Message::PromptWindowTime.to_string())
                .default(self.window_time)
                .validate_with(positive)
                .interact_text()?,
            check_interval: Input::with_theme(&theme)
                .with_prompt(Message::PromptCheckInterval.to_string())
                .default(self.check_interval)
                .validate_with(positive)
                .interact_text()?,
            key_feedback: dialoguer::Confirm::with_theme(&theme)
                .with_prompt(Message::PromptKeyFeedback.to_string())
                .default(self.key_feedback)
                .interact()?,
        })
    }
}

/// Root configuration container.
///
/// Modules are optional so a missing section falls back to defaults and new
/// sections can be added without breaking existing files.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Break timer settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer: Option<TimerConfig>,
}

impl Config {
    /// Reads and validates the configuration file.
    ///
    /// A missing file yields [`Config::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// contains a timer section that fails [`TimerConfig::validate`].
    pub fn read() -> Result<Config> {
        Self::read_from(&Self::path()?)
    }

    /// Reads and validates the configuration stored at `path`.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        if let Some(timer) = &config.timer {
            timer.validate()?;
        }
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. Returns `false` if there was none.
    pub fn delete() -> Result<bool> {
        let config_file_path = Self::path()?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    /// Location of the configuration file in the application data directory.
    pub fn path() -> Result<PathBuf> {
        DataStorage::new().get_path(CONFIG_FILE_NAME)
    }

    /// Modification time of the configuration file, if it exists.
    ///
    /// The watcher polls this to pick up edits without a restart.
    pub fn modified_at() -> Option<SystemTime> {
        Self::modified_at_path(&Self::path().ok()?)
    }

    pub fn modified_at_path(path: &Path) -> Option<SystemTime> {
        fs::metadata(path).and_then(|meta| meta.modified()).ok()
    }

    /// Timer settings, falling back to defaults when the section is missing.
    pub fn timer_or_default(&self) -> TimerConfig {
        self.timer.clone().unwrap_or_default()
    }

    /// Runs the interactive setup wizard on top of the current configuration.
    ///
    /// An unreadable or invalid existing file is replaced by defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        msg_print!(Message::ConfigModuleTimer);
        let timer = config.timer_or_default().prompt()?;
        timer.validate()?;
        config.timer = Some(timer);

        Ok(config)
    }
}
