//! Display implementation for worktimer application messages.
//!
//! All user-facing text lives here, in one match over [`Message`]. Keeping
//! the text in one place gives consistent wording across commands and keeps
//! parameter interpolation type-checked.
//!
//! ```rust
//! use worktimer::libs::messages::Message;
//!
//! assert_eq!(Message::BreakReminder("03:00".to_string()).to_string(), "Time for a break! Step away for 03:00");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigNotFound => "No configuration file found, nothing to remove".to_string(),
            Message::ConfigModuleTimer => "Break timer settings".to_string(),
            Message::ConfigReloaded => "Configuration changed, break timer restarted".to_string(),
            Message::ConfigReloadFailed(error) => format!("Ignoring invalid configuration change: {}", error),

            // === PROMPTS ===
            Message::PromptActivityTime => "Seconds of work that earn a full break".to_string(),
            Message::PromptBreakTime => "Break length in seconds".to_string(),
            Message::PromptInterruptingTime => "Seconds of ignored reminder before it escalates".to_string(),
            Message::PromptMinBreakTime => "Seconds away that count as resting".to_string(),
            Message::PromptMinRate => "Activity rate threshold (0.0 - 1.0)".to_string(),
            Message::PromptWindowTime => "Activity window in seconds".to_string(),
            Message::PromptCheckInterval => "Sampling interval in milliseconds".to_string(),
            Message::PromptKeyFeedback => "Click on every key press?".to_string(),
            Message::ValueMustBePositive => "Value must be greater than zero".to_string(),
            Message::ValueMustBeNonNegative => "Value must be a non-negative number".to_string(),

            // === MONITOR MESSAGES ===
            Message::MonitorStarted {
                activity_time,
                break_time,
                check_interval,
            } => format!(
                "Break timer is running: {}s break every {}s of work, sampling every {}ms",
                break_time, activity_time, check_interval
            ),
            Message::MonitorExitedNormally => "Monitor exited normally".to_string(),
            Message::MonitorShuttingDown => "Shutting down monitor...".to_string(),
            Message::MonitorError(error) => format!("Monitor error: {}", error),
            Message::MonitorTaskPanicked(error) => format!("Monitor task panicked: {}", error),
            Message::KeyFeedbackEnabled => "Key press feedback enabled".to_string(),

            // === BREAK MESSAGES ===
            Message::BreakReminder(remaining) => format!("Time for a break! Step away for {}", remaining),
            Message::BreakEscalated => "You have been ignoring the break reminder. Please take a break now!".to_string(),
            Message::BreakInProgress(remaining) => format!("Break in progress, {} to go", remaining),
            Message::BreakCompleted => "Break complete, welcome back".to_string(),

            // === WATCHER MESSAGES ===
            Message::WatcherStarted(pid) => format!("Watcher started in background with PID: {}", pid),
            Message::WatcherStopped(pid) => format!("Watcher with PID {} stopped", pid),
            Message::WatcherNotRunning => "Watcher is not running".to_string(),
            Message::WatcherNotRunningPidNotFound => "Watcher is not running (PID file not found)".to_string(),
            Message::WatcherStartingForeground => "Starting watcher in foreground. Press Ctrl+C to stop.".to_string(),
            Message::WatcherStoppingExisting(pid) => format!("Stopping existing watcher (PID: {})", pid),
            Message::WatcherFailedToStopExisting(error) => format!("Failed to stop existing watcher: {}", error),
            Message::WatcherFailedToStop(pid) => format!("Failed to stop watcher with PID {}", pid),
            Message::WatcherReceivedSigterm => "Received SIGTERM, shutting down...".to_string(),
            Message::WatcherReceivedSigint => "Received SIGINT, shutting down...".to_string(),
            Message::WatcherReceivedCtrlC => "Received Ctrl+C, shutting down...".to_string(),
            Message::WatcherCtrlCListenFailed(error) => format!("Failed to listen for Ctrl+C: {}", error),
            Message::WatcherSignalHandlingNotSupported => "Signal handling is not supported on this platform".to_string(),
            Message::WatcherRunning(pid) => format!("Watcher is running with PID: {}", pid),
            Message::WatcherLogFile(path) => format!("Background reminders are written to {}", path),

            // === STATUS MESSAGES ===
            Message::StatusHeader(version) => format!("worktimer {}", version),

            // === SIMULATION MESSAGES ===
            Message::SimulationHeader { active, idle } => {
                format!("Simulating {} minute(s) of work followed by {} minute(s) away", active, idle)
            }
            Message::SimulationSummary { shown, escalated, hidden } => format!(
                "Reminder shown {} time(s), escalated {} time(s), completed {} break(s)",
                shown, escalated, hidden
            ),
            Message::SimulationInvalidStep => "Report step must be greater than zero".to_string(),

            // === SYSTEM ERRORS ===
            Message::InvalidPidFileContent => "Invalid PID file content".to_string(),
            Message::DaemonModeNotSupported => "Daemon mode is not supported on this platform".to_string(),
            Message::FailedToOpenProcess(code) => format!("Failed to open process, error code: {}", code),
            Message::FailedToTerminateProcess(code) => format!("Failed to terminate process, error code: {}", code),
            Message::ProcessTerminationNotSupported => "Process termination is not supported on this platform".to_string(),
            Message::FailedToGetCurrentExecutable => "Failed to get current executable path".to_string(),
            Message::FailedToCreateSigtermHandler => "Failed to create SIGTERM handler".to_string(),
            Message::FailedToCreateSigintHandler => "Failed to create SIGINT handler".to_string(),
        };
        write!(f, "{}", text)
    }
}
