//! Background watcher process management.
//!
//! Handles starting, stopping and signal handling of the break timer when it
//! runs detached from the terminal, and builds the production pipeline used
//! by both modes. In the foreground reminders are printed and ring the
//! terminal bell; in the background they are appended to [`LOG_FILE`].

use crate::libs::alert::{Alert, SilentAlert, TerminalBell};
use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use crate::libs::engine::{self, ConfigWatcher, Engine, EngineClock, PresentationSink};
use crate::libs::idle::InputHook;
use crate::libs::key_feedback::KeyFeedback;
use crate::libs::messages::Message;
use crate::libs::toast::{ConsoleSink, ReminderLog};
use crate::{msg_bail_anyhow, msg_error, msg_error_anyhow, msg_info, msg_warning};
use anyhow::Result;
use std::fs::OpenOptions;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

const PID_FILE: &str = "worktimer-watch.pid";
/// Reminder log written by the background watcher, next to the configuration.
pub const LOG_FILE: &str = "worktimer.log";

/// Where the watcher presents reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchMode {
    /// Attached to a terminal: console messages and the terminal bell.
    Foreground,
    /// Detached: reminders go to [`LOG_FILE`], alerts are silent.
    Background,
}

/// Builds the presentation sink and alert for `mode`.
pub fn presentation(mode: WatchMode) -> Result<(Box<dyn PresentationSink + Send>, Arc<dyn Alert>)> {
    match mode {
        WatchMode::Foreground => Ok((Box::new(ConsoleSink::new()), Arc::new(TerminalBell))),
        WatchMode::Background => {
            let log = ReminderLog::open(DataStorage::new().get_path(LOG_FILE)?)?;
            Ok((Box::new(log), Arc::new(SilentAlert)))
        }
    }
}

/// Runs the break timer until SIGTERM, SIGINT or Ctrl+C.
pub async fn run_with_signal_handling(mode: WatchMode) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate()).map_err(|_| msg_error_anyhow!(Message::FailedToCreateSigtermHandler))?;
        let mut sigint = signal(SignalKind::interrupt()).map_err(|_| msg_error_anyhow!(Message::FailedToCreateSigintHandler))?;

        tokio::spawn(async move {
            tokio::select! {
                _ = sigterm.recv() => {
                    msg_info!(Message::WatcherReceivedSigterm);
                }
                _ = sigint.recv() => {
                    msg_info!(Message::WatcherReceivedSigint);
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(windows)]
    {
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    msg_info!(Message::WatcherReceivedCtrlC);
                }
                Err(e) => {
                    msg_error!(Message::WatcherCtrlCListenFailed(e.to_string()));
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(not(any(unix, windows)))]
    {
        msg_warning!(Message::WatcherSignalHandlingNotSupported);
        std::mem::forget(shutdown_tx);
    }

    let monitor_handle = tokio::spawn(async move { run_monitor(mode, shutdown_rx).await.map_err(|e| Message::MonitorError(e.to_string())) });

    match monitor_handle.await {
        Ok(Ok(())) => msg_info!(Message::MonitorExitedNormally),
        Ok(Err(e)) => msg_error!(e),
        Err(e) => msg_error!(Message::MonitorTaskPanicked(e.to_string())),
    }

    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    if pid_path.exists() && read_pid().ok() == Some(std::process::id()) {
        let _ = std::fs::remove_file(&pid_path);
    }

    Ok(())
}

/// Wires the input hook, engine and console output together and runs them.
async fn run_monitor(mode: WatchMode, shutdown: oneshot::Receiver<()>) -> Result<()> {
    let timer = Config::read()?.timer_or_default();
    let (mut sink, alert) = presentation(mode)?;
    let hook = InputHook::start();

    let key_feedback = if timer.key_feedback {
        msg_info!(Message::KeyFeedbackEnabled);
        let feedback = KeyFeedback::new(alert.clone());
        Some(tokio::spawn(feedback.consume(hook.subscribe_keys())))
    } else {
        None
    };

    let clock = EngineClock::new();
    let engine = Engine::new(timer, clock.now());
    engine::run(engine, &clock, &hook, &mut sink, alert, Some(ConfigWatcher::new()?), async {
        let _ = shutdown.await;
    })
    .await?;

    if let Some(handle) = key_feedback {
        handle.abort();
    }
    Ok(())
}

/// PID of the background watcher, if one is running.
pub fn running_pid() -> Option<u32> {
    let pid = read_pid().ok()?;
    if process_exists(pid) {
        Some(pid)
    } else {
        None
    }
}

fn read_pid() -> Result<u32> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    let pid_str = std::fs::read_to_string(&pid_path)?;
    pid_str.trim().parse().map_err(|_| msg_error_anyhow!(Message::InvalidPidFileContent))
}

#[cfg(unix)]
fn process_exists(pid: u32) -> bool {
    nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid as i32), None).is_ok()
}

#[cfg(not(unix))]
fn process_exists(_pid: u32) -> bool {
    true
}

/// Starts the watcher as a detached background process.
///
/// A watcher that is already running is stopped first.
pub fn spawn() -> Result<()> {
    if let Some(pid) = running_pid() {
        msg_info!(Message::WatcherStoppingExisting(pid.to_string()));
        if let Err(e) = stop_internal() {
            msg_warning!(Message::WatcherFailedToStopExisting(e.to_string()));
        }
        std::thread::sleep(Duration::from_millis(500));
    }
    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    let _ = std::fs::remove_file(&pid_path);

    // The detached process has no terminal; its own output lands in the reminder log.
    let log_path = DataStorage::new().get_path(LOG_FILE)?;
    let log = OpenOptions::new().create(true).append(true).open(&log_path)?;

    let current_exe = std::env::current_exe().map_err(|_| msg_error_anyhow!(Message::FailedToGetCurrentExecutable))?;
    let mut command = std::process::Command::new(current_exe);
    command
        .arg("--daemon-run")
        .stdin(Stdio::null())
        .stdout(Stdio::from(log.try_clone()?))
        .stderr(Stdio::from(log));

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        // SAFETY: setsid is async-signal-safe and touches no parent state.
        unsafe {
            command.pre_exec(|| {
                nix::unistd::setsid()?;
                Ok(())
            });
        }
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        command.creation_flags(CREATE_NO_WINDOW);
    }

    #[cfg(not(any(unix, windows)))]
    {
        msg_bail_anyhow!(Message::DaemonModeNotSupported);
    }

    let child = command.spawn()?;
    let pid = child.id();
    std::fs::write(pid_path, pid.to_string())?;
    msg_info!(Message::WatcherStarted(pid));
    msg_info!(Message::WatcherLogFile(log_path.display().to_string()));

    Ok(())
}

/// Stops the background watcher; reports when none is running.
pub fn stop() -> Result<()> {
    if running_pid().is_none() {
        let _ = std::fs::remove_file(DataStorage::new().get_path(PID_FILE)?);
        msg_info!(Message::WatcherNotRunning);
        return Ok(());
    }
    stop_internal()
}

fn stop_internal() -> Result<()> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    if !pid_path.exists() {
        msg_bail_anyhow!(Message::WatcherNotRunningPidNotFound);
    }

    let pid = read_pid()?;
    let killed = kill_process(pid)?;
    std::fs::remove_file(pid_path)?;

    if killed {
        msg_info!(Message::WatcherStopped(pid));
        Ok(())
    } else {
        msg_bail_anyhow!(Message::WatcherFailedToStop(pid));
    }
}

#[cfg(unix)]
fn kill_process(pid: u32) -> Result<bool> {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let pid = Pid::from_raw(pid as i32);
    if kill(pid, Signal::SIGTERM).is_err() {
        return Ok(false);
    }

    for _ in 0..10 {
        std::thread::sleep(Duration::from_millis(100));
        if kill(pid, None).is_err() {
            return Ok(true);
        }
    }

    kill(pid, Signal::SIGKILL)?;
    std::thread::sleep(Duration::from_millis(100));
    Ok(true)
}

#[cfg(windows)]
fn kill_process(pid: u32) -> Result<bool> {
    use winapi::um::errhandlingapi::GetLastError;
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::{OpenProcess, TerminateProcess};
    use winapi::um::winnt::PROCESS_TERMINATE;

    // ERROR_INVALID_PARAMETER: no such process
    const ERROR_INVALID_PARAMETER: u32 = 87;

    unsafe {
        let handle = OpenProcess(PROCESS_TERMINATE, 0, pid);
        if handle.is_null() {
            let error = GetLastError();
            if error == ERROR_INVALID_PARAMETER {
                return Ok(false);
            }
            msg_bail_anyhow!(Message::FailedToOpenProcess(error));
        }

        let result = TerminateProcess(handle, 0);
        CloseHandle(handle);

        if result == 0 {
            msg_bail_anyhow!(Message::FailedToTerminateProcess(GetLastError()));
        }
        std::thread::sleep(Duration::from_millis(100));
        Ok(true)
    }
}

#[cfg(not(any(unix, windows)))]
fn kill_process(_pid: u32) -> Result<bool> {
    msg_bail_anyhow!(Message::ProcessTerminationNotSupported);
}
