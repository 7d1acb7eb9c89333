#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleTimer,
    ConfigReloaded,
    ConfigReloadFailed(String), // error

    // === PROMPTS ===
    PromptActivityTime,
    PromptBreakTime,
    PromptInterruptingTime,
    PromptMinBreakTime,
    PromptMinRate,
    PromptWindowTime,
    PromptCheckInterval,
    PromptKeyFeedback,
    ValueMustBePositive,
    ValueMustBeNonNegative,

    // === MONITOR MESSAGES ===
    MonitorStarted {
        activity_time: u64,
        break_time: u64,
        check_interval: u64,
    },
    MonitorExitedNormally,
    MonitorShuttingDown,
    MonitorError(String),
    MonitorTaskPanicked(String),
    KeyFeedbackEnabled,

    // === BREAK MESSAGES ===
    BreakReminder(String), // remaining break, MM:SS
    BreakEscalated,
    BreakInProgress(String), // remaining break, MM:SS
    BreakCompleted,

    // === WATCHER MESSAGES ===
    WatcherStarted(u32), // PID
    WatcherStopped(u32), // PID
    WatcherNotRunning,
    WatcherNotRunningPidNotFound,
    WatcherStartingForeground,
    WatcherStoppingExisting(String),     // PID
    WatcherFailedToStopExisting(String), // error
    WatcherFailedToStop(u32),            // PID
    WatcherReceivedSigterm,
    WatcherReceivedSigint,
    WatcherReceivedCtrlC,
    WatcherCtrlCListenFailed(String), // error
    WatcherSignalHandlingNotSupported,
    WatcherRunning(u32),    // PID
    WatcherLogFile(String), // path

    // === STATUS MESSAGES ===
    StatusHeader(String), // version

    // === SIMULATION MESSAGES ===
    SimulationHeader { active: u64, idle: u64 },
    SimulationSummary { shown: usize, escalated: usize, hidden: usize },
    SimulationInvalidStep,

    // === SYSTEM ERRORS ===
    InvalidPidFileContent,
    DaemonModeNotSupported,
    FailedToOpenProcess(u32),      // error code
    FailedToTerminateProcess(u32), // error code
    ProcessTerminationNotSupported,
    FailedToGetCurrentExecutable,
    FailedToCreateSigtermHandler,
    FailedToCreateSigintHandler,
}
