//! Prints the effective timer settings and whether the watcher runs.

use crate::libs::config::Config;
use crate::libs::daemon;
use crate::libs::data_storage::{DataStorage, APP_VERSION};
use crate::libs::formatter::format_countdown;
use crate::libs::messages::Message;
use crate::{msg_info, msg_print};
use anyhow::Result;
use prettytable::{row, Table};

pub fn cmd() -> Result<()> {
    let timer = Config::read()?.timer_or_default();

    msg_print!(Message::StatusHeader(APP_VERSION.to_string()), true);

    let mut table = Table::new();
    table.add_row(row!["SETTING", "VALUE"]);
    table.add_row(row!["Activity time", format_countdown(&timer.activity_time())]);
    table.add_row(row!["Break time", format_countdown(&timer.break_time())]);
    table.add_row(row!["Interrupting time", format_countdown(&timer.interrupting_time())]);
    table.add_row(row!["Min break time", format_countdown(&timer.min_break_time())]);
    table.add_row(row!["Min rate", format!("{:.2}", timer.min_rate)]);
    table.add_row(row!["Window", format!("{}s", timer.window_time)]);
    table.add_row(row!["Check interval", format!("{}ms", timer.check_interval)]);
    let key_feedback = if timer.key_feedback { "on" } else { "off" };
    table.add_row(row!["Key feedback", key_feedback]);
    table.printstd();

    match daemon::running_pid() {
        Some(pid) => {
            msg_info!(Message::WatcherRunning(pid));
            let log_path = DataStorage::new().get_path(daemon::LOG_FILE)?;
            msg_info!(Message::WatcherLogFile(log_path.display().to_string()));
        }
        None => msg_info!(Message::WatcherNotRunning),
    }

    Ok(())
}
