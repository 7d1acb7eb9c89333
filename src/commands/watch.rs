//! Activity watcher command.
//!
//! By default the watcher is started as a detached background process. Use
//! `--foreground` to keep it attached to the terminal and `--stop` to end a
//! background watcher.

use crate::libs::daemon::{self, WatchMode};
use crate::libs::messages::Message;
use crate::msg_info;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Run in the current terminal instead of the background
    #[arg(long, short)]
    foreground: bool,

    /// Stop the background watcher
    #[arg(long, conflicts_with = "foreground")]
    stop: bool,
}

pub async fn cmd(args: WatchArgs) -> Result<()> {
    if args.stop {
        return daemon::stop();
    }

    if args.foreground {
        msg_info!(Message::WatcherStartingForeground);
        return daemon::run_with_signal_handling(WatchMode::Foreground).await;
    }

    daemon::spawn()
}
