//! Shows a reminder in the terminal with a live close countdown.

use crate::libs::toast::Toast;
use anyhow::Result;
use chrono::{Duration, Local};
use clap::Args;
use std::io::Write;
use tokio::time::{self, MissedTickBehavior};

#[derive(Debug, Args)]
pub struct NotifyArgs {
    /// Text of the reminder
    message: String,

    /// Close the reminder after this many seconds
    #[arg(long, short)]
    close_after: Option<u64>,
}

pub async fn cmd(args: NotifyArgs) -> Result<()> {
    let now = Local::now().naive_local();
    let mut toast = Toast::new(args.message);
    if let Some(secs) = args.close_after {
        toast = toast.close_after(Duration::seconds(secs as i64), now);
    }

    if toast.close_at().is_none() {
        println!("{}", toast.display_message(now));
        return Ok(());
    }

    let mut interval = time::interval(std::time::Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut stdout = std::io::stdout();
    loop {
        interval.tick().await;
        let now = Local::now().naive_local();
        write!(stdout, "\r{}", toast.display_message(now))?;
        stdout.flush()?;
        if toast.is_expired(now) {
            break;
        }
    }
    writeln!(stdout)?;

    Ok(())
}
