//! Command-line interface.
//!
//! Each subcommand lives in its own module exposing an `Args` struct and a
//! `cmd` function.

pub mod init;
pub mod notify;
pub mod simulate;
pub mod status;
pub mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure the break timer")]
    Init(init::InitArgs),
    #[command(about = "Watch user activity and remind about breaks")]
    Watch(watch::WatchArgs),
    #[command(about = "Show the effective settings and watcher state")]
    Status,
    #[command(about = "Show a reminder with a countdown", arg_required_else_help = true)]
    Notify(notify::NotifyArgs),
    #[command(about = "Replay a work/idle script through the break timer")]
    Simulate(simulate::SimulateArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Watch(args) => watch::cmd(args).await,
            Commands::Status => status::cmd(),
            Commands::Notify(args) => notify::cmd(args).await,
            Commands::Simulate(args) => simulate::cmd(args),
        }
    }
}
