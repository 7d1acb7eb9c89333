//! # Worktimer - break debt tracker
//!
//! Watches keyboard and mouse activity, turns it into accumulated break debt
//! and reminds you to step away once the debt reaches a full break.
//!
//! ## Features
//!
//! - **Activity Sampling**: Trailing-window activity rate filters out stray input
//! - **Break Debt**: Work accrues debt, real breaks pay it back
//! - **Escalating Reminders**: A reminder, then a louder one if it is ignored
//! - **Background Watcher**: Runs detached, reloads its configuration on change
//! - **Simulation**: Replay a work/idle script to tune the settings
//!
//! ## Usage
//!
//! ```rust,no_run
//! use worktimer::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;
