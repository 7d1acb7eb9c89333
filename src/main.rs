use tracing_subscriber::EnvFilter;
use worktimer::commands::Cli;
use worktimer::libs::daemon::{self, WatchMode};
use worktimer::libs::messages::macros::is_debug_mode;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Entry point of the detached watcher spawned by `worktimer watch`.
    if std::env::args().any(|arg| arg == "--daemon-run") {
        return daemon::run_with_signal_handling(WatchMode::Background).await;
    }

    Cli::menu().await
}

fn init_tracing() {
    if !is_debug_mode() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("worktimer=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
