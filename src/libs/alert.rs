//! Attention alerts.
//!
//! An [`Alert`] is a single short, non-blocking signal. Multi-step patterns
//! run as an [`AlertSequence`]: a tokio task that can be cancelled at any
//! time and never runs on the tick path.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Number of signals in the escalation pattern.
pub const ESCALATION_REPEAT: usize = 3;
/// Pause between two escalation signals.
pub const ESCALATION_GAP: Duration = Duration::from_millis(300);

pub trait Alert: Send + Sync {
    fn ring(&self);
}

/// Rings the terminal bell.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl Alert for TerminalBell {
    fn ring(&self) {
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }
}

/// Discards every signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAlert;

impl Alert for SilentAlert {
    fn ring(&self) {}
}

/// A cancellable background pattern of repeated alerts.
///
/// Dropping the sequence cancels it.
pub struct AlertSequence {
    handle: JoinHandle<()>,
}

impl AlertSequence {
    /// Starts ringing `alert` `repeat` times with `gap` between signals.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(alert: Arc<dyn Alert>, repeat: usize, gap: Duration) -> Self {
        let handle = tokio::spawn(async move {
            for i in 0..repeat {
                if i > 0 {
                    tokio::time::sleep(gap).await;
                }
                alert.ring();
            }
        });
        Self { handle }
    }

    /// The attention pattern used when a reminder escalates.
    pub fn escalation(alert: Arc<dyn Alert>) -> Self {
        Self::spawn(alert, ESCALATION_REPEAT, ESCALATION_GAP)
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for AlertSequence {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
