//! Audible key press feedback.
//!
//! Each key press (the first press only, auto-repeat is ignored until the key
//! is released) queues one click. A single worker task drains the queue with a
//! short gap between clicks. Fast typing collapses the backlog to at most
//! [`MAX_PENDING_CLICKS`] so the clicks never lag far behind the keyboard.

use crate::libs::alert::Alert;
use crate::libs::idle::KeyEvent;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

pub const MAX_PENDING_CLICKS: usize = 3;
pub const CLICK_GAP: Duration = Duration::from_millis(60);

pub struct KeyFeedback {
    pressed: HashSet<String>,
    pending: Arc<Mutex<usize>>,
    wake: Arc<Notify>,
    worker: JoinHandle<()>,
}

impl KeyFeedback {
    /// Starts the click worker. Must be called from within a tokio runtime.
    pub fn new(sound: Arc<dyn Alert>) -> Self {
        let pending = Arc::new(Mutex::new(0usize));
        let wake = Arc::new(Notify::new());

        let worker_pending = pending.clone();
        let worker_wake = wake.clone();
        let worker = tokio::spawn(async move {
            loop {
                worker_wake.notified().await;
                loop {
                    {
                        let mut pending = worker_pending.lock();
                        if *pending == 0 {
                            break;
                        }
                        *pending = (*pending).min(MAX_PENDING_CLICKS) - 1;
                    }
                    sound.ring();
                    tokio::time::sleep(CLICK_GAP).await;
                }
            }
        });

        Self {
            pressed: HashSet::new(),
            pending,
            wake,
            worker,
        }
    }

    pub fn handle(&mut self, event: &KeyEvent) {
        match event {
            KeyEvent::Pressed(key) => {
                if self.pressed.insert(key.clone()) {
                    *self.pending.lock() += 1;
                    self.wake.notify_one();
                }
            }
            KeyEvent::Released(key) => {
                self.pressed.remove(key);
            }
        }
    }

    /// Feeds every event from `events` until the sender side closes.
    pub async fn consume(mut self, mut events: UnboundedReceiver<KeyEvent>) {
        while let Some(event) = events.recv().await {
            self.handle(&event);
        }
    }
}

impl Drop for KeyFeedback {
    fn drop(&mut self) {
        self.worker.abort();
    }
}
