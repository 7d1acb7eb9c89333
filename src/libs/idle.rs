//! Idle-time sources.
//!
//! The timer core only needs one question answered: how long ago was the
//! last physical input event? [`IdleTimeSource`] is that question.
//!
//! - [`InputHook`] answers it from a global `rdev` listener running on its own
//!   OS thread. The same listener forwards key presses to subscribers (used by
//!   the key feedback clicker), since `rdev` supports a single hook per process.
//! - [`ManualIdleSource`] is set explicitly; tests and the simulator use it.

use crate::libs::error::IdleError;
use chrono::Duration;
use parking_lot::Mutex;
use rdev::{listen, Event, EventType};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Something that can report the time elapsed since the last input event.
pub trait IdleTimeSource: Send + Sync {
    fn idle_time(&self) -> Result<Duration, IdleError>;
}

impl<T: IdleTimeSource + ?Sized> IdleTimeSource for Arc<T> {
    fn idle_time(&self) -> Result<Duration, IdleError> {
        (**self).idle_time()
    }
}

/// Key transitions forwarded from the global input hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

#[derive(Default)]
struct HookState {
    failure: Option<String>,
    key_subscribers: Vec<UnboundedSender<KeyEvent>>,
}

/// Global keyboard and mouse hook backed by `rdev`.
pub struct InputHook {
    last_input: Arc<Mutex<Instant>>,
    state: Arc<Mutex<HookState>>,
}

impl InputHook {
    /// Starts the listener thread.
    ///
    /// `rdev::listen` blocks for the lifetime of the hook; when it fails (no
    /// display, missing accessibility permission) the error is recorded and
    /// the listener is retried every second.
    pub fn start() -> Self {
        let last_input = Arc::new(Mutex::new(Instant::now()));
        let state = Arc::new(Mutex::new(HookState::default()));

        let shared_last_input = last_input.clone();
        let shared_state = state.clone();
        std::thread::spawn(move || loop {
            let last_input_for_listener = shared_last_input.clone();
            let state_for_listener = shared_state.clone();
            let result = listen(move |event: Event| {
                let key_event = match event.event_type {
                    EventType::KeyPress(key) => Some(KeyEvent::Pressed(format!("{:?}", key))),
                    EventType::KeyRelease(key) => Some(KeyEvent::Released(format!("{:?}", key))),
                    _ => None,
                };
                *last_input_for_listener.lock() = Instant::now();

                let mut state = state_for_listener.lock();
                state.failure = None;
                if let Some(key_event) = key_event {
                    state.key_subscribers.retain(|tx| tx.send(key_event.clone()).is_ok());
                }
            });

            match result {
                Err(e) => {
                    tracing::warn!(error = ?e, "input listener failed, retrying in 1 second");
                    shared_state.lock().failure = Some(format!("{:?}", e));
                    std::thread::sleep(std::time::Duration::from_secs(1));
                }
                Ok(()) => break,
            }
        });

        Self { last_input, state }
    }

    /// Returns a channel receiving every key press and release.
    pub fn subscribe_keys(&self) -> UnboundedReceiver<KeyEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.state.lock().key_subscribers.push(tx);
        rx
    }
}

impl IdleTimeSource for InputHook {
    fn idle_time(&self) -> Result<Duration, IdleError> {
        if let Some(failure) = &self.state.lock().failure {
            return Err(IdleError::Unavailable(failure.clone()));
        }
        Duration::from_std(self.last_input.lock().elapsed()).map_err(|e| IdleError::Unavailable(e.to_string()))
    }
}

/// Idle-time source driven by explicit calls.
///
/// Clones share the same value, so a test can keep one handle and give the
/// other to the engine.
#[derive(Debug, Clone)]
pub struct ManualIdleSource {
    idle: Arc<Mutex<Result<Duration, IdleError>>>,
}

impl ManualIdleSource {
    pub fn new() -> Self {
        Self {
            idle: Arc::new(Mutex::new(Ok(Duration::zero()))),
        }
    }

    pub fn set(&self, idle: Duration) {
        *self.idle.lock() = Ok(idle);
    }

    /// Makes every following query fail until [`ManualIdleSource::set`] is called.
    pub fn fail(&self, reason: &str) {
        *self.idle.lock() = Err(IdleError::Unavailable(reason.to_string()));
    }
}

impl Default for ManualIdleSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdleTimeSource for ManualIdleSource {
    fn idle_time(&self) -> Result<Duration, IdleError> {
        self.idle.lock().clone()
    }
}
