//! Core library modules for the worktimer application.
//!
//! - **Timer Core**: `activity`, `accumulator`, `policy`, `engine`
//! - **Collaborators**: `idle` (input source), `alert`, `key_feedback`, `toast` (output)
//! - **Infrastructure**: `config`, `data_storage`, `daemon`, `error`, `formatter`, `messages`
//!
//! ```rust
//! use chrono::NaiveDate;
//! use worktimer::libs::config::TimerConfig;
//! use worktimer::libs::engine::Engine;
//! use worktimer::libs::idle::ManualIdleSource;
//!
//! let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let mut engine = Engine::new(TimerConfig::default(), start);
//! let frame = engine.tick(start, &ManualIdleSource::new());
//! assert!(!frame.directives.visible);
//! ```

pub mod accumulator;
pub mod activity;
pub mod alert;
pub mod config;
pub mod daemon;
pub mod data_storage;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod idle;
pub mod key_feedback;
pub mod messages;
pub mod policy;
pub mod toast;
