//! Typed errors for the timer core.
//!
//! The command layer works with `anyhow`; these enums cover the places where
//! callers need to match on what went wrong.

use thiserror::Error;

/// Rejected timer configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A duration field is zero. Zero `activity_time` would divide by zero in
    /// the growth formula, zero `window_time` in the rate formula.
    #[error("'{field}' must be greater than zero")]
    NonPositive { field: &'static str },

    /// A duration field is beyond [`MAX_DURATION_SECS`](crate::libs::config::MAX_DURATION_SECS).
    #[error("'{field}' must not exceed one day")]
    TooLarge { field: &'static str },

    #[error("'min_rate' must be a finite non-negative number, got {0}")]
    InvalidRate(f64),
}

/// Failure to query the time since the last input event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdleError {
    #[error("idle time source unavailable: {0}")]
    Unavailable(String),
}
