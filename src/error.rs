//! Error types used by script replay and the subscription tracker.
//!
//! This module defines three error types:
//!
//! - [`ReplayError`]: faults raised while a producer replays its script.
//! - [`CancelError`]: a single [`Handle::cancel`](crate::Handle::cancel) failure.
//! - [`DisposeError`]: every cancel failure collected by one
//!   [`Tracker::dispose_all`](crate::Tracker::dispose_all) pass.
//!
//! A scripted `Error` event is **not** an error here: it is data delivered to the sink.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::events::ErrorValue;

/// # Faults raised during replay.
///
/// Replay never recovers locally: the first fault stops the producer and is
/// returned to whoever invoked it.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ReplayError {
    /// An `Action` callback returned an error.
    #[error("action failed: {source}")]
    Action {
        /// The error returned by the callback.
        source: ErrorValue,
    },

    /// A `Sleep` was interrupted by cancellation (async replay only).
    #[error("sleep interrupted after {slept:?}")]
    Interrupted {
        /// How long the sleep ran before the interruption.
        slept: Duration,
    },
}

impl ReplayError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use rxscript::ReplayError;
    /// use std::time::Duration;
    ///
    /// let err = ReplayError::Interrupted { slept: Duration::from_millis(3) };
    /// assert_eq!(err.as_label(), "replay_interrupted");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ReplayError::Action { .. } => "replay_action_failed",
            ReplayError::Interrupted { .. } => "replay_interrupted",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ReplayError::Action { source } => format!("action: {}", source.message()),
            ReplayError::Interrupted { slept } => format!("interrupted after {slept:?}"),
        }
    }
}

/// # Failure of a single handle cancellation.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct CancelError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl CancelError {
    /// Builds an error from a message only.
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an underlying error; its display text becomes the message.
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// # Aggregate of cancel failures from one disposal pass.
///
/// Only exists when at least one cancellation failed; see [`DisposeError::from_failures`].
/// Failures are kept in the tracker's iteration order (insertion order).
#[derive(Debug)]
pub struct DisposeError {
    failures: Vec<CancelError>,
}

impl DisposeError {
    /// Wraps `failures`, or returns `None` when the list is empty.
    ///
    /// # Example
    /// ```
    /// use rxscript::{CancelError, DisposeError};
    ///
    /// assert!(DisposeError::from_failures(Vec::new()).is_none());
    ///
    /// let err = DisposeError::from_failures(vec![CancelError::msg("a")]).unwrap();
    /// assert_eq!(err.len(), 1);
    /// assert_eq!(err.as_label(), "dispose_failed");
    /// ```
    pub fn from_failures(failures: Vec<CancelError>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self { failures })
        }
    }

    pub fn failures(&self) -> &[CancelError] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<CancelError> {
        self.failures
    }

    /// Number of collected failures (always `>= 1`).
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Always `false`; present for API symmetry with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        "dispose_failed"
    }

    /// Returns the failure messages joined with `"; "`.
    pub fn as_message(&self) -> String {
        self.failures
            .iter()
            .map(CancelError::message)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for DisposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cancellation(s) failed", self.failures.len())?;
        for (i, failure) in self.failures.iter().enumerate() {
            write!(f, "; [{i}] {failure}")?;
        }
        Ok(())
    }
}

// Written by hand: `source()` is the first element of `failures`, which `#[source]` cannot express.
impl StdError for DisposeError {
    /// The first failure; the rest are reachable through [`DisposeError::failures`].
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.failures.first().map(|e| e as &(dyn StdError + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispose_error_lists_every_failure() {
        let err = DisposeError::from_failures(vec![
            CancelError::msg("first"),
            CancelError::new(std::io::Error::other("second")),
        ])
        .unwrap();

        assert_eq!(err.len(), 2);
        assert_eq!(
            err.to_string(),
            "2 cancellation(s) failed; [0] first; [1] second"
        );
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("first"));
        assert_eq!(err.as_message(), "first; second");
    }

    #[test]
    fn test_cancel_error_keeps_source() {
        let err = CancelError::new(std::io::Error::other("inner"));
        assert_eq!(err.message(), "inner");
        assert!(err.source().is_some());
        assert!(CancelError::msg("plain").source().is_none());
    }

    #[test]
    fn test_replay_error_labels() {
        let err = ReplayError::Action {
            source: ErrorValue::msg("bad"),
        };
        assert_eq!(err.as_label(), "replay_action_failed");
        assert_eq!(err.as_message(), "action: bad");
    }
}
