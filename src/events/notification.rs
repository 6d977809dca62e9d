//! # Single stream notification.
//!
//! [`Notification`] is one sink callback reified as a value. It is what
//! [`UnsafeScriptBuilder::notify`](crate::UnsafeScriptBuilder::notify) replays and
//! what [`TestSink`](crate::TestSink) records.

use std::fmt;

use crate::events::ErrorValue;
use crate::sinks::Sink;

/// One sink callback.
#[derive(Clone, PartialEq)]
pub enum Notification<T> {
    Start,
    Next(T),
    Error(ErrorValue),
    Complete,
}

impl<T> Notification<T> {
    /// True for `Error` and `Complete`.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Notification::Error(_) | Notification::Complete)
    }

    /// Delivers this notification to `sink`, consuming it.
    pub fn deliver(self, sink: &mut dyn Sink<T>) {
        match self {
            Notification::Start => sink.on_start(),
            Notification::Next(item) => sink.on_next(item),
            Notification::Error(err) => sink.on_error(err),
            Notification::Complete => sink.on_complete(),
        }
    }
}

impl<T: Clone> Notification<T> {
    /// Delivers a copy of this notification to `sink`.
    pub fn accept(&self, sink: &mut dyn Sink<T>) {
        self.clone().deliver(sink);
    }
}

impl<T: fmt::Debug> fmt::Debug for Notification<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Start => f.write_str("onStart()"),
            Notification::Next(item) => write!(f, "onNext({item:?})"),
            Notification::Error(err) => write!(f, "onError({}, {})", err.kind(), err.message()),
            Notification::Complete => f.write_str("onCompleted()"),
        }
    }
}
