//! # Scripted stream events.
//!
//! [`Event`] is the closed vocabulary a script is written in. Each variant knows
//! how to apply itself to a [`Sink`]:
//!
//! | Variant    | Effect on replay                                   | Description        |
//! |------------|----------------------------------------------------|--------------------|
//! | `Start`    | `sink.on_start()`                                  | `onStart()`        |
//! | `Next`     | `sink.on_next(item.clone())`                       | `onNext(item)`     |
//! | `Error`    | `sink.on_error(err.clone())`                       | `onError(kind, m)` |
//! | `Complete` | `sink.on_complete()`                               | `onCompleted()`    |
//! | `Sleep`    | blocks the replaying thread for the duration       | `sleep(Nms)`       |
//! | `Action`   | calls the callback with the sink                   | `action`           |
//!
//! Events are immutable once built; replaying one never changes it, so the same
//! event can be applied to any number of sinks.
//!
//! ## Example
//! ```rust
//! use rxscript::{ErrorValue, Event};
//!
//! let ev: Event<&str> = Event::Next("hi");
//! assert_eq!(ev.to_string(), "onNext(\"hi\")");
//! assert!(!ev.is_terminal());
//!
//! let err: Event<&str> = Event::Error(ErrorValue::msg("boom"));
//! assert_eq!(err.to_string(), "onError(message, boom)");
//! assert!(err.is_terminal());
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ReplayError;
use crate::events::{ErrorValue, Notification};
use crate::sinks::Sink;

/// Callback stored by [`Event::Action`].
///
/// An `Err` aborts the replay and is returned to the producer's caller.
pub type ActionFn<T> = Arc<dyn Fn(&mut dyn Sink<T>) -> Result<(), ErrorValue> + Send + Sync>;

/// One step of a scripted stream.
pub enum Event<T> {
    /// Stream initialization.
    Start,
    /// Emits one item.
    Next(T),
    /// Terminal failure.
    Error(ErrorValue),
    /// Terminal success.
    Complete,
    /// Pause before the next event.
    Sleep(Duration),
    /// Arbitrary callback against the sink.
    Action(ActionFn<T>),
}

impl<T> Event<T> {
    /// Builds a sleep of `ms` milliseconds.
    #[inline]
    pub fn sleep_ms(ms: u64) -> Self {
        Event::Sleep(Duration::from_millis(ms))
    }

    /// Builds an infallible action event.
    pub fn action<F>(f: F) -> Self
    where
        T: 'static,
        F: Fn(&mut dyn Sink<T>) + Send + Sync + 'static,
    {
        Event::Action(Arc::new(move |sink: &mut dyn Sink<T>| {
            f(sink);
            Ok(())
        }))
    }

    /// Builds a fallible action event; an `Err` aborts the replay.
    pub fn try_action<F, E>(f: F) -> Self
    where
        T: 'static,
        F: Fn(&mut dyn Sink<T>) -> Result<(), E> + Send + Sync + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        Event::Action(Arc::new(move |sink: &mut dyn Sink<T>| {
            f(sink).map_err(ErrorValue::new)
        }))
    }

    /// Builds an action that ignores the sink.
    pub fn side_effect<F>(f: F) -> Self
    where
        T: 'static,
        F: Fn() + Send + Sync + 'static,
    {
        Event::Action(Arc::new(move |_: &mut dyn Sink<T>| {
            f();
            Ok(())
        }))
    }

    /// True for `Error` and `Complete`.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::Error(_) | Event::Complete)
    }

    /// Short stable label (snake_case) for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Event::Start => "start",
            Event::Next(_) => "next",
            Event::Error(_) => "error",
            Event::Complete => "complete",
            Event::Sleep(_) => "sleep",
            Event::Action(_) => "action",
        }
    }
}

impl<T: Clone> Event<T> {
    /// Applies this event to `sink`, blocking the current thread for `Sleep`.
    ///
    /// Only an `Action` can fail; its error is returned unchanged.
    pub fn perform(&self, sink: &mut dyn Sink<T>) -> Result<(), ReplayError> {
        match self {
            Event::Start => sink.on_start(),
            Event::Next(item) => sink.on_next(item.clone()),
            Event::Error(err) => sink.on_error(err.clone()),
            Event::Complete => sink.on_complete(),
            Event::Sleep(d) => std::thread::sleep(*d),
            Event::Action(f) => f(sink).map_err(|source| ReplayError::Action { source })?,
        }
        Ok(())
    }
}

impl<T> From<Notification<T>> for Event<T> {
    fn from(n: Notification<T>) -> Self {
        match n {
            Notification::Start => Event::Start,
            Notification::Next(item) => Event::Next(item),
            Notification::Error(err) => Event::Error(err),
            Notification::Complete => Event::Complete,
        }
    }
}

impl<T: Clone> Clone for Event<T> {
    fn clone(&self) -> Self {
        match self {
            Event::Start => Event::Start,
            Event::Next(item) => Event::Next(item.clone()),
            Event::Error(err) => Event::Error(err.clone()),
            Event::Complete => Event::Complete,
            Event::Sleep(d) => Event::Sleep(*d),
            Event::Action(f) => Event::Action(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Display for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Start => f.write_str("onStart()"),
            Event::Next(item) => write!(f, "onNext({item:?})"),
            Event::Error(err) => write!(f, "onError({}, {})", err.kind(), err.message()),
            Event::Complete => f.write_str("onCompleted()"),
            Event::Sleep(d) => write!(f, "sleep({}ms)", d.as_millis()),
            Event::Action(_) => f.write_str("action"),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Start => f.write_str("Start"),
            Event::Next(item) => f.debug_tuple("Next").field(item).finish(),
            Event::Error(err) => f.debug_tuple("Error").field(err).finish(),
            Event::Complete => f.write_str("Complete"),
            Event::Sleep(d) => f.debug_tuple("Sleep").field(d).finish(),
            Event::Action(_) => f.write_str("Action(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::TestSink;

    #[test]
    fn test_descriptions() {
        let events: Vec<Event<i32>> = vec![
            Event::Start,
            Event::Next(7),
            Event::Error(ErrorValue::new(std::fmt::Error)),
            Event::Complete,
            Event::sleep_ms(250),
            Event::action(|_| {}),
        ];
        let text: Vec<String> = events.iter().map(ToString::to_string).collect();
        assert_eq!(text[0], "onStart()");
        assert_eq!(text[1], "onNext(7)");
        assert!(text[2].starts_with("onError("));
        assert!(text[2].ends_with(", an error occurred when formatting an argument)"));
        assert_eq!(text[3], "onCompleted()");
        assert_eq!(text[4], "sleep(250ms)");
        assert_eq!(text[5], "action");
    }

    #[test]
    fn test_perform_drives_matching_callback() {
        let mut sink = TestSink::<i32>::new();
        Event::<i32>::Start.perform(&mut sink).unwrap();
        Event::Next(1).perform(&mut sink).unwrap();
        Event::<i32>::Complete.perform(&mut sink).unwrap();
        assert_eq!(
            sink.notifications(),
            vec![
                Notification::Start,
                Notification::Next(1),
                Notification::Complete
            ]
        );
    }

    #[test]
    fn test_failing_action_surfaces_error() {
        let ev: Event<i32> = Event::Action(Arc::new(
            |_: &mut dyn Sink<i32>| -> Result<(), ErrorValue> { Err(ErrorValue::msg("nope")) },
        ));
        let mut sink = TestSink::<i32>::new();
        let err = ev.perform(&mut sink).unwrap_err();
        assert_eq!(err.as_label(), "replay_action_failed");
        assert!(sink.notifications().is_empty());
    }

    #[test]
    fn test_terminal_classification() {
        assert!(Event::<()>::Complete.is_terminal());
        assert!(Event::<()>::Error(ErrorValue::msg("x")).is_terminal());
        assert!(!Event::<()>::Start.is_terminal());
        assert!(!Event::<()>::sleep_ms(0).is_terminal());
        assert_eq!(Event::<()>::sleep_ms(0).as_label(), "sleep");
    }
}
