//! # Guarded script builder.
//!
//! [`ScriptBuilder`] accumulates a well-formed script meant for the guarded
//! [`attach`](crate::attach), where the attach itself guarantees the sink sees
//! at most one terminal callback and nothing after it.
//!
//! ## Building
//! - Append steps with [`emit`](ScriptBuilder::emit), [`error`](ScriptBuilder::error),
//!   [`sleep`](ScriptBuilder::sleep), [`perform`](ScriptBuilder::perform), ...
//! - Finish with [`then_completes`](ScriptBuilder::then_completes) (appends a
//!   completion) or [`then_never_completes`](ScriptBuilder::then_never_completes).
//! - [`build`](ScriptBuilder::build) snapshots what has been appended so far and
//!   leaves the builder usable; later appends never reach earlier producers.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use rxscript::{attach, ScriptBuilder, TestSink};
//!
//! let producer = ScriptBuilder::that_starts()
//!     .emit(1)
//!     .sleep(Duration::from_millis(5))
//!     .emit(2)
//!     .then_completes();
//!
//! let mut sink = TestSink::<i32>::new();
//! attach(&producer, &mut sink).unwrap();
//! sink.assert_values(&[1, 2]);
//! sink.assert_completed();
//! ```

use std::fmt;
use std::time::Duration;

use crate::events::{ErrorValue, Event, EventSequence};
use crate::script::Producer;
use crate::sinks::Sink;

/// Builder for contract-respecting scripts.
pub struct ScriptBuilder<T> {
    events: EventSequence<T>,
}

impl<T> ScriptBuilder<T> {
    /// Empty script; the sink never sees `on_start`.
    pub fn new() -> Self {
        Self {
            events: EventSequence::new(),
        }
    }

    /// Script whose first step is `on_start`.
    pub fn that_starts() -> Self {
        let mut builder = Self::new();
        builder.start();
        builder
    }

    /// Events accumulated so far.
    pub fn events(&self) -> &EventSequence<T> {
        &self.events
    }

    /// Appends a raw event.
    pub fn push(&mut self, event: Event<T>) -> &mut Self {
        self.events.push(event);
        self
    }

    /// Appends `on_start`.
    pub fn start(&mut self) -> &mut Self {
        self.push(Event::Start)
    }

    /// Appends `on_next(item)`.
    pub fn emit(&mut self, item: T) -> &mut Self {
        self.push(Event::Next(item))
    }

    /// Appends `on_error(err)`.
    pub fn error(&mut self, err: ErrorValue) -> &mut Self {
        self.push(Event::Error(err))
    }

    /// Appends `on_complete` without building.
    pub fn complete(&mut self) -> &mut Self {
        self.push(Event::Complete)
    }

    /// Appends a pause; zero is a no-op pause.
    pub fn sleep(&mut self, duration: Duration) -> &mut Self {
        self.push(Event::Sleep(duration))
    }
}

impl<T: 'static> ScriptBuilder<T> {
    /// Appends a callback that receives the sink mid-script.
    pub fn perform<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut dyn Sink<T>) + Send + Sync + 'static,
    {
        self.push(Event::action(f))
    }

    /// Appends a fallible callback; its `Err` aborts the replay.
    pub fn try_perform<F, E>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut dyn Sink<T>) -> Result<(), E> + Send + Sync + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        self.push(Event::try_action(f))
    }

    /// Appends a side effect that does not touch the sink.
    pub fn perform_side_effect<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.push(Event::side_effect(f))
    }
}

impl<T: Clone> ScriptBuilder<T> {
    /// Snapshots the current events into a [`Producer`].
    pub fn build(&self) -> Producer<T> {
        Producer::from(&self.events)
    }

    /// Appends `on_complete` and builds.
    pub fn then_completes(&mut self) -> Producer<T> {
        self.complete();
        self.build()
    }

    /// Builds without a terminal event; the stream stays open forever.
    pub fn then_never_completes(&self) -> Producer<T> {
        self.build()
    }
}

impl<T> Default for ScriptBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ScriptBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptBuilder")
            .field("events", &self.events)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use crate::events::Notification;
    use crate::script::attach;
    use crate::sinks::TestSink;

    #[test]
    fn test_emission_then_completion() {
        let producer = ScriptBuilder::new().emit("Hello").then_completes();
        let mut sink = TestSink::<&str>::new();
        attach(&producer, &mut sink).unwrap();

        assert_eq!(
            sink.notifications(),
            vec![Notification::Next("Hello"), Notification::Complete]
        );
    }

    #[test]
    fn test_that_starts_prepends_start() {
        let producer = ScriptBuilder::<u8>::that_starts().then_completes();
        let mut sink = TestSink::<u8>::new();
        attach(&producer, &mut sink).unwrap();

        assert_eq!(sink.starts(), 1);
        sink.assert_no_values();
        sink.assert_completed();
    }

    #[test]
    fn test_error_then_complete_delivers_only_error() {
        let producer = ScriptBuilder::<u8>::that_starts()
            .error(ErrorValue::new(std::io::Error::other("io")))
            .then_completes();
        let mut sink = TestSink::<u8>::new();
        attach(&producer, &mut sink).unwrap();

        sink.assert_error::<std::io::Error>();
        assert_eq!(sink.completions(), 0);
    }

    #[test]
    fn test_build_snapshots_independently() {
        let mut builder = ScriptBuilder::new();
        builder.emit(1);
        let first = builder.build();
        builder.emit(2);
        let second = builder.build();
        let again = builder.build();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);

        let a = TestSink::<i32>::new();
        let b = TestSink::<i32>::new();
        attach(&second, &mut a.clone()).unwrap();
        attach(&again, &mut b.clone()).unwrap();
        assert_eq!(a.notifications(), b.notifications());
    }

    #[test]
    fn test_perform_and_side_effect_run_in_order() {
        let flag = Arc::new(AtomicBool::new(false));
        let seen = Arc::clone(&flag);
        let producer = ScriptBuilder::new()
            .perform(|sink: &mut dyn Sink<i32>| sink.on_next(10))
            .perform_side_effect(move || seen.store(true, Ordering::SeqCst))
            .then_completes();
        let mut sink = TestSink::<i32>::new();
        attach(&producer, &mut sink).unwrap();

        assert!(flag.load(Ordering::SeqCst));
        sink.assert_values(&[10]);
    }

    #[test]
    fn test_never_completes_leaves_stream_open() {
        let producer = ScriptBuilder::new().emit('x').then_never_completes();
        let mut sink = TestSink::<char>::new();
        attach(&producer, &mut sink).unwrap();

        sink.assert_values(&['x']);
        sink.assert_no_terminal_event();
    }

    #[test]
    fn test_sleep_blocks_replay() {
        let producer = ScriptBuilder::<()>::new()
            .sleep(Duration::from_millis(50))
            .then_completes();
        let mut sink = TestSink::<()>::new();

        let started = std::time::Instant::now();
        attach(&producer, &mut sink).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
        sink.assert_completed();
    }
}
