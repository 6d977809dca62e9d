//! # Unguarded script builder.
//!
//! [`UnsafeScriptBuilder`] builds scripts that are allowed to break the stream
//! contract: several terminal events, items after a terminal event, errors
//! after completion. Every step reaches the sink only when the producer is
//! attached with [`attach_unsafe`](crate::attach_unsafe); under the guarded
//! [`attach`](crate::attach) the violations are filtered out.
//!
//! Use it to probe how a sink copes with a misbehaving upstream. For ordinary
//! scripts prefer [`ScriptBuilder`](crate::ScriptBuilder).
//!
//! ## Example
//! ```rust
//! use rxscript::{attach_unsafe, ErrorValue, UnsafeScriptBuilder, TestSink};
//!
//! let producer = UnsafeScriptBuilder::new()
//!     .complete()
//!     .complete()
//!     .error(ErrorValue::msg("late"))
//!     .emit("hi")
//!     .build();
//!
//! let mut sink = TestSink::<&str>::new();
//! attach_unsafe(&producer, &mut sink).unwrap();
//! assert_eq!(sink.completions(), 2);
//! assert_eq!(sink.errors().len(), 1);
//! sink.assert_values(&["hi"]);
//! ```

use std::fmt;
use std::time::Duration;

use crate::events::{ErrorValue, Event, EventSequence, Notification};
use crate::script::Producer;
use crate::sinks::Sink;

/// Builder for scripts that may violate the stream contract.
pub struct UnsafeScriptBuilder<T> {
    events: EventSequence<T>,
}

impl<T> UnsafeScriptBuilder<T> {
    pub fn new() -> Self {
        Self {
            events: EventSequence::new(),
        }
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

    pub fn start(&mut self) -> &mut Self {
        self.push(Event::Start)
    }

    pub fn emit(&mut self, item: T) -> &mut Self {
        self.push(Event::Next(item))
    }

    /// Appends `on_error(err)`; later steps still run.
    pub fn error(&mut self, err: ErrorValue) -> &mut Self {
        self.push(Event::Error(err))
    }

    /// Appends `on_complete`; later steps still run.
    pub fn complete(&mut self) -> &mut Self {
        self.push(Event::Complete)
    }

    pub fn sleep(&mut self, duration: Duration) -> &mut Self {
        self.push(Event::Sleep(duration))
    }

    /// Appends a prebuilt notification (start, next, error or complete).
    pub fn notify(&mut self, notification: Notification<T>) -> &mut Self {
        self.push(Event::from(notification))
    }
}

impl<T: 'static> UnsafeScriptBuilder<T> {
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

    pub fn perform_side_effect<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.push(Event::side_effect(f))
    }
}

impl<T: Clone> UnsafeScriptBuilder<T> {
    /// Snapshots the current events into a [`Producer`].
    pub fn build(&self) -> Producer<T> {
        Producer::from(&self.events)
    }
}

impl<T> Default for UnsafeScriptBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for UnsafeScriptBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnsafeScriptBuilder")
            .field("events", &self.events)
            .finish()
    }
}
