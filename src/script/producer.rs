//! # Replayable producer.
//!
//! [`Producer`] owns an immutable snapshot of events and replays it against a
//! sink, in order, on every call. It keeps no state between calls, so two
//! attaches to the same producer observe the same script from the start.
//!
//! ## Replay
//! ```text
//! for event in snapshot:
//!   Start/Next/Error/Complete ─► sink callback
//!   Sleep(d)                  ─► block for d   (call)
//!                               cancellable     (call_async)
//!   Action(f)                 ─► f(sink)?       (Err stops replay)
//! ```
//!
//! ## Rules
//! - No event is skipped, retried or reordered.
//! - Replay is synchronous within the call; moving it to another thread is the
//!   caller's job (see [`spawn_attach`](crate::spawn_attach)).
//! - Faults are never recovered: the first one is returned as [`ReplayError`].

use std::fmt;
use std::sync::Arc;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::error::ReplayError;
use crate::events::{Event, EventSequence};
use crate::sinks::Sink;

/// Immutable, replayable event script.
pub struct Producer<T> {
    events: Arc<[Event<T>]>,
}

impl<T> Producer<T> {
    /// Events this producer replays, in order.
    pub fn events(&self) -> &[Event<T>] {
        &self.events
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<T: Clone> Producer<T> {
    /// Replays every event against `sink` on the current thread.
    ///
    /// `Sleep` blocks the thread and cannot be interrupted.
    pub fn call(&self, sink: &mut dyn Sink<T>) -> Result<(), ReplayError> {
        for (index, event) in self.events.iter().enumerate() {
            tracing::trace!(index, event = event.as_label(), "replaying event");
            if let Err(err) = event.perform(sink) {
                tracing::debug!(index, error = err.as_label(), "replay aborted");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Replays every event against `sink` inside an async context.
    ///
    /// `Sleep` becomes a timer raced against `token`. If the token fires first,
    /// replay stops and [`ReplayError::Interrupted`] is returned to the caller;
    /// nothing is delivered to the sink for the interruption.
    pub async fn call_async(
        &self,
        sink: &mut (dyn Sink<T> + Send),
        token: &CancellationToken,
    ) -> Result<(), ReplayError> {
        for (index, event) in self.events.iter().enumerate() {
            tracing::trace!(index, event = event.as_label(), "replaying event");
            let res = match event {
                Event::Sleep(d) => {
                    let started = time::Instant::now();
                    let sleep = time::sleep(*d);
                    tokio::pin!(sleep);
                    select! {
                        biased;
                        _ = token.cancelled() => Err(ReplayError::Interrupted {
                            slept: started.elapsed(),
                        }),
                        _ = &mut sleep => Ok(()),
                    }
                }
                other => other.perform(sink),
            };
            if let Err(err) = res {
                tracing::debug!(index, error = err.as_label(), "replay aborted");
                return Err(err);
            }
        }
        Ok(())
    }
}

impl<T> Clone for Producer<T> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

impl<T: Clone> From<&EventSequence<T>> for Producer<T> {
    fn from(seq: &EventSequence<T>) -> Self {
        Self {
            events: seq.snapshot(),
        }
    }
}

impl<T> From<Vec<Event<T>>> for Producer<T> {
    fn from(events: Vec<Event<T>>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Producer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("events", &self.events)
            .finish()
    }
}
