//! # Ordered event accumulation.
//!
//! [`EventSequence`] is the append-only list builders write into. Insertion
//! order is replay order. Builders hand out snapshots (`Arc<[Event<T>]>`), so a
//! built producer never observes events appended afterwards.

use std::fmt;
use std::sync::Arc;

use crate::events::Event;

/// Append-only, ordered list of events.
pub struct EventSequence<T> {
    events: Vec<Event<T>>,
}

impl<T> EventSequence<T> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends one event at the end.
    #[inline]
    pub fn push(&mut self, event: Event<T>) {
        self.events.push(event);
    }

    /// Iterates events in replay order.
    pub fn iter(&self) -> std::slice::Iter<'_, Event<T>> {
        self.events.iter()
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

impl<T: Clone> EventSequence<T> {
    /// Copies the current events into an immutable shared slice.
    pub fn snapshot(&self) -> Arc<[Event<T>]> {
        self.events.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> EventSequence<T> {
    /// One description per event, in replay order.
    pub fn describe(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

impl<T> Default for EventSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for EventSequence<T> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for EventSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.events.iter()).finish()
    }
}

impl<T> Extend<Event<T>> for EventSequence<T> {
    fn extend<I: IntoIterator<Item = Event<T>>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

impl<T> FromIterator<Event<T>> for EventSequence<T> {
    fn from_iter<I: IntoIterator<Item = Event<T>>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a EventSequence<T> {
    type Item = &'a Event<T>;
    type IntoIter = std::slice::Iter<'a, Event<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_detached_from_later_pushes() {
        let mut seq = EventSequence::new();
        seq.push(Event::Next(1));
        let snap = seq.snapshot();
        seq.push(Event::Complete);

        assert_eq!(snap.len(), 1);
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn test_describe_keeps_insertion_order() {
        let seq: EventSequence<&str> = vec![Event::Complete, Event::sleep_ms(5), Event::Next("a")]
            .into_iter()
            .collect();
        assert_eq!(
            seq.describe(),
            vec!["onCompleted()", "sleep(5ms)", "onNext(\"a\")"]
        );
    }
}
