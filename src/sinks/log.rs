//! # LogSink: simple callback printer
//!
//! A minimal sink decorator that prints every callback to stdout and then
//! forwards it to the wrapped sink. Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [start]
//! [next] item="Hello"
//! [error] kind=std::io::error::Error msg="disk gone"
//! [complete]
//! ```

use std::fmt;

use crate::events::ErrorValue;
use crate::sinks::Sink;

/// Printing sink decorator.
#[derive(Debug, Default)]
pub struct LogSink<S> {
    inner: S,
}

impl<S> LogSink<S> {
    /// Wraps `inner`; every callback is printed before being forwarded.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Unwraps the decorated sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<T, S> Sink<T> for LogSink<S>
where
    T: fmt::Debug,
    S: Sink<T>,
{
    fn on_start(&mut self) {
        println!("[start]");
        self.inner.on_start();
    }

    fn on_next(&mut self, item: T) {
        println!("[next] item={item:?}");
        self.inner.on_next(item);
    }

    fn on_error(&mut self, err: ErrorValue) {
        println!("[error] kind={} msg={:?}", err.kind(), err.message());
        self.inner.on_error(err);
    }

    fn on_complete(&mut self) {
        println!("[complete]");
        self.inner.on_complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::TestSink;

    #[test]
    fn test_forwards_to_inner() {
        let recorder = TestSink::<&str>::new();
        let mut sink = LogSink::new(recorder.clone());
        sink.on_start();
        sink.on_next("a");
        sink.on_complete();

        assert_eq!(recorder.starts(), 1);
        recorder.assert_values(&["a"]);
        recorder.assert_completed();
    }
}
