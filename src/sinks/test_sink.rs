//! # Recording sink for tests.
//!
//! [`TestSink`] records every callback it receives as a [`Notification`] and
//! offers assertions over the recording. Clones share one recording, so a clone
//! can be moved into a producer running on another thread while the test keeps
//! the original for assertions.
//!
//! ## Architecture
//! ```text
//! producer thread                     test task
//!   sink.on_next(x) ──► Mutex<Vec<Notification>> ◄── values() / assert_*()
//!   sink.on_complete() ─► watch<terminal count> ◄── await_terminal_event()
//! ```
//!
//! ## Example
//! ```rust
//! use rxscript::{attach, ScriptBuilder, TestSink};
//!
//! let producer = ScriptBuilder::new().emit("Hello").then_completes();
//! let mut sink = TestSink::<&str>::new();
//! attach(&producer, &mut sink).unwrap();
//!
//! sink.assert_values(&["Hello"]);
//! sink.assert_completed();
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;

use crate::config::Config;
use crate::events::{ErrorValue, Notification};
use crate::sinks::Sink;

struct Shared<T> {
    recorded: Mutex<Vec<Notification<T>>>,
    terminals: watch::Sender<usize>,
}

/// Thread-safe recording sink.
pub struct TestSink<T> {
    shared: Arc<Shared<T>>,
    terminal_deadline: Option<Duration>,
    quiet_window: Duration,
}

impl<T> TestSink<T> {
    /// Creates an empty sink with [`Config::default`] wait windows.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates an empty sink using the wait windows from `cfg`.
    pub fn with_config(cfg: &Config) -> Self {
        let (terminals, _rx) = watch::channel(0usize);
        Self {
            shared: Arc::new(Shared {
                recorded: Mutex::new(Vec::new()),
                terminals,
            }),
            terminal_deadline: cfg.terminal_deadline(),
            quiet_window: cfg.quiet_window,
        }
    }

    fn recorded(&self) -> MutexGuard<'_, Vec<Notification<T>>> {
        self.shared
            .recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, n: Notification<T>) {
        let terminal = n.is_terminal();
        let mut recorded = self.recorded();
        recorded.push(n);
        // counter moves under the recording lock so both views agree
        if terminal {
            self.shared.terminals.send_modify(|count| *count += 1);
        }
    }

    /// Number of terminal callbacks received so far.
    pub fn terminal_count(&self) -> usize {
        *self.shared.terminals.borrow()
    }

    /// True once any terminal callback was received.
    pub fn is_terminated(&self) -> bool {
        self.terminal_count() > 0
    }

    /// Number of `on_complete` callbacks received.
    pub fn completions(&self) -> usize {
        self.recorded()
            .iter()
            .filter(|n| matches!(n, Notification::Complete))
            .count()
    }

    /// Number of `on_start` callbacks received.
    pub fn starts(&self) -> usize {
        self.recorded()
            .iter()
            .filter(|n| matches!(n, Notification::Start))
            .count()
    }

    /// Errors received, in order.
    pub fn errors(&self) -> Vec<ErrorValue> {
        self.recorded()
            .iter()
            .filter_map(|n| match n {
                Notification::Error(err) => Some(err.clone()),
                _ => None,
            })
            .collect()
    }

    /// Waits until a terminal callback arrives or the configured deadline passes.
    ///
    /// Returns `true` if the sink is terminated.
    pub async fn await_terminal_event(&self) -> bool {
        match self.terminal_deadline {
            Some(deadline) => self.await_terminal_event_for(deadline).await,
            None => {
                let mut rx = self.shared.terminals.subscribe();
                let terminated = rx.wait_for(|count| *count > 0).await.is_ok();
                terminated
            }
        }
    }

    /// Waits up to `timeout` for a terminal callback.
    pub async fn await_terminal_event_for(&self, timeout: Duration) -> bool {
        let mut rx = self.shared.terminals.subscribe();
        let res = tokio::time::timeout(timeout, rx.wait_for(|count| *count > 0)).await;
        matches!(res, Ok(Ok(_)))
    }

    /// Asserts that no terminal callback arrives within the configured quiet window.
    pub async fn assert_quiet(&self) {
        self.assert_quiet_for(self.quiet_window).await;
    }

    /// Asserts that no terminal callback arrives within `window`.
    pub async fn assert_quiet_for(&self, window: Duration) {
        let terminated = self.await_terminal_event_for(window).await;
        assert!(
            !terminated,
            "expected no terminal event within {window:?}, got {}",
            self.terminal_count()
        );
    }

    /// Asserts that no terminal callback has been received.
    pub fn assert_no_terminal_event(&self) {
        let count = self.terminal_count();
        assert_eq!(count, 0, "expected no terminal event, got {count}");
    }

    /// Asserts that no `on_error` has been received.
    pub fn assert_no_errors(&self) {
        let errors = self.errors();
        assert!(errors.is_empty(), "expected no errors, got {errors:?}");
    }

    /// Asserts exactly one `on_complete` and no `on_error`.
    pub fn assert_completed(&self) {
        self.assert_no_errors();
        let completions = self.completions();
        assert_eq!(completions, 1, "expected exactly one completion, got {completions}");
    }

    /// Asserts exactly one `on_error` whose payload is an `E`.
    pub fn assert_error<E: std::error::Error + 'static>(&self) {
        let errors = self.errors();
        assert_eq!(errors.len(), 1, "expected exactly one error, got {errors:?}");
        assert!(
            errors[0].is::<E>(),
            "expected error of type {}, got {}",
            std::any::type_name::<E>(),
            errors[0].kind()
        );
    }

    /// Asserts that no `on_next` has been received.
    pub fn assert_no_values(&self) {
        let count = self
            .recorded()
            .iter()
            .filter(|n| matches!(n, Notification::Next(_)))
            .count();
        assert_eq!(count, 0, "expected no values, got {count}");
    }
}

impl<T: Clone> TestSink<T> {
    /// Every callback received, in order.
    pub fn notifications(&self) -> Vec<Notification<T>> {
        self.recorded().clone()
    }

    /// Items received through `on_next`, in order.
    pub fn values(&self) -> Vec<T> {
        self.recorded()
            .iter()
            .filter_map(|n| match n {
                Notification::Next(item) => Some(item.clone()),
                _ => None,
            })
            .collect()
    }
}

impl<T: Clone + PartialEq + fmt::Debug> TestSink<T> {
    /// Asserts the received items equal `expected`, in order.
    pub fn assert_values(&self, expected: &[T]) {
        let values = self.values();
        assert_eq!(values.as_slice(), expected, "received values differ");
    }
}

impl<T> Sink<T> for TestSink<T> {
    fn on_start(&mut self) {
        self.record(Notification::Start);
    }

    fn on_next(&mut self, item: T) {
        self.record(Notification::Next(item));
    }

    fn on_error(&mut self, err: ErrorValue) {
        self.record(Notification::Error(err));
    }

    fn on_complete(&mut self) {
        self.record(Notification::Complete);
    }
}

impl<T> Clone for TestSink<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            terminal_deadline: self.terminal_deadline,
            quiet_window: self.quiet_window,
        }
    }
}

impl<T> Default for TestSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for TestSink<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSink")
            .field("recorded", &*self.recorded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_recording() {
        let sink = TestSink::<i32>::new();
        let mut writer = sink.clone();
        writer.on_start();
        writer.on_next(4);
        writer.on_complete();

        assert_eq!(sink.starts(), 1);
        sink.assert_values(&[4]);
        sink.assert_completed();
        assert!(sink.is_terminated());
    }

    #[test]
    fn test_assert_error_checks_type() {
        let mut sink = TestSink::<i32>::new();
        sink.on_error(ErrorValue::new(std::io::Error::other("x")));
        sink.assert_error::<std::io::Error>();
        sink.assert_no_values();
    }

    #[test]
    #[should_panic(expected = "expected no terminal event")]
    fn test_assert_no_terminal_event_panics_after_complete() {
        let mut sink = TestSink::<i32>::new();
        sink.on_complete();
        sink.assert_no_terminal_event();
    }

    #[tokio::test]
    async fn test_await_terminal_event_sees_late_completion() {
        let sink = TestSink::<i32>::new();
        let mut writer = sink.clone();
        let worker = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            writer.on_complete();
        });

        assert!(sink.await_terminal_event_for(Duration::from_secs(5)).await);
        worker.join().unwrap();
    }

    #[test]
    fn test_terminal_count_matches_recording_across_threads() {
        let sink = TestSink::<u32>::new();
        let mut writer = sink.clone();
        let worker = std::thread::spawn(move || {
            for i in 0..500 {
                writer.on_next(i);
                writer.on_complete();
            }
        });

        while !worker.is_finished() {
            // terminal counter is never behind the recording it summarizes
            let count = sink.terminal_count();
            assert!(count <= sink.completions());
            let completions = sink.completions();
            assert!(sink.terminal_count() >= completions);
        }
        worker.join().unwrap();
        assert_eq!(sink.terminal_count(), 500);
        assert_eq!(sink.completions(), 500);
    }

    #[tokio::test]
    async fn test_await_terminal_event_without_deadline() {
        let cfg = Config {
            terminal_timeout: Duration::ZERO,
            ..Config::default()
        };
        let sink = TestSink::<i32>::with_config(&cfg);
        let mut writer = sink.clone();
        let worker = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            writer.on_error(ErrorValue::msg("late"));
        });

        assert!(sink.await_terminal_event().await);
        worker.join().unwrap();
        assert_eq!(sink.errors().len(), 1);
    }

    #[tokio::test]
    async fn test_quiet_window_passes_without_terminal() {
        let mut sink = TestSink::<i32>::new();
        sink.on_next(1);
        sink.assert_quiet_for(Duration::from_millis(50)).await;
        assert!(!sink.await_terminal_event_for(Duration::from_millis(10)).await);
    }
}
