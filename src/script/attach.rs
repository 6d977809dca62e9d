//! # Attaching producers to sinks.
//!
//! Two ways to connect a [`Producer`] to a [`Sink`]:
//!
//! | Function                          | Contract enforcement          | Runs on           |
//! |-----------------------------------|-------------------------------|-------------------|
//! | [`attach`]                        | at most one terminal, then none | caller's thread |
//! | [`attach_unsafe`]                 | none, every step delivered    | caller's thread   |
//! | [`spawn_attach`]                  | as `attach`                   | tokio blocking pool |
//! | [`spawn_attach_unsafe`]           | as `attach_unsafe`            | tokio blocking pool |
//!
//! The `spawn_*` variants must be called from within a tokio runtime.
//! Replay faults ([`ReplayError`]) are returned as-is in every variant.

use tokio::task::JoinHandle;

use crate::error::ReplayError;
use crate::script::Producer;
use crate::sinks::{GuardedSink, Sink};

/// Replays `producer` into `sink`, enforcing the single-terminal contract.
pub fn attach<T: Clone>(producer: &Producer<T>, sink: &mut dyn Sink<T>) -> Result<(), ReplayError> {
    let mut guard = GuardedSink::new(sink);
    let res = producer.call(&mut guard);
    if guard.dropped() > 0 {
        tracing::debug!(
            dropped = guard.dropped(),
            "guarded attach dropped callbacks after terminal event"
        );
    }
    res
}

/// Replays `producer` into `sink` with no contract enforcement.
pub fn attach_unsafe<T: Clone>(
    producer: &Producer<T>,
    sink: &mut dyn Sink<T>,
) -> Result<(), ReplayError> {
    producer.call(sink)
}

/// Runs [`attach`] on the tokio blocking pool.
///
/// The sink is moved into the worker; keep a clone (e.g. of a
/// [`TestSink`](crate::TestSink)) to inspect what it received.
pub fn spawn_attach<T, S>(producer: Producer<T>, mut sink: S) -> JoinHandle<Result<(), ReplayError>>
where
    T: Clone + Send + Sync + 'static,
    S: Sink<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || attach(&producer, &mut sink))
}

/// Runs [`attach_unsafe`] on the tokio blocking pool.
pub fn spawn_attach_unsafe<T, S>(
    producer: Producer<T>,
    mut sink: S,
) -> JoinHandle<Result<(), ReplayError>>
where
    T: Clone + Send + Sync + 'static,
    S: Sink<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || attach_unsafe(&producer, &mut sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use crate::events::{ErrorValue, Notification};
    use crate::script::{ScriptBuilder, UnsafeScriptBuilder};
    use crate::sinks::TestSink;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_completion_on_worker_thread() {
        let producer = ScriptBuilder::<String>::that_starts().then_completes();
        let sink = TestSink::<String>::new();

        let handle = spawn_attach(producer, sink.clone());
        assert!(sink.await_terminal_event().await);
        handle.await.unwrap().unwrap();

        sink.assert_no_errors();
        sink.assert_no_values();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_never_completes_stays_quiet() {
        let producer = ScriptBuilder::<String>::that_starts().then_never_completes();
        let sink = TestSink::<String>::new();

        spawn_attach(producer, sink.clone()).await.unwrap().unwrap();
        sink.assert_quiet_for(Duration::from_millis(200)).await;
        sink.assert_no_errors();
        sink.assert_no_values();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_emit_without_terminal_is_observed() {
        let producer = ScriptBuilder::new().emit("X").then_never_completes();
        let sink = TestSink::<&str>::new();

        let _handle = spawn_attach(producer, sink.clone());
        sink.assert_quiet_for(Duration::from_millis(200)).await;
        sink.assert_values(&["X"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_error_on_worker_thread() {
        let producer = ScriptBuilder::<String>::that_starts()
            .error(ErrorValue::new(std::io::Error::other("io")))
            .then_completes();
        let sink = TestSink::<String>::new();

        let _handle = spawn_attach(producer, sink.clone());
        assert!(sink.await_terminal_event().await);
        sink.assert_error::<std::io::Error>();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_wait_delays_terminal_event() {
        let producer = ScriptBuilder::<String>::that_starts()
            .sleep(Duration::from_millis(300))
            .then_completes();
        let sink = TestSink::<String>::new();

        let started = Instant::now();
        let _handle = spawn_attach(producer, sink.clone());
        assert!(sink.await_terminal_event().await);
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_unsafe_spawn_delivers_everything() {
        let producer = UnsafeScriptBuilder::new()
            .complete()
            .complete()
            .emit(3)
            .build();
        let sink = TestSink::<i32>::new();

        spawn_attach_unsafe(producer, sink.clone())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            sink.notifications(),
            vec![
                Notification::Complete,
                Notification::Complete,
                Notification::Next(3)
            ]
        );
    }

    #[test]
    fn test_guarded_hello_then_complete() {
        let producer = ScriptBuilder::new().emit("Hello").then_completes();
        let mut sink = TestSink::<&str>::new();
        attach(&producer, &mut sink).unwrap();

        sink.assert_values(&["Hello"]);
        sink.assert_completed();
        assert_eq!(sink.terminal_count(), 1);
    }
}
