//! # rxscript
//!
//! **rxscript** scripts push-stream producers for tests and tracks
//! subscriptions weakly so they can be cancelled together.
//!
//! It provides two independent building blocks:
//! - a scripted event engine: declare `start / next / error / complete /
//!   sleep / action` steps once, replay them into any [`Sink`] as often as needed;
//! - a dispose bag: a [`Tracker`] that holds cancellable handles by weak
//!   reference and cancels every live one in a single pass.
//!
//! ## Architecture
//! ### Script engine
//! ```text
//!  ┌───────────────────┐    ┌───────────────────────┐
//!  │   ScriptBuilder   │    │  UnsafeScriptBuilder  │
//!  │ (well-formed use) │    │ (contract violations) │
//!  └─────────┬─────────┘    └───────────┬───────────┘
//!            ▼                          ▼
//!     ┌──────────────────────────────────────────┐
//!     │ EventSequence (ordered, append-only)     │
//!     └────────────────────┬─────────────────────┘
//!                          ▼ build() (snapshot)
//!     ┌──────────────────────────────────────────┐
//!     │ Producer (Arc<[Event]>, replayable)      │
//!     └──────┬──────────────────────────┬────────┘
//!            ▼ attach                   ▼ attach_unsafe
//!      ┌─────────────┐                  │
//!      │ GuardedSink │                  │
//!      │ (1 terminal)│                  │
//!      └──────┬──────┘                  │
//!             ▼                         ▼
//!     ┌──────────────────────────────────────────┐
//!     │ Sink (TestSink, LogSink, user sinks)     │
//!     └──────────────────────────────────────────┘
//! ```
//!
//! ### Tracker
//! ```text
//! HandleRef (Arc<dyn Handle>) ──add()──► Tracker: Mutex<Vec<Weak<dyn Handle>>>
//!        │ dropped by owner                 │
//!        └──────► entry pruned ◄────────────┤
//!                                           ▼ dispose_all()
//!                        cancel() every live, not-yet-cancelled handle
//!                        clear storage, aggregate failures ─► DisposeError
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                              |
//! |-------------------|---------------------------------------------------------------|-------------------------------------------------|
//! | **Events**        | Scripted steps and their payloads.                            | [`Event`], [`ErrorValue`], [`Notification`]     |
//! | **Builders**      | Accumulate scripts, guarded or deliberately unguarded.        | [`ScriptBuilder`], [`UnsafeScriptBuilder`]      |
//! | **Replay**        | Replay scripts on the caller's thread or the blocking pool.   | [`Producer`], [`attach`], [`spawn_attach`]      |
//! | **Sinks**         | Receiving side, with a recording sink for assertions.         | [`Sink`], [`TestSink`], [`GuardedSink`]         |
//! | **Tracking**      | Weak handle bag with bulk cancellation.                       | [`Tracker`], [`Handle`], [`CancelFn`]           |
//! | **Errors**        | Typed replay and disposal errors.                             | [`ReplayError`], [`CancelError`], [`DisposeError`] |
//! | **Configuration** | Wait windows and tracker sizing.                              | [`Config`]                                      |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogSink`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use rxscript::{spawn_attach, CancelFn, Handle, ScriptBuilder, TestSink, Tracker};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Script: one item, a short pause, then completion.
//!     let producer = ScriptBuilder::that_starts()
//!         .emit("Hello")
//!         .sleep(Duration::from_millis(10))
//!         .then_completes();
//!
//!     // Replay on the blocking pool, observe through a shared clone.
//!     let sink = TestSink::<&str>::new();
//!     let replay = spawn_attach(producer, sink.clone());
//!     assert!(sink.await_terminal_event().await);
//!     replay.await??;
//!     sink.assert_values(&["Hello"]);
//!     sink.assert_completed();
//!
//!     // Track a subscription, then cancel everything still alive.
//!     let tracker = Tracker::new();
//!     let subscription = CancelFn::empty();
//!     tracker.add(&subscription);
//!     tracker.dispose_all()?;
//!     assert!(subscription.is_cancelled());
//!     Ok(())
//! }
//! ```
mod config;
mod error;
mod events;
mod script;
mod sinks;
mod tracker;

// ---- Public re-exports ----

pub use config::Config;
pub use error::{CancelError, DisposeError, ReplayError};
pub use events::{ActionFn, ErrorValue, Event, EventSequence, Notification};
pub use script::{
    attach, attach_unsafe, spawn_attach, spawn_attach_unsafe, Producer, ScriptBuilder,
    UnsafeScriptBuilder,
};
pub use sinks::{GuardedSink, Sink, TestSink};
pub use tracker::{CancelFn, Handle, HandleRef, Tracker};

// Optional: expose a simple built-in printer sink (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use sinks::LogSink;
