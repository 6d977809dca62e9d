//! # Event script engine.
//!
//! Turns an ordered list of declared events into a replayable [`Producer`].
//!
//! ## Architecture
//! ```text
//! ScriptBuilder / UnsafeScriptBuilder
//!     │  emit / error / sleep / perform / ...
//!     ▼
//! EventSequence ──build()──► Producer (snapshot, Arc<[Event]>)
//!                                │
//!                   attach ──────┼────── attach_unsafe
//!               (GuardedSink)    │     (no enforcement)
//!                                ▼
//!                              Sink
//! ```
//!
//! ## Rules
//! - Builders only accumulate; they validate nothing beyond what the types enforce.
//! - `build()` snapshots. Appending afterwards never changes a built producer.
//! - The guarded builder relies on [`attach`] for contract enforcement; it never
//!   filters events itself.

mod attach;
mod builder;
mod producer;
mod unsafe_builder;

pub use attach::{attach, attach_unsafe, spawn_attach, spawn_attach_unsafe};
pub use builder::ScriptBuilder;
pub use producer::Producer;
pub use unsafe_builder::UnsafeScriptBuilder;
