//! # Sinks: the receiving side of a scripted stream.
//!
//! This module provides the [`Sink`] trait and the sinks the crate ships.
//!
//! ## Architecture
//! ```text
//! Producer::call(sink)
//!     │
//!     ├── attach_unsafe ─────────────────────────► user sink
//!     └── attach ───────► GuardedSink ───────────► user sink
//!                         (drops after terminal)
//! ```
//!
//! ## Sink types
//! - [`GuardedSink`] - contract guard used by the guarded attach
//! - [`TestSink`] - recording sink with assertions and async waits
//! - `LogSink` - stdout printer decorator (feature `logging`)

#[cfg(feature = "logging")]
mod log;
mod guard;
mod sink;
mod test_sink;

pub use guard::GuardedSink;
#[cfg(feature = "logging")]
pub use log::LogSink;
pub use sink::Sink;
pub use test_sink::TestSink;
