//! Script vocabulary: events, payloads and sequences.
//!
//! ## Contents
//! - [`Event`] closed set of scripted steps (start/next/error/complete/sleep/action)
//! - [`ErrorValue`] shared error payload for `Error` events
//! - [`Notification`] a single sink callback as a value
//! - [`EventSequence`] ordered, append-only accumulation used by builders
//!
//! See `script/mod.rs` for how sequences become producers.

mod error_value;
mod event;
mod notification;
mod sequence;

pub use error_value::ErrorValue;
pub use event::{ActionFn, Event};
pub use notification::Notification;
pub use sequence::EventSequence;
