//! # Subscription tracking.
//!
//! Collects cancellable [`Handle`]s weakly and cancels them together.
//!
//! - [`Handle`] / [`HandleRef`]: the cancellable resource and its shared form
//! - [`CancelFn`]: closure-backed handle
//! - [`Tracker`]: weak bag with bulk disposal

mod dispose_bag;
mod handle;

pub use dispose_bag::Tracker;
pub use handle::{CancelFn, Handle, HandleRef};
