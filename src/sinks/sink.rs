//! # Stream sink trait.
//!
//! [`Sink`] is the receiving end of a push stream: the four callbacks a producer
//! drives while replaying a script.
//!
//! ## Contract (as enforced by [`attach`](crate::attach))
//! ```text
//! on_start? ─► on_next* ─► (on_error | on_complete)?
//! ```
//! A guarded attach delivers at most one terminal callback and nothing after it.
//! [`attach_unsafe`](crate::attach_unsafe) delivers every scripted callback as-is,
//! so a sink used with it must tolerate repeated terminals and late items.
//!
//! ## Example
//! ```rust
//! use rxscript::{ErrorValue, Sink};
//!
//! #[derive(Default)]
//! struct Count { items: usize, done: bool }
//!
//! impl Sink<u32> for Count {
//!     fn on_next(&mut self, _item: u32) { self.items += 1; }
//!     fn on_error(&mut self, _err: ErrorValue) { self.done = true; }
//!     fn on_complete(&mut self) { self.done = true; }
//! }
//! ```

use crate::events::ErrorValue;

/// Receiver of stream callbacks.
pub trait Sink<T> {
    /// Stream initialization. Default: no-op.
    fn on_start(&mut self) {}

    /// One emitted item.
    fn on_next(&mut self, item: T);

    /// Terminal failure.
    fn on_error(&mut self, err: ErrorValue);

    /// Terminal success.
    fn on_complete(&mut self);
}

impl<T, S> Sink<T> for &mut S
where
    S: Sink<T> + ?Sized,
{
    fn on_start(&mut self) {
        (**self).on_start();
    }

    fn on_next(&mut self, item: T) {
        (**self).on_next(item);
    }

    fn on_error(&mut self, err: ErrorValue) {
        (**self).on_error(err);
    }

    fn on_complete(&mut self) {
        (**self).on_complete();
    }
}

impl<T, S> Sink<T> for Box<S>
where
    S: Sink<T> + ?Sized,
{
    fn on_start(&mut self) {
        (**self).on_start();
    }

    fn on_next(&mut self, item: T) {
        (**self).on_next(item);
    }

    fn on_error(&mut self, err: ErrorValue) {
        (**self).on_error(err);
    }

    fn on_complete(&mut self) {
        (**self).on_complete();
    }
}
