//! # Error payload carried by `Error` events.
//!
//! [`ErrorValue`] is the opaque failure delivered to [`Sink::on_error`](crate::Sink::on_error).
//! It is `Arc`-backed, so scripted errors can be replayed any number of times
//! without the payload itself being `Clone`.
//!
//! Two ways to build one:
//! - [`ErrorValue::new`] from any `std::error::Error` (the concrete type name is kept);
//! - [`ErrorValue::msg`] from a plain message, for payloads that are not error types.
//!
//! ## Example
//! ```rust
//! use rxscript::ErrorValue;
//!
//! let err = ErrorValue::new(std::io::Error::other("disk gone"));
//! assert!(err.is::<std::io::Error>());
//! assert_eq!(err.message(), "disk gone");
//!
//! let plain = ErrorValue::msg("boom");
//! assert_eq!(plain.kind(), "message");
//! ```

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Shared, immutable error payload.
#[derive(Clone)]
pub struct ErrorValue {
    kind: &'static str,
    inner: Arc<dyn StdError + Send + Sync + 'static>,
}

impl ErrorValue {
    /// Wraps a concrete error, recording its type name as [`kind`](Self::kind).
    ///
    /// Passing an `ErrorValue` returns it unchanged instead of nesting it.
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        if let Some(value) = (&err as &dyn Any).downcast_ref::<ErrorValue>() {
            return value.clone();
        }
        Self {
            kind: std::any::type_name::<E>(),
            inner: Arc::new(err),
        }
    }

    /// Builds a payload from a bare message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            kind: "message",
            inner: Arc::new(Message(message.into())),
        }
    }

    /// Type name of the wrapped error, or `"message"` for [`ErrorValue::msg`].
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Display text of the wrapped error.
    pub fn message(&self) -> String {
        self.inner.to_string()
    }

    /// Returns true if the payload is an `E`.
    pub fn is<E: StdError + 'static>(&self) -> bool {
        self.inner.is::<E>()
    }

    /// Borrows the payload as an `E`, if it is one.
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    /// True when both values share the same allocation.
    ///
    /// Replays clone the `Arc`, so every delivery of one scripted error is `same_as` the original.
    pub fn same_as(&self, other: &ErrorValue) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Equal when sharing one payload, or when kind and message match.
impl PartialEq for ErrorValue {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other) || (self.kind == other.kind && self.message() == other.message())
    }
}

impl fmt::Debug for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorValue")
            .field("kind", &self.kind)
            .field("message", &self.inner.to_string())
            .finish()
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.kind, self.inner)
    }
}

impl StdError for ErrorValue {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.as_ref().source()
    }
}

#[derive(Debug)]
struct Message(String);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for Message {}
