//! # Cancellable handles.
//!
//! [`Handle`] is the capability the [`Tracker`](crate::Tracker) needs from a
//! subscription: ask whether it is already cancelled, and cancel it.
//! The common shared form is [`HandleRef`], an `Arc<dyn Handle>`; the tracker
//! only ever keeps a `Weak` to it.
//!
//! ## Built-in handles
//! - [`CancellationToken`] cancels the token (never fails)
//! - [`AbortHandle`] aborts the tokio task; finished tasks count as cancelled
//! - [`CancelFn`] wraps a closure and runs it at most once
//!
//! ## Example
//! ```rust
//! use rxscript::{CancelError, CancelFn, Handle, HandleRef};
//!
//! let h: HandleRef = CancelFn::arc(|| Ok::<_, CancelError>(()));
//! assert!(!h.is_cancelled());
//! h.cancel().unwrap();
//! assert!(h.is_cancelled());
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::AbortHandle;
use tokio_util::sync::CancellationToken;

use crate::error::CancelError;

/// # Cancellable resource.
///
/// Implementations must be cheap to query and safe to call from any thread.
/// `cancel` must not call back into the tracker that is disposing it.
pub trait Handle: Send + Sync + 'static {
    /// True if the resource is already cancelled.
    fn is_cancelled(&self) -> bool;

    /// Cancels the resource.
    fn cancel(&self) -> Result<(), CancelError>;
}

/// Shared handle reference (`Arc<dyn Handle>`).
pub type HandleRef = Arc<dyn Handle>;

impl Handle for CancellationToken {
    fn is_cancelled(&self) -> bool {
        CancellationToken::is_cancelled(self)
    }

    fn cancel(&self) -> Result<(), CancelError> {
        CancellationToken::cancel(self);
        Ok(())
    }
}

impl Handle for AbortHandle {
    fn is_cancelled(&self) -> bool {
        self.is_finished()
    }

    fn cancel(&self) -> Result<(), CancelError> {
        self.abort();
        Ok(())
    }
}

/// Closure-backed handle.
///
/// The closure runs on the first [`cancel`](Handle::cancel) only; the handle
/// reports cancelled from then on, even if the closure failed.
pub struct CancelFn<F> {
    cancelled: AtomicBool,
    f: F,
}

impl<F> CancelFn<F> {
    pub fn new(f: F) -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            f,
        }
    }
}

impl<F, E> CancelFn<F>
where
    F: Fn() -> Result<(), E> + Send + Sync + 'static,
    E: Into<CancelError>,
{
    /// Creates the handle and returns it as a [`HandleRef`].
    pub fn arc(f: F) -> HandleRef {
        Arc::new(Self::new(f))
    }
}

type Noop = fn() -> Result<(), CancelError>;

impl CancelFn<Noop> {
    /// A live handle whose cancellation does nothing.
    pub fn empty() -> HandleRef {
        Self::arc(|| Ok(()))
    }

    /// A handle that is already cancelled.
    pub fn cancelled() -> HandleRef {
        let handle = Self::new((|| Ok(())) as Noop);
        handle.cancelled.store(true, Ordering::Release);
        Arc::new(handle)
    }
}

impl<F, E> Handle for CancelFn<F>
where
    F: Fn() -> Result<(), E> + Send + Sync + 'static,
    E: Into<CancelError>,
{
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn cancel(&self) -> Result<(), CancelError> {
        if self.cancelled.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        (self.f)().map_err(Into::into)
    }
}

impl<F> fmt::Debug for CancelFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelFn")
            .field("cancelled", &self.cancelled.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_cancel_fn_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let h = CancelFn::arc(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(CancelError::msg("first only"))
        });

        assert!(h.cancel().is_err());
        assert!(h.cancel().is_ok());
        assert!(h.is_cancelled());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_prebuilt_handles() {
        assert!(!CancelFn::empty().is_cancelled());
        assert!(CancelFn::cancelled().is_cancelled());
    }

    #[test]
    fn test_token_handle() {
        let token = CancellationToken::new();
        let child = token.child_token();
        let h: HandleRef = Arc::new(token);
        h.cancel().unwrap();
        assert!(h.is_cancelled());
        assert!(child.is_cancelled());
    }

    #[tokio::test]
    async fn test_abort_handle() {
        let task = tokio::spawn(std::future::pending::<()>());
        let h: HandleRef = Arc::new(task.abort_handle());
        h.cancel().unwrap();
        assert!(task.await.unwrap_err().is_cancelled());
        assert!(h.is_cancelled());
    }
}
