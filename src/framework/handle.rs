//! # Request Handles
//!
//! A [`RequestHandle`] represents one outstanding call made on behalf of an editor. The
//! controller keeps the handle; the spawned call task keeps a clone of its [`CancelToken`].
//!
//! Cancellation works at two layers:
//!
//! - **Transport**: [`CancelToken::run`] races the call against the token and drops the call
//!   future as soon as the token fires. This is best-effort: the remote side may still see it.
//! - **State**: when a completion comes back, the controller checks that the handle is still
//!   the live one and was never cancelled before applying anything. This check is strict.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Returned by [`CancelToken::run`] when the call was cancelled before it resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Request cancelled")]
pub struct Cancelled;

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Cheap, cloneable view of a handle's cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    state: Arc<CancelState>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::Acquire)
    }

    /// Resolves once the token has been cancelled.
    pub async fn cancelled(&self) {
        // `notified()` registers for `notify_waiters` as soon as it is created.
        let notified = self.state.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }

    /// Drives `call` to completion unless the token fires first.
    pub async fn run<F>(&self, call: F) -> Result<F::Output, Cancelled>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(Cancelled),
            output = call => {
                if self.is_cancelled() {
                    Err(Cancelled)
                } else {
                    Ok(output)
                }
            }
        }
    }

    fn cancel(&self) -> bool {
        let first = !self.state.cancelled.swap(true, Ordering::AcqRel);
        if first {
            self.state.notify.notify_waiters();
        }
        first
    }
}

/// One in-flight call plus the means to revoke it.
#[derive(Debug)]
pub struct RequestHandle {
    id: u64,
    token: CancelToken,
}

impl RequestHandle {
    pub fn create(id: u64) -> Self {
        Self {
            id,
            token: CancelToken::default(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Token to hand to the outgoing call.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Revokes the call. Returns `true` only for the call that actually cancelled;
    /// calling it again, or after the call completed, is harmless.
    pub fn cancel(&self) -> bool {
        self.token.cancel()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// True when a completion tagged with `id` may still be applied.
    pub fn accepts(&self, id: u64) -> bool {
        self.id == id && !self.is_cancelled()
    }
}
