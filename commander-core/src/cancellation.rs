//! Cooperative cancellation.
//!
//! A [`CancellationToken`] is a cheap handle over shared cancellation state.
//! Every clone observes the same state, so the token a caller hands to an
//! adapter is the token each decorator and the handler see.

use crate::error::{CommandError, CommandResult};
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tokio::sync::Notify;

struct State {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Shared, cloneable cancellation signal.
///
/// # Example
///
/// ```rust
/// use commander_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let observer = token.clone();
/// assert!(!observer.is_cancelled());
///
/// token.cancel();
/// assert!(observer.is_cancelled());
/// assert!(observer.check().is_err());
/// ```
#[derive(Clone)]
pub struct CancellationToken {
    state: Arc<State>,
}

impl CancellationToken {
    /// Create a token that has not been signaled.
    pub fn new() -> Self {
        Self {
            state: Arc::new(State {
                cancelled: AtomicBool::new(false),
                notify: Notify::new(),
            }),
        }
    }

    /// A token nobody intends to cancel.
    pub fn none() -> Self {
        Self::new()
    }

    /// Create a token that is already signaled.
    pub fn cancelled() -> Self {
        let token = Self::new();
        token.cancel();
        token
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        if !self.state.cancelled.swap(true, Ordering::AcqRel) {
            self.state.notify.notify_waiters();
        }
    }

    /// Returns `true` once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::Acquire)
    }

    /// Fail with [`CommandError::Cancelled`] if cancellation has been requested.
    pub fn check(&self) -> CommandResult<()> {
        if self.is_cancelled() {
            Err(CommandError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Resolves once cancellation has been requested.
    pub async fn wait(&self) {
        loop {
            // Register before re-checking so a concurrent `cancel` is not missed.
            let notified = self.state.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }

    /// Returns `true` if both handles share the same cancellation state.
    pub fn same_as(&self, other: &CancellationToken) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
