//! Request-scoped deadline and cancellation.
//!
//! Every store and publish call receives a [`RequestContext`] derived from the
//! originating request. [`RequestContext::run`] races the I/O future against
//! both the deadline and the cancellation token, so a call never outlives the
//! request that issued it.
//!
//! # Example
//!
//! ```
//! use prism_invitation::context::RequestContext;
//! use std::time::Duration;
//!
//! # async fn example() -> prism_invitation::Result<()> {
//! let ctx = RequestContext::with_timeout(Duration::from_secs(30));
//!
//! // Publisher calls get an additional 5 second ceiling.
//! let publish_ctx = ctx.with_ceiling(Duration::from_secs(5));
//! publish_ctx.run("publish", async { Ok(()) }).await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{InvitationError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Deadline and cancellation token carried through one request.
///
/// Cloning shares the cancellation token: cancelling any clone cancels all of
/// them. Use [`RequestContext::with_ceiling`] to derive a context that can be
/// cancelled without affecting its parent.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Absolute point in time after which operations fail.
    deadline: Option<Instant>,
    /// Fired when the request is abandoned.
    cancellation: CancellationToken,
}

impl RequestContext {
    /// Context without a deadline that is only cancelled explicitly.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Context that expires `timeout` from now.
    ///
    /// A timeout too large to represent as an [`Instant`] yields a context
    /// without a deadline.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Instant::now()
            .checked_add(timeout)
            .map_or_else(Self::background, Self::with_deadline)
    }

    /// Context that expires at `deadline`.
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancellation: CancellationToken::new(),
        }
    }

    /// Derive a child context whose deadline is at most `ceiling` from now.
    ///
    /// The earlier of the parent deadline and `now + ceiling` wins. A ceiling
    /// too large to represent leaves the parent deadline in place.
    #[must_use]
    pub fn with_ceiling(&self, ceiling: Duration) -> Self {
        let capped = Instant::now().checked_add(ceiling);
        let deadline = match (self.deadline, capped) {
            (Some(parent), Some(capped)) => Some(parent.min(capped)),
            (parent, None) => parent,
            (None, capped) => capped,
        };

        Self {
            deadline,
            cancellation: self.cancellation.child_token(),
        }
    }

    /// The deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline. `None` when there is no deadline.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Cancel this context and every context derived from it.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Whether the context has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// The underlying cancellation token.
    #[must_use]
    pub const fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Run `operation` under this context.
    ///
    /// # Errors
    ///
    /// - [`InvitationError::Cancelled`] if the context is (or becomes) cancelled
    /// - [`InvitationError::DeadlineExceeded`] if the deadline passes first
    /// - Whatever error the operation itself returns
    pub async fn run<F, T>(&self, operation: &'static str, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.cancellation.is_cancelled() {
            return Err(InvitationError::Cancelled { operation });
        }

        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    biased;
                    () = self.cancellation.cancelled() => {
                        Err(InvitationError::Cancelled { operation })
                    }
                    result = tokio::time::timeout_at(deadline, future) => {
                        result.unwrap_or(Err(InvitationError::DeadlineExceeded { operation }))
                    }
                }
            }
            None => {
                tokio::select! {
                    biased;
                    () = self.cancellation.cancelled() => {
                        Err(InvitationError::Cancelled { operation })
                    }
                    result = future => result,
                }
            }
        }
    }
}
