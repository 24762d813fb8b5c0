//! Event publisher trait.

use crate::context::RequestContext;
use crate::error::Result;
use crate::events::NotificationEvent;

/// Durable producer of notification events.
///
/// # Implementation Notes
///
/// - Messages must be marked persistent so they survive a broker restart
/// - The target exchange is declared idempotently before first use
/// - Each call is bounded by its own timeout on top of the request deadline
/// - Broker channels are generally not safe for unsynchronized concurrent
///   publishes; implementations must serialize access explicitly
/// - No retries: a failed publish is reported once and left to operations
pub trait EventPublisher: Send + Sync {
    /// Hand an event to the broker.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The event cannot be serialized
    /// - The broker rejects or does not confirm the message
    /// - The per-call timeout or the request deadline passes
    fn enqueue(
        &self,
        ctx: &RequestContext,
        event: &NotificationEvent,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Release the channel, then the connection.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationError::Close`](crate::error::InvitationError::Close)
    /// aggregating every teardown failure.
    fn close(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}
