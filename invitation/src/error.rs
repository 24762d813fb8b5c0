//! Error types for the invitation lifecycle.

use std::fmt;
use thiserror::Error;

/// Result type alias for invitation operations.
pub type Result<T> = std::result::Result<T, InvitationError>;

/// Error taxonomy for invitation issuance, redemption and dispatch.
///
/// Validation misses are collapsed into a single [`InvitationError::InvalidOrExpired`]
/// variant: an absent key, an expired key and an already redeemed key all look
/// the same to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvitationError {
    // ═══════════════════════════════════════════════════════════
    // Redemption
    // ═══════════════════════════════════════════════════════════

    /// Token is unknown, expired, or already redeemed.
    #[error("Invitation is invalid or has expired")]
    InvalidOrExpired,

    // ═══════════════════════════════════════════════════════════
    // Storage
    // ═══════════════════════════════════════════════════════════

    /// The invitation store could not be reached or rejected the command.
    #[error("Store error: {0}")]
    Store(String),

    /// An invitation record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ═══════════════════════════════════════════════════════════
    // Notification dispatch
    // ═══════════════════════════════════════════════════════════

    /// Could not connect to a backing service.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The broker did not accept a notification event.
    #[error("Publish failed: {0}")]
    Publish(String),

    /// Tearing down the publisher failed.
    #[error(transparent)]
    Close(#[from] CloseError),

    // ═══════════════════════════════════════════════════════════
    // Request lifetime
    // ═══════════════════════════════════════════════════════════

    /// The originating request was cancelled.
    #[error("{operation} cancelled")]
    Cancelled {
        /// Operation that was interrupted
        operation: &'static str,
    },

    /// The operation did not finish before its deadline.
    #[error("{operation} exceeded its deadline")]
    DeadlineExceeded {
        /// Operation that timed out
        operation: &'static str,
    },
}

impl InvitationError {
    /// Returns `true` for failures of the invitation store, including
    /// (de)serialization of the stored record.
    ///
    /// # Examples
    ///
    /// ```
    /// # use prism_invitation::InvitationError;
    /// assert!(InvitationError::Store("refused".into()).is_store_error());
    /// assert!(InvitationError::Serialization("eof".into()).is_store_error());
    /// assert!(!InvitationError::InvalidOrExpired.is_store_error());
    /// ```
    #[must_use]
    pub const fn is_store_error(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Serialization(_))
    }

    /// Returns `true` if the token did not redeem.
    #[must_use]
    pub const fn is_invalid_or_expired(&self) -> bool {
        matches!(self, Self::InvalidOrExpired)
    }
}

/// Aggregated failure from closing a publisher's channel and connection.
///
/// Both teardown steps are always attempted. The display form reports the
/// first failure and appends the second one when both failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseError {
    /// Failure while closing the channel, if any.
    pub channel: Option<String>,
    /// Failure while closing the connection, if any.
    pub connection: Option<String>,
}

impl CloseError {
    /// Build a close error from the outcome of both teardown steps.
    ///
    /// Returns `None` if neither step failed.
    #[must_use]
    pub fn from_parts(channel: Option<String>, connection: Option<String>) -> Option<Self> {
        if channel.is_none() && connection.is_none() {
            return None;
        }
        Some(Self {
            channel,
            connection,
        })
    }

    /// The failure that happened first in teardown order.
    #[must_use]
    pub fn first(&self) -> &str {
        self.channel
            .as_deref()
            .or(self.connection.as_deref())
            .unwrap_or_default()
    }
}

impl fmt::Display for CloseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.channel, &self.connection) {
            (Some(channel), Some(connection)) => write!(
                f,
                "Failed to close channel: {channel} (also failed to close connection: {connection})"
            ),
            (Some(channel), None) => write!(f, "Failed to close channel: {channel}"),
            (None, Some(connection)) => write!(f, "Failed to close connection: {connection}"),
            (None, None) => write!(f, "Close failed"),
        }
    }
}

impl std::error::Error for CloseError {}
