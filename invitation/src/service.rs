//! Invitation lifecycle orchestration.
//!
//! # Flow
//!
//! ```text
//! create_invitation:  generate → hash → put(key, record, ttl) → enqueue(event) → token
//! validate_invitation: hash → take(key) → record
//! ```
//!
//! An invitation is `Issued` once stored, and leaves that state exactly once:
//! either it is redeemed (the key is atomically removed) or its TTL elapses.
//!
//! # Security
//!
//! - Only the SHA-256 digest of a token is stored or logged
//! - Redemption is single-use, even under concurrent attempts
//! - Unknown, expired and already redeemed tokens are indistinguishable

use crate::config::InvitationConfig;
use crate::context::RequestContext;
use crate::error::{InvitationError, Result};
use crate::events::NotificationEvent;
use crate::providers::{EventPublisher, InvitationStore, TokenGenerator};
use crate::record::InvitationRecord;
use crate::token::hash_token;
use chrono::{SecondsFormat, Utc};

/// Issues and redeems single-use invitations.
///
/// # Type Parameters
///
/// - `G`: Token generator
/// - `S`: Invitation store
/// - `P`: Event publisher
///
/// The service holds no per-invitation state of its own; it is safe to share
/// behind an `Arc` across request handlers.
#[derive(Debug, Clone)]
pub struct InvitationService<G, S, P>
where
    G: TokenGenerator,
    S: InvitationStore,
    P: EventPublisher,
{
    generator: G,
    store: S,
    publisher: P,
    config: InvitationConfig,
}

impl<G, S, P> InvitationService<G, S, P>
where
    G: TokenGenerator,
    S: InvitationStore,
    P: EventPublisher,
{
    /// Create a new service.
    #[must_use]
    pub const fn new(generator: G, store: S, publisher: P, config: InvitationConfig) -> Self {
        Self {
            generator,
            store,
            publisher,
            config,
        }
    }

    /// Service configuration.
    #[must_use]
    pub const fn config(&self) -> &InvitationConfig {
        &self.config
    }

    /// Issue an invitation and dispatch the invitation email.
    ///
    /// Returns the plaintext token. It is not recoverable from storage.
    ///
    /// Dispatch is best-effort: once the record is stored, a publish failure
    /// is logged and the token is still returned.
    ///
    /// # Errors
    ///
    /// Returns error if the record cannot be encoded or stored, or if the
    /// request context ends first. No email is dispatched in that case.
    pub async fn create_invitation(
        &self,
        ctx: &RequestContext,
        email: &str,
        role: &str,
        tenant_id: &str,
        inviter_id: &str,
    ) -> Result<String> {
        let token = self.generator.generate();
        let hash = hash_token(&token);

        let record = InvitationRecord::new(email, role, tenant_id);
        let payload = record.to_json()?;

        if let Err(e) = self
            .store
            .put(ctx, &hash.storage_key(), &payload, self.config.ttl())
            .await
        {
            tracing::error!(
                tenant_id = %tenant_id,
                token_hash = %hash,
                error = %e,
                "Failed to store invitation"
            );
            return Err(e);
        }

        tracing::info!(
            tenant_id = %tenant_id,
            inviter_id = %inviter_id,
            token_hash = %hash,
            ttl_hours = self.config.ttl_hours,
            "Invitation issued"
        );

        let event = self.invitation_event(&token, &record, inviter_id);

        match self.publisher.enqueue(ctx, &event).await {
            Ok(()) => {
                tracing::info!(
                    tenant_id = %tenant_id,
                    token_hash = %hash,
                    recipient = %email,
                    "Invitation email enqueued"
                );
            }
            Err(e) => {
                // The invitation stays valid; the link can be re-sent out of band.
                tracing::error!(
                    tenant_id = %tenant_id,
                    token_hash = %hash,
                    recipient = %email,
                    error = %e,
                    "Failed to enqueue invitation email"
                );
            }
        }

        Ok(token)
    }

    /// Redeem a token.
    ///
    /// Consumes the invitation: a second call with the same token fails.
    ///
    /// # Errors
    ///
    /// - [`InvitationError::InvalidOrExpired`] if the token is unknown, expired
    ///   or already redeemed
    /// - Store, serialization or context errors otherwise
    pub async fn validate_invitation(
        &self,
        ctx: &RequestContext,
        token: &str,
    ) -> Result<InvitationRecord> {
        let hash = hash_token(token);

        let Some(payload) = self.store.take(ctx, &hash.storage_key()).await? else {
            tracing::info!(token_hash = %hash, "Invitation invalid or expired");
            return Err(InvitationError::InvalidOrExpired);
        };

        let record = InvitationRecord::from_json(&payload).inspect_err(|e| {
            tracing::error!(token_hash = %hash, error = %e, "Stored invitation is corrupt");
        })?;

        tracing::info!(
            tenant_id = %record.tenant_id,
            token_hash = %hash,
            "Invitation redeemed"
        );

        Ok(record)
    }

    /// Look up an invitation without consuming it.
    ///
    /// # Errors
    ///
    /// Same as [`Self::validate_invitation`].
    pub async fn inspect_invitation(
        &self,
        ctx: &RequestContext,
        token: &str,
    ) -> Result<InvitationRecord> {
        let hash = hash_token(token);

        let payload = self
            .store
            .get(ctx, &hash.storage_key())
            .await?
            .ok_or(InvitationError::InvalidOrExpired)?;

        InvitationRecord::from_json(&payload)
    }

    /// Withdraw an invitation before it is redeemed.
    ///
    /// Revoking an unknown or already redeemed token succeeds.
    ///
    /// # Errors
    ///
    /// Returns error if the store fails or the request context ends first.
    pub async fn revoke_invitation(&self, ctx: &RequestContext, token: &str) -> Result<()> {
        let hash = hash_token(token);

        self.store.delete(ctx, &hash.storage_key()).await?;

        tracing::info!(token_hash = %hash, "Invitation revoked");

        Ok(())
    }

    /// Shut down the event publisher.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationError::Close`] if teardown fails.
    pub async fn close(&self) -> Result<()> {
        self.publisher.close().await
    }

    fn invitation_event(
        &self,
        token: &str,
        record: &InvitationRecord,
        inviter_id: &str,
    ) -> NotificationEvent {
        let mut event = NotificationEvent::new(
            record.email.clone(),
            self.config.subject.clone(),
            self.config.template_name.clone(),
        )
        .with_data("InvitationLink", self.config.acceptance_link(token))
        .with_data("RecipientEmail", record.email.clone())
        .with_data("Role", record.role.clone())
        .with_data("InviterID", inviter_id);

        let expires_at = chrono::Duration::from_std(self.config.ttl())
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));
        if let Some(expires_at) = expires_at {
            event = event.with_data(
                "ExpiresAt",
                expires_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            );
        }

        event
    }
}
