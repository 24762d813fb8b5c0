//! Invitation service configuration.
//!
//! Values are provided by the application once at startup and handed to
//! [`InvitationService::new`](crate::service::InvitationService::new); nothing
//! in this crate reads process-wide state.

use crate::constants::{DEFAULT_TTL_HOURS, notifications};
use std::time::Duration;

/// Invitation lifecycle configuration.
#[derive(Debug, Clone)]
pub struct InvitationConfig {
    /// Invitation lifetime in hours.
    ///
    /// Default: 168 hours (7 days)
    pub ttl_hours: u64,

    /// Acceptance page the invitee lands on.
    ///
    /// Links are formatted as: `{accept_url}?token={token}`
    pub accept_url: String,

    /// Subject of the invitation email.
    pub subject: String,

    /// Template the notification service renders.
    pub template_name: String,
}

impl InvitationConfig {
    /// Create new invitation configuration.
    ///
    /// # Arguments
    ///
    /// * `accept_url` - Acceptance page (e.g., "https://app.prismerp.com/accept-invitation")
    #[must_use]
    pub fn new(accept_url: impl Into<String>) -> Self {
        Self {
            accept_url: accept_url.into(),
            ..Self::default()
        }
    }

    /// Set invitation lifetime.
    #[must_use]
    pub const fn with_ttl_hours(mut self, hours: u64) -> Self {
        self.ttl_hours = hours;
        self
    }

    /// Set the email subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the email template.
    #[must_use]
    pub fn with_template_name(mut self, template_name: impl Into<String>) -> Self {
        self.template_name = template_name.into();
        self
    }

    /// Invitation lifetime as a [`Duration`].
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours.saturating_mul(3600))
    }

    /// Acceptance link for a token.
    #[must_use]
    pub fn acceptance_link(&self, token: &str) -> String {
        format!("{}?token={token}", self.accept_url)
    }
}

impl Default for InvitationConfig {
    fn default() -> Self {
        Self {
            ttl_hours: DEFAULT_TTL_HOURS,
            accept_url: "https://app.prismerp.com/accept-invitation".to_string(),
            subject: notifications::INVITATION_SUBJECT.to_string(),
            template_name: notifications::INVITATION_TEMPLATE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invitation_config_builder() {
        let config = InvitationConfig::new("https://example.com/accept")
            .with_ttl_hours(1)
            .with_subject("Join us")
            .with_template_name("invite.html");

        assert_eq!(config.accept_url, "https://example.com/accept");
        assert_eq!(config.ttl(), Duration::from_secs(3600));
        assert_eq!(config.subject, "Join us");
        assert_eq!(config.template_name, "invite.html");
    }

    #[test]
    fn test_default_config() {
        let config = InvitationConfig::default();
        assert_eq!(config.ttl_hours, 168);
        assert_eq!(config.ttl(), Duration::from_secs(168 * 3600));
        assert_eq!(config.template_name, "invitation.html");
    }

    #[test]
    fn test_acceptance_link() {
        let config = InvitationConfig::new("https://app.example.com/accept-invitation");
        assert_eq!(
            config.acceptance_link("abc"),
            "https://app.example.com/accept-invitation?token=abc"
        );
    }
}
