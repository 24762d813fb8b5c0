//! Invitation constants.
//!
//! Wire-level names shared with the notification service and the cache layout.

/// Prefix of every invitation key in the store.
pub const STORAGE_KEY_PREFIX: &str = "invitation:";

/// Default invitation lifetime in hours (7 days).
pub const DEFAULT_TTL_HOURS: u64 = 168;

/// Notification broker naming.
pub mod notifications {
    /// Exchange the notification service consumes from.
    pub const EXCHANGE: &str = "prism_notifications_exchange";

    /// Routing key for email notifications.
    pub const ROUTING_KEY: &str = "email_notification";

    /// Content type of published event bodies.
    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// Email template rendered for invitations.
    pub const INVITATION_TEMPLATE: &str = "invitation.html";

    /// Subject line of invitation emails.
    pub const INVITATION_SUBJECT: &str = "You're invited to join Prism ERP";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_constants() {
        assert_eq!(notifications::EXCHANGE, "prism_notifications_exchange");
        assert_eq!(notifications::ROUTING_KEY, "email_notification");
        assert_eq!(notifications::CONTENT_TYPE_JSON, "application/json");
    }

    #[test]
    fn test_default_ttl_is_one_week() {
        assert_eq!(DEFAULT_TTL_HOURS, 7 * 24);
    }
}
