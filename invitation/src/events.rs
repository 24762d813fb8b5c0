//! Notification events handed to the broker.
//!
//! A [`NotificationEvent`] describes an email the notification service should
//! send. It is not persisted anywhere: once the broker has it, the invitation
//! service forgets it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Email notification intent.
///
/// Wire format (JSON body of the broker message):
///
/// ```json
/// {
///   "recipient": "a@x.com",
///   "subject": "You're invited to join Prism ERP",
///   "template_name": "invitation.html",
///   "template_data": {"InvitationLink": "...", "RecipientEmail": "a@x.com"}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Recipient email address.
    pub recipient: String,

    /// Email subject.
    pub subject: String,

    /// Template to render.
    pub template_name: String,

    /// Values substituted into the template.
    pub template_data: Map<String, Value>,
}

impl NotificationEvent {
    /// Create an event with empty template data.
    #[must_use]
    pub fn new(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        template_name: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            subject: subject.into(),
            template_name: template_name.into(),
            template_data: Map::new(),
        }
    }

    /// Add a template variable.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.template_data.insert(key.into(), value.into());
        self
    }

    /// Read a template variable as a string.
    #[must_use]
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.template_data.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_uses_snake_case_fields() {
        let event = NotificationEvent::new("a@x.com", "Hello", "invitation.html")
            .with_data("InvitationLink", "https://example.com/accept?token=t");

        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "recipient": "a@x.com",
                "subject": "Hello",
                "template_name": "invitation.html",
                "template_data": {"InvitationLink": "https://example.com/accept?token=t"}
            })
        );
    }

    #[test]
    fn test_data_str() {
        let event = NotificationEvent::new("a@x.com", "Hello", "t.html")
            .with_data("Role", "admin")
            .with_data("Count", 3);

        assert_eq!(event.data_str("Role"), Some("admin"));
        assert_eq!(event.data_str("Count"), None);
        assert_eq!(event.data_str("Missing"), None);
    }
}
