//! Stored invitation record.

use crate::error::{InvitationError, Result};
use serde::{Deserialize, Serialize};

/// Attributes needed to complete onboarding once the invitee accepts.
///
/// Stored as JSON under the hashed token key:
///
/// ```json
/// {"email": "a@x.com", "role": "admin", "tenantID": "tenant-1"}
/// ```
///
/// Records are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationRecord {
    /// Invitee email address.
    pub email: String,

    /// Role granted on acceptance.
    pub role: String,

    /// Tenant the invitee joins.
    #[serde(rename = "tenantID")]
    pub tenant_id: String,
}

impl InvitationRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        role: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            role: role.into(),
            tenant_id: tenant_id.into(),
        }
    }

    /// Encode for storage.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| InvitationError::Serialization(e.to_string()))
    }

    /// Decode a stored payload.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationError::Serialization`] if the payload is not a valid record.
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| InvitationError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;

    #[test]
    fn test_json_layout() {
        let record = InvitationRecord::new("a@x.com", "admin", "tenant-1");
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"email": "a@x.com", "role": "admin", "tenantID": "tenant-1"})
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = InvitationRecord::from_json("not json").unwrap_err();
        assert!(err.is_store_error());
    }

    #[test]
    fn test_decode_requires_tenant() {
        let err = InvitationRecord::from_json(r#"{"email":"a@x.com","role":"admin"}"#).unwrap_err();
        assert!(matches!(err, InvitationError::Serialization(_)));
    }
}
