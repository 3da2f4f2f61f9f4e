//! JWT payload.

use serde::{Deserialize, Serialize};
use taskhub_core::serde::deserialize_optional_uuid;
use uuid::Uuid;

use crate::identity::Role;

/// Claims carried by an access token: exactly the four identity fields plus
/// issued-at and expiry.
///
/// `organization_id` may arrive as an empty string from older clients; it is
/// read as "no organization".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub organization_id: Option<Uuid>,
    pub role: Role,
    /// Unix timestamp
    pub iat: usize,
    /// Unix timestamp
    pub exp: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let org = Uuid::new_v4();
        let claims = Claims {
            sub: "user-id-123".to_string(),
            email: "test@example.com".to_string(),
            organization_id: Some(org),
            role: Role::Manager,
            iat: 1234567800,
            exp: 1234567890,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"user-id-123""#));
        assert!(serialized.contains(r#""role":"MANAGER""#));
        assert!(serialized.contains(&org.to_string()));
    }

    #[test]
    fn test_claims_empty_organization_is_none() {
        let json = r#"{"sub":"u","email":"a@b.c","organization_id":"","role":"USER","iat":1,"exp":2}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert!(claims.organization_id.is_none());
    }

    #[test]
    fn test_claims_unknown_role_fails() {
        let json = r#"{"sub":"u","email":"a@b.c","organization_id":null,"role":"ROOT","iat":1,"exp":2}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }
}
