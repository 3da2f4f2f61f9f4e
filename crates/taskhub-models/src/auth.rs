//! Sign-up and sign-in bodies.

use serde::{Deserialize, Serialize};
use taskhub_auth::Role;
use taskhub_core::serde::deserialize_optional_uuid;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::users::User;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(length(min = 3, max = 50))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[validate(email)]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[validate(length(min = 6))]
    #[schema(example = "password123")]
    pub password: String,
    /// Defaults to `USER`.
    pub role: Option<Role>,
    /// Organization to join. Empty string is treated as absent.
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub organization_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignInRequest {
    #[validate(email)]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[validate(length(min = 1))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Returned by both sign-up and sign-in.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_defaults() {
        let req: SignUpRequest = serde_json::from_str(
            r#"{"name":"Jane Doe","email":"jane@example.com","password":"secret1","organization_id":""}"#,
        )
        .unwrap();
        assert!(req.role.is_none());
        assert!(req.organization_id.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_sign_up_short_name() {
        let req: SignUpRequest = serde_json::from_str(
            r#"{"name":"Jo","email":"jane@example.com","password":"secret1"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_sign_up_unknown_role() {
        let result = serde_json::from_str::<SignUpRequest>(
            r#"{"name":"Jane","email":"jane@example.com","password":"secret1","role":"ADMIN"}"#,
        );
        assert!(result.is_err());
    }
}
