//! Organization members.
//!
//! The password hash lives in the same table but is never part of [`User`];
//! the sign-in path reads it with a dedicated query.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_auth::{Identity, Role};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub organization_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// The identity a token issued to this user carries.
    pub fn identity(&self) -> Identity {
        Identity {
            subject_id: self.id,
            email: self.email.clone(),
            tenant_id: self.organization_id,
            role: self.role,
        }
    }
}

/// Body of `POST /users`. The member always joins the caller's organization.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 3, max = 50))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[validate(email)]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    /// Defaults to `USER`.
    pub role: Option<Role>,
}

/// Body of `PATCH /users/{id}`.
///
/// Only profile fields are accepted; role and organization cannot be changed
/// through self-service.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserDto {
    #[validate(length(min = 3, max = 50))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6))]
    pub password: Option<String>,
}

impl UpdateUserDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_rejects_role_field() {
        let result = serde_json::from_str::<UpdateUserDto>(r#"{"name":"Jane","role":"OWNER"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_validation() {
        let dto = UpdateUserDto {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());

        let dto = UpdateUserDto {
            name: Some("Jane Doe".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
        assert!(!dto.is_empty());
        assert!(UpdateUserDto::default().is_empty());
    }

    #[test]
    fn test_create_password_min_length() {
        let dto = CreateUserDto {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "12345".to_string(),
            role: None,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_user_identity() {
        let now = chrono::Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            role: Role::Manager,
            organization_id: Some(Uuid::new_v4()),
            created_at: now,
            updated_at: now,
        };
        let identity = user.identity();
        assert_eq!(identity.subject_id, user.id);
        assert_eq!(identity.tenant_id, user.organization_id);
        assert_eq!(identity.role, Role::Manager);
    }
}
