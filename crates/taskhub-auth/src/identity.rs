//! Who is making a request.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Organization roles, from most to least privileged.
///
/// Authorization checks membership in an explicit set of roles, never a
/// threshold, so the ordering here is informational only.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Owner,
    Manager,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "OWNER",
            Role::Manager => "MANAGER",
            Role::User => "USER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The verified caller, rebuilt from the bearer token on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: Uuid,
    pub email: String,
    /// Organization the caller belongs to. Users registered without one can
    /// authenticate but cannot reach tenant-scoped routes.
    pub tenant_id: Option<Uuid>,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_screaming_case() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), r#""OWNER""#);
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), r#""MANAGER""#);
        let role: Role = serde_json::from_str(r#""USER""#).unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(serde_json::from_str::<Role>(r#""ADMIN""#).is_err());
        assert!(serde_json::from_str::<Role>(r#""owner""#).is_err());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Manager.to_string(), "MANAGER");
        assert_eq!(Role::default(), Role::User);
    }
}
