//! Individual request checks.
//!
//! Each check reads what earlier guards left in the request extensions. A
//! check that finds an [`Identity`] missing is wired wrong, so that case is an
//! internal error rather than an authentication failure.

use axum::{
    extract::{FromRequestParts, RawPathParams},
    http::request::Parts,
};
use taskhub_auth::{Identity, Role};
use taskhub_core::AppError;
use taskhub_db::TenantScope;
use tracing::error;
use uuid::Uuid;

use crate::middleware::auth::authenticate;
use crate::middleware::tenant::TenantSlot;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Verifies the bearer token and attaches the [`Identity`].
    Authenticate,
    /// Accepts only the listed roles. Membership, never a threshold.
    RequireRoles(&'static [Role]),
    /// Accepts only when the named path parameter equals the caller's id.
    SameIdentity(&'static str),
    /// Opens a transaction bound to the caller's organization.
    BindTenant,
}

impl Guard {
    pub fn name(&self) -> &'static str {
        match self {
            Guard::Authenticate => "authenticate",
            Guard::RequireRoles(_) => "require_roles",
            Guard::SameIdentity(_) => "same_identity",
            Guard::BindTenant => "bind_tenant",
        }
    }

    pub(crate) async fn check(&self, parts: &mut Parts, state: &AppState) -> Result<(), AppError> {
        match *self {
            Guard::Authenticate => {
                let identity = authenticate(&parts.headers, &state.tokens)?;
                parts.extensions.insert(identity);
                Ok(())
            }
            Guard::RequireRoles(allowed) => require_role(attached_identity(parts)?, allowed),
            Guard::SameIdentity(param) => {
                let target = path_param(parts, param).await?;
                require_same_identity(attached_identity(parts)?, &target)
            }
            Guard::BindTenant => {
                let tenant_id = tenant_of(attached_identity(parts)?)?;
                let scope = TenantScope::bind(&state.db, tenant_id).await.map_err(|e| {
                    error!(error = %e, "Could not bind tenant context");
                    AppError::internal_error("Failed to set tenant context".to_string())
                })?;
                parts.extensions.insert(TenantSlot::new(scope));
                Ok(())
            }
        }
    }
}

fn attached_identity(parts: &Parts) -> Result<&Identity, AppError> {
    parts.extensions.get::<Identity>().ok_or_else(|| {
        error!("Guard ran before authentication");
        AppError::internal_error("Identity missing from request context".to_string())
    })
}

async fn path_param(parts: &mut Parts, name: &str) -> Result<String, AppError> {
    let params = RawPathParams::from_request_parts(parts, &()).await.map_err(|e| {
        error!(error = %e, "Path parameters unavailable");
        AppError::internal_error("Path parameters unavailable".to_string())
    })?;

    params
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .ok_or_else(|| {
            error!(param = name, "Route has no such path parameter");
            AppError::internal_error(format!("Missing path parameter: {}", name))
        })
}

pub fn require_role(identity: &Identity, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&identity.role) {
        return Ok(());
    }

    let allowed = allowed
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    Err(AppError::forbidden(format!(
        "Access denied. Required roles: {}",
        allowed
    )))
}

/// Exact string comparison against the canonical hyphenated form of the
/// caller's id. No case folding.
pub fn require_same_identity(identity: &Identity, target: &str) -> Result<(), AppError> {
    if identity.subject_id.to_string() == target {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "You can only modify your own account".to_string(),
        ))
    }
}

/// The organization to bind. A nil id counts as absent.
pub fn tenant_of(identity: &Identity) -> Result<Uuid, AppError> {
    match identity.tenant_id {
        Some(id) if !id.is_nil() => Ok(id),
        _ => Err(AppError::forbidden(
            "No organization associated with this account".to_string(),
        )),
    }
}
