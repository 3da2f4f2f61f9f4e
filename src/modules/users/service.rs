use sqlx::PgConnection;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use taskhub_auth::Role;
use taskhub_core::errors::{is_foreign_key_violation, is_unique_violation};
use taskhub_core::{AppError, hash_password};
use taskhub_db::TenantScope;
use taskhub_models::users::{CreateUserDto, UpdateUserDto, User};

pub(crate) const USER_COLUMNS: &str =
    "id, name, email, role, organization_id, created_at, updated_at";

/// Only an owner may hand out the owner role.
fn check_grantable_role(actor_role: Role, requested: Role) -> Result<(), AppError> {
    if requested == Role::Owner && actor_role != Role::Owner {
        warn!(actor.role = %actor_role, "Attempted to grant the owner role");
        return Err(AppError::forbidden(
            "Only an owner can grant the OWNER role".to_string(),
        ));
    }
    Ok(())
}

pub struct UserService;

impl UserService {
    #[instrument(skip(scope), fields(tenant.id = %scope.tenant_id(), db.operation = "SELECT", db.table = "users"))]
    pub async fn list(scope: &mut TenantScope) -> Result<Vec<User>, AppError> {
        let tenant_id = scope.tenant_id();
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE organization_id = $1 ORDER BY created_at"
        ))
        .bind(tenant_id)
        .fetch_all(scope.conn())
        .await
        .map_err(|e| {
            error!(error = %e, "Database error listing users");
            AppError::database(e)
        })?;

        debug!(count = users.len(), "Users fetched");
        Ok(users)
    }

    #[instrument(skip(scope), fields(tenant.id = %scope.tenant_id(), db.operation = "SELECT", db.table = "users"))]
    pub async fn get(scope: &mut TenantScope, id: Uuid) -> Result<User, AppError> {
        let tenant_id = scope.tenant_id();
        find_in_tenant(scope.conn(), tenant_id, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    #[instrument(skip(scope, dto), fields(tenant.id = %scope.tenant_id(), db.operation = "INSERT", db.table = "users"))]
    pub async fn create(
        scope: &mut TenantScope,
        actor_role: Role,
        dto: CreateUserDto,
    ) -> Result<User, AppError> {
        let role = dto.role.unwrap_or_default();
        check_grantable_role(actor_role, role)?;

        let tenant_id = scope.tenant_id();
        let hashed = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password, role, organization_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed)
        .bind(role)
        .bind(tenant_id)
        .fetch_one(scope.conn())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!("Attempted to create user with existing email");
                return AppError::conflict(anyhow::anyhow!("Email already registered"));
            }
            error!(error = %e, "Database error creating user");
            AppError::database(e)
        })?;

        info!(user.id = %user.id, user.role = %user.role, "User created");
        Ok(user)
    }

    /// Applies a partial profile update. Absent fields keep their value; a new
    /// password is hashed before it is stored.
    #[instrument(skip(scope, dto), fields(tenant.id = %scope.tenant_id(), db.operation = "UPDATE", db.table = "users"))]
    pub async fn update(
        scope: &mut TenantScope,
        id: Uuid,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let tenant_id = scope.tenant_id();
        let hashed = dto.password.as_deref().map(hash_password).transpose()?;

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET name = COALESCE($1, name),
                 email = COALESCE($2, email),
                 password = COALESCE($3, password),
                 updated_at = NOW()
             WHERE id = $4 AND organization_id = $5
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed)
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(scope.conn())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::conflict(anyhow::anyhow!("Email already registered"));
            }
            error!(error = %e, "Database error updating user");
            AppError::database(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        info!(user.id = %user.id, password_changed = hashed.is_some(), "User updated");
        Ok(user)
    }

    #[instrument(skip(scope), fields(tenant.id = %scope.tenant_id(), db.operation = "DELETE", db.table = "users"))]
    pub async fn delete(scope: &mut TenantScope, id: Uuid) -> Result<User, AppError> {
        let tenant_id = scope.tenant_id();
        let user = sqlx::query_as::<_, User>(&format!(
            "DELETE FROM users WHERE id = $1 AND organization_id = $2 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(scope.conn())
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                return AppError::conflict(anyhow::anyhow!("User still has assigned tasks"));
            }
            error!(error = %e, "Database error deleting user");
            AppError::database(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        info!(user.id = %user.id, "User deleted");
        Ok(user)
    }
}

/// A member of `tenant_id`, if any. Used to check task assignees as well.
pub(crate) async fn find_in_tenant(
    conn: &mut PgConnection,
    tenant_id: Uuid,
    id: Uuid,
) -> Result<Option<User>, AppError> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND organization_id = $2"
    ))
    .bind(id)
    .bind(tenant_id)
    .fetch_optional(conn)
    .await
    .map_err(|e| {
        error!(user.id = %id, error = %e, "Database error fetching user");
        AppError::database(e)
    })
}
