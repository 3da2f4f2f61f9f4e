use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};

use taskhub_core::errors::is_unique_violation;
use taskhub_core::{AppError, hash_password, verify_password};
use taskhub_models::auth::{SignInRequest, SignUpRequest};
use taskhub_models::users::User;

use crate::modules::users::service::USER_COLUMNS;

#[derive(sqlx::FromRow)]
struct Credentials {
    #[sqlx(flatten)]
    user: User,
    password: String,
}

pub struct AuthService;

impl AuthService {
    /// Registers a user. Sign-up is not tenant-scoped: the new account joins
    /// the organization named in the request, if any.
    #[instrument(skip(db, dto), fields(db.operation = "INSERT", db.table = "users"))]
    pub async fn sign_up(db: &PgPool, dto: SignUpRequest) -> Result<User, AppError> {
        if let Some(organization_id) = dto.organization_id {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM organizations WHERE id = $1)")
                    .bind(organization_id)
                    .fetch_one(db)
                    .await
                    .map_err(AppError::database)?;
            if !exists {
                debug!(organization.id = %organization_id, "Sign-up for unknown organization");
                return Err(AppError::not_found(anyhow::anyhow!("Organization not found")));
            }
        }

        let hashed = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password, role, organization_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed)
        .bind(dto.role.unwrap_or_default())
        .bind(dto.organization_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!("Sign-up with an already registered email");
                return AppError::conflict(anyhow::anyhow!("Email already registered"));
            }
            error!(error = %e, "Database error during sign-up");
            AppError::database(e)
        })?;

        info!(user.id = %user.id, user.role = %user.role, "User signed up");
        Ok(user)
    }

    /// Checks credentials. Unknown email and wrong password produce the same
    /// error.
    #[instrument(skip(db, dto), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn sign_in(db: &PgPool, dto: SignInRequest) -> Result<User, AppError> {
        let invalid = || AppError::unauthorized("Invalid email or password".to_string());

        let credentials = sqlx::query_as::<_, Credentials>(&format!(
            "SELECT {USER_COLUMNS}, password FROM users WHERE email = $1"
        ))
        .bind(&dto.email)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error during sign-in");
            AppError::database(e)
        })?;

        let Some(credentials) = credentials else {
            taskhub_observability::track_sign_in_failure("unknown_email");
            debug!("Sign-in for unknown email");
            return Err(invalid());
        };

        if !verify_password(&dto.password, &credentials.password)? {
            taskhub_observability::track_sign_in_failure("wrong_password");
            debug!(user.id = %credentials.user.id, "Sign-in with wrong password");
            return Err(invalid());
        }

        taskhub_observability::track_sign_in_success(credentials.user.role.as_str());
        info!(user.id = %credentials.user.id, "User signed in");
        Ok(credentials.user)
    }
}
