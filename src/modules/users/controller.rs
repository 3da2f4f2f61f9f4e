use axum::{Json, extract::Path, http::StatusCode};
use tracing::instrument;
use uuid::Uuid;

use taskhub_core::AppError;
use taskhub_models::users::{CreateUserDto, UpdateUserDto, User};

use crate::middleware::auth::AuthUser;
use crate::middleware::tenant::Tenant;
use crate::validator::ValidatedJson;

use super::service::UserService;

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Members of the caller's organization", body = Vec<User>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No organization")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn get_users(Tenant(mut scope): Tenant) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(UserService::list(&mut scope).await?))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    Tenant(mut scope): Tenant,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    Ok(Json(UserService::get(&mut scope, id).await?))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - owner or manager only; only an owner may create an owner"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    auth_user: AuthUser,
    Tenant(mut scope): Tenant,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = UserService::create(&mut scope, auth_user.0.role, dto).await?;
    scope.commit().await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User ID; must be the caller's own")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the caller's own account"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all, fields(actor.id = %auth_user.0.subject_id, user.id = %id))]
pub async fn update_user(
    auth_user: AuthUser,
    Tenant(mut scope): Tenant,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<User>, AppError> {
    if dto.is_empty() {
        return Err(AppError::bad_request(anyhow::anyhow!("Nothing to update")));
    }

    let user = UserService::update(&mut scope, id, dto).await?;
    scope.commit().await?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deleted user", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - owner only"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    Tenant(mut scope): Tenant,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = UserService::delete(&mut scope, id).await?;
    scope.commit().await?;
    Ok(Json(user))
}
