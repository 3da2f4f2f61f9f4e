use axum::{Json, extract::State, http::StatusCode};

use taskhub_auth::TokenError;
use taskhub_core::AppError;
use taskhub_models::auth::{AuthResponse, SignInRequest, SignUpRequest};
use taskhub_models::users::User;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

fn issue(state: &AppState, user: User) -> Result<AuthResponse, AppError> {
    let token = state
        .tokens
        .encode(&user.identity())
        .map_err(TokenError::into_app_error)?;
    taskhub_observability::track_jwt_issued();
    Ok(AuthResponse { user, token })
}

#[utoipa::path(
    post,
    path = "/auth/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Malformed body"),
        (status = 404, description = "Organization not found"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    ),
    tag = "Authentication"
)]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignUpRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let user = AuthService::sign_up(&state.db, dto).await?;
    taskhub_observability::track_user_signed_up(user.role.as_str());
    Ok((StatusCode::CREATED, Json(issue(&state, user)?)))
}

#[utoipa::path(
    post,
    path = "/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 401, description = "Invalid email or password"),
        (status = 422, description = "Validation error")
    ),
    tag = "Authentication"
)]
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignInRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = AuthService::sign_in(&state.db, dto).await?;
    Ok(Json(issue(&state, user)?))
}
