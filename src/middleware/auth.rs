use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use taskhub_auth::{Identity, TokenCodec, TokenError};
use taskhub_core::AppError;

use crate::state::AppState;

/// Reads `Authorization: Bearer <token>` and verifies the token.
///
/// The token itself never reaches a log line or an error message.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenCodec) -> Result<Identity, AppError> {
    let bearer = match headers.typed_try_get::<Authorization<Bearer>>() {
        Ok(Some(Authorization(bearer))) => bearer,
        Ok(None) => {
            return Err(AppError::unauthorized(
                "Missing authorization header".to_string(),
            ));
        }
        Err(_) => {
            return Err(AppError::unauthorized(
                "Invalid authorization header format".to_string(),
            ));
        }
    };

    tokens
        .decode(bearer.token())
        .map_err(TokenError::into_app_error)
}

/// The authenticated caller.
///
/// Behind a pipeline that authenticated the request the identity is already in
/// the request extensions; anywhere else the bearer token is verified here.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(AuthUser(identity.clone()));
        }

        let identity = authenticate(&parts.headers, &state.tokens)?;
        parts.extensions.insert(identity.clone());
        Ok(AuthUser(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode, header};
    use taskhub_auth::Role;
    use taskhub_config::JwtConfig;
    use uuid::Uuid;

    fn codec() -> TokenCodec {
        TokenCodec::new(&JwtConfig::with_secret("middleware-test-secret"))
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_header() {
        let err = authenticate(&HeaderMap::new(), &codec()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.error.to_string(), "Missing authorization header");
    }

    #[test]
    fn test_non_bearer_scheme() {
        let err = authenticate(&headers_with("Basic dXNlcjpwYXNz"), &codec()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.error.to_string(), "Invalid authorization header format");
    }

    #[test]
    fn test_bad_token() {
        let err = authenticate(&headers_with("Bearer not.a.token"), &codec()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert!(!err.error.to_string().contains("not.a.token"));
    }

    #[test]
    fn test_valid_token() {
        let codec = codec();
        let identity = Identity {
            subject_id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            tenant_id: Some(Uuid::new_v4()),
            role: Role::User,
        };
        let token = codec.encode(&identity).unwrap();

        let decoded = authenticate(&headers_with(&format!("Bearer {}", token)), &codec).unwrap();
        assert_eq!(decoded, identity);
    }
}
