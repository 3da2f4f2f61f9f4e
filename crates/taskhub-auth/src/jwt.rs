//! Signing and verifying access tokens.
//!
//! [`TokenCodec`] is built once from [`JwtConfig`] and stored in the
//! application state. It signs with HS256 and verifies signature and expiry
//! on decode with no clock leeway.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use taskhub_config::JwtConfig;
use taskhub_core::AppError;

use crate::claims::Claims;
use crate::identity::Identity;

#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, malformed structure, unknown role or elapsed expiry.
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Failed to create token: {0}")]
    Signing(String),
}

impl TokenError {
    /// 401 for a token the caller sent, 500 for a token we failed to sign.
    ///
    /// `?` alone would go through `AppError`'s blanket conversion and turn
    /// every token error into a 500.
    pub fn into_app_error(self) -> AppError {
        match self {
            TokenError::InvalidToken => AppError::unauthorized(self.to_string()),
            TokenError::Signing(_) => AppError::internal_error(self.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
}

impl TokenCodec {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl_seconds: config.token_expiry,
        }
    }

    /// Signs `identity` into a token that expires after the configured lifetime.
    pub fn encode(&self, identity: &Identity) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: identity.subject_id.to_string(),
            email: identity.email.clone(),
            organization_id: identity.tenant_id,
            role: identity.role,
            iat: now as usize,
            exp: (now + self.ttl_seconds) as usize,
        };

        self.encode_claims(&claims)
    }

    pub fn encode_claims(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verifies signature and expiry and returns the embedded identity.
    pub fn decode(&self, token: &str) -> Result<Identity, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::InvalidToken)?;

        let subject_id = Uuid::parse_str(&claims.sub).map_err(|_| TokenError::InvalidToken)?;

        Ok(Identity {
            subject_id,
            email: claims.email,
            tenant_id: claims.organization_id,
            role: claims.role,
        })
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Role;

    fn test_codec() -> TokenCodec {
        TokenCodec::new(&JwtConfig::with_secret(
            "test-secret-key-at-least-32-characters-long",
        ))
    }

    fn sample_identity() -> Identity {
        Identity {
            subject_id: Uuid::new_v4(),
            email: "owner@example.com".to_string(),
            tenant_id: Some(Uuid::new_v4()),
            role: Role::Owner,
        }
    }

    fn claims_for(identity: &Identity, iat: i64, exp: i64) -> Claims {
        Claims {
            sub: identity.subject_id.to_string(),
            email: identity.email.clone(),
            organization_id: identity.tenant_id,
            role: identity.role,
            iat: iat as usize,
            exp: exp as usize,
        }
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let codec = test_codec();
        let identity = sample_identity();

        let token = codec.encode(&identity).unwrap();
        assert!(!token.is_empty());
        assert_eq!(codec.decode(&token).unwrap(), identity);
    }

    #[test]
    fn test_roundtrip_without_tenant() {
        let codec = test_codec();
        let identity = Identity {
            tenant_id: None,
            role: Role::User,
            ..sample_identity()
        };

        let token = codec.encode(&identity).unwrap();
        assert_eq!(codec.decode(&token).unwrap(), identity);
    }

    #[test]
    fn test_expiry_is_24_hours_by_default() {
        let codec = test_codec();
        let token = codec.encode(&sample_identity()).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        let data = decode::<Claims>(&token, &DecodingKey::from_secret(b"unused"), &validation).unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, 86_400);
    }

    #[test]
    fn test_decode_garbage() {
        let codec = test_codec();
        assert!(matches!(codec.decode("invalid-token"), Err(TokenError::InvalidToken)));
        assert!(matches!(codec.decode(""), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_decode_wrong_secret() {
        let token = test_codec().encode(&sample_identity()).unwrap();
        let other = TokenCodec::new(&JwtConfig::with_secret(
            "different-secret-key-at-least-32-characters",
        ));

        assert!(matches!(other.decode(&token), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_decode_tampered_signature() {
        let codec = test_codec();
        let token = codec.encode(&sample_identity()).unwrap();

        let (head, sig) = token.rsplit_once('.').unwrap();
        let mut sig = sig.to_string();
        let last = sig.pop().unwrap();
        sig.push(if last == 'A' { 'B' } else { 'A' });
        let tampered = format!("{}.{}", head, sig);

        assert!(matches!(codec.decode(&tampered), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_decode_altered_payload() {
        let codec = test_codec();
        let identity = sample_identity();
        let token = codec.encode(&identity).unwrap();

        // Re-sign a promoted payload with another key and splice it onto the original signature.
        let forged = TokenCodec::new(&JwtConfig::with_secret("attacker-key"))
            .encode(&Identity {
                role: Role::Owner,
                tenant_id: Some(Uuid::new_v4()),
                ..identity
            })
            .unwrap();
        let original_sig = token.rsplit('.').next().unwrap();
        let mut parts: Vec<&str> = forged.split('.').collect();
        parts[2] = original_sig;

        assert!(matches!(codec.decode(&parts.join(".")), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_decode_expired() {
        let codec = test_codec();
        let now = Utc::now().timestamp();
        let token = codec
            .encode_claims(&claims_for(&sample_identity(), now - 7200, now - 3600))
            .unwrap();

        assert!(matches!(codec.decode(&token), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_decode_non_uuid_subject() {
        let codec = test_codec();
        let now = Utc::now().timestamp();
        let mut claims = claims_for(&sample_identity(), now, now + 60);
        claims.sub = "u1".to_string();
        let token = codec.encode_claims(&claims).unwrap();

        assert!(matches!(codec.decode(&token), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_decode_unknown_role() {
        #[derive(serde::Serialize)]
        struct RawClaims<'a> {
            sub: String,
            email: &'a str,
            organization_id: Option<Uuid>,
            role: &'a str,
            iat: i64,
            exp: i64,
        }

        let now = Utc::now().timestamp();
        let raw = RawClaims {
            sub: Uuid::new_v4().to_string(),
            email: "x@example.com",
            organization_id: None,
            role: "SUPERUSER",
            iat: now,
            exp: now + 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &raw,
            &EncodingKey::from_secret(b"test-secret-key-at-least-32-characters-long"),
        )
        .unwrap();

        assert!(matches!(test_codec().decode(&token), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_token_error_to_app_error() {
        let err = TokenError::InvalidToken.into_app_error();
        assert_eq!(err.status.as_u16(), 401);
        let err = TokenError::Signing("boom".to_string()).into_app_error();
        assert_eq!(err.status.as_u16(), 500);
    }
}
