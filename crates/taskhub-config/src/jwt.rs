use std::env;

use crate::env_or;

/// Default token lifetime: 24 hours.
pub const DEFAULT_TOKEN_EXPIRY: i64 = 86_400;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            token_expiry: env_or("JWT_EXPIRY", DEFAULT_TOKEN_EXPIRY),
        }
    }

    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_expiry: DEFAULT_TOKEN_EXPIRY,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("token_expiry", &self.token_expiry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_secret_uses_default_expiry() {
        let config = JwtConfig::with_secret("abc");
        assert_eq!(config.secret, "abc");
        assert_eq!(config.token_expiry, 86_400);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig::with_secret("super-secret-value");
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("super-secret-value"));
        assert!(debug_str.contains("token_expiry"));
    }
}
