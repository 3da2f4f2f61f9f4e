use std::sync::Arc;

use sqlx::PgPool;
use taskhub_auth::TokenCodec;
use taskhub_config::{CorsConfig, DatabaseConfig, JwtConfig};
use taskhub_db::init_db_pool;

/// Shared by every handler and guard.
///
/// The signing key lives inside [`TokenCodec`], built once from [`JwtConfig`].
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: Arc<TokenCodec>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: PgPool, jwt_config: &JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            db,
            tokens: Arc::new(TokenCodec::new(jwt_config)),
            cors_config,
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db = init_db_pool(&DatabaseConfig::from_env()?).await?;
    Ok(AppState::new(db, &JwtConfig::from_env(), CorsConfig::from_env()))
}
