//! # Taskhub DB
//!
//! Database pool, migrations and per-request tenant binding for the Taskhub API.
//!
//! # Example
//!
//! ```ignore
//! use taskhub_config::DatabaseConfig;
//! use taskhub_db::{init_db_pool, run_migrations, TenantScope};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//!
//! let mut scope = TenantScope::bind(&pool, tenant_id).await?;
//! sqlx::query("SELECT 1").execute(scope.conn()).await?;
//! scope.commit().await?;
//! ```

pub mod tenant;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use taskhub_config::DatabaseConfig;
use tracing::info;

pub use sqlx::PgPool;
pub use tenant::{TenantError, TenantScope};

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Initializes a PostgreSQL connection pool.
///
/// Called once during startup; the returned pool is cheaply cloneable and is
/// stored in the application state.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!(max_connections = config.max_connections, "Database pool initialized");
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
