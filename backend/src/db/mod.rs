//! Database pool and store construction
//!
//! Picks the assessment store named in configuration and, for PostgreSQL,
//! opens the pool and applies embedded migrations.

use crate::config::{AppConfig, DatabaseConfig, StoreBackend};
use crate::repositories::{AssessmentStore, InMemoryAssessmentStore, PgAssessmentStore};
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const MIN_CONNECTIONS: u32 = 1;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Create a PostgreSQL connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&config.url)
        .context("Invalid database URL")?
        .application_name("nutrimood");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(MIN_CONNECTIONS.min(config.max_connections))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await?;

    info!(max = config.max_connections, "Database pool created");
    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Database health check failed: {}", e);
            e.into()
        })
}

/// Build the configured assessment store
///
/// Migrations run at startup outside production, where a separate job owns them.
pub async fn build_store(config: &AppConfig) -> Result<Arc<dyn AssessmentStore>> {
    match config.persistence.backend {
        StoreBackend::Memory => {
            warn!("Using in-memory assessment store; history is lost on restart");
            Ok(Arc::new(InMemoryAssessmentStore::new()))
        }
        StoreBackend::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(&config.database).await?;
            if !AppConfig::is_production() {
                run_migrations(&pool).await?;
            }
            Ok(Arc::new(PgAssessmentStore::new(pool)))
        }
    }
}
