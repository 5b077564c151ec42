/// PostgreSQL connection pool
///
/// Builds the sqlx pool every other module borrows, verifies connectivity
/// before handing it out, and closes it on shutdown.
///
/// # Example
///
/// ```no_run
/// use summit_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL").unwrap(),
///     ..Default::default()
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pool settings, all durations in seconds so they map directly onto
/// environment variables
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Upper bound on open connections
    pub max_connections: u32,

    /// Idle connections kept warm
    pub min_connections: u32,

    /// How long an acquire may wait before failing
    pub connect_timeout_seconds: u64,

    /// Idle time after which a connection is dropped; `None` keeps idle
    /// connections forever
    pub idle_timeout_seconds: Option<u64>,

    /// Age at which a connection is recycled; `None` disables recycling
    pub max_lifetime_seconds: Option<u64>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout_seconds: 30,
            idle_timeout_seconds: Some(600),
            max_lifetime_seconds: Some(1800),
        }
    }
}

/// Opens a pool and verifies the database answers before returning it
///
/// # Errors
///
/// Returns an error when the URL is invalid, the database is unreachable, or
/// the connectivity probe fails.
pub async fn create_pool(config: DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Creating database connection pool"
    );

    let mut options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds));

    if let Some(secs) = config.idle_timeout_seconds {
        options = options.idle_timeout(Duration::from_secs(secs));
    }

    if let Some(secs) = config.max_lifetime_seconds {
        options = options.max_lifetime(Duration::from_secs(secs));
    }

    let pool = options.connect(&config.url).await?;

    health_check(&pool).await?;

    info!("Database connection pool ready");
    Ok(pool)
}

/// Round-trips a trivial query to prove the database is reachable
///
/// Shared by pool startup and the `/health` endpoint.
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    debug!("Running database connectivity probe");

    let (answer,): (i32,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if answer != 1 {
        warn!(answer, "Connectivity probe returned an unexpected value");
        return Err(sqlx::Error::Protocol(
            "connectivity probe returned unexpected value".into(),
        ));
    }

    Ok(())
}

/// Drains and closes the pool during shutdown
pub async fn close_pool(pool: PgPool) {
    info!("Closing database connection pool");
    pool.close().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DatabaseConfig::default();

        assert!(config.url.is_empty());
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.idle_timeout_seconds, Some(600));
        assert_eq!(config.max_lifetime_seconds, Some(1800));
    }

    // Anything touching a live database runs from summit-api/tests/
}
