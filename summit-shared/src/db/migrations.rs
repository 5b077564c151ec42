/// Schema migrations
///
/// The SQL files under the workspace `migrations/` directory are embedded at
/// compile time and applied through sqlx's migrator, so a freshly created
/// database is brought up to date at startup with no external tooling.

use sqlx::postgres::PgPool;
use tracing::{error, info};

/// Applies every pending migration, skipping the ones already recorded
///
/// # Errors
///
/// Returns the migrator's error when a migration fails to apply or its
/// bookkeeping table cannot be created.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Applying database migrations");

    sqlx::migrate!("../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            error!("Migration failed: {}", e);
            e
        })?;

    info!("Database schema up to date");
    Ok(())
}
