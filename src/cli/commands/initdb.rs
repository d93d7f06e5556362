use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tracing::{debug, info};

/// Create the schema on a fresh database, or bring an existing one up to date.
pub async fn init_database(database_url: &str) -> Result<()> {
    debug!("Connecting to {}", database_url);
    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("failed to connect to '{}'", database_url))?;

    info!("Applying migrations");
    Migrator::up(&db, None)
        .await
        .context("failed to run migrations")?;

    info!("Database ready");
    Ok(())
}
