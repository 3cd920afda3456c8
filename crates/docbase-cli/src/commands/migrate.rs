//! Database migration command.

use crate::output;
use docbase_core::error::AppError;
use docbase_database::DatabasePool;
use docbase_database::migration::run_migrations;

/// Run all pending migrations against the configured database
pub async fn execute(config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = DatabasePool::connect(&config.database).await?;

    println!("Running database migrations...");
    run_migrations(pool.pool()).await?;
    pool.pool().close().await;

    output::print_success("All migrations applied successfully.");
    Ok(())
}
