use anyhow::Result;

use crate::Config;

/// Apply every pending schema migration
pub async fn migrate(config: &Config) -> Result<()> {
    tracing::info!("Migrating database");

    let pool = crate::create_pool(&config.database.url, 1).await?;
    mealwise_db::migrate(&pool).await?;
    pool.close().await;

    tracing::info!("Database migrated");

    Ok(())
}
