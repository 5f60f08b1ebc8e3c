use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use std::str::FromStr;
use tracing::log::LevelFilter;

/// Configure SQLite PRAGMAs for WAL mode
///
/// - WAL mode enables concurrent reads and writes
/// - busy_timeout reduces SQLITE_BUSY errors
/// - synchronous=NORMAL is safe with WAL
/// - foreign_keys must be explicitly enabled (disabled by default)
/// - temp_store=memory speeds up temporary table operations
async fn configure_pragmas(pool: &SqlitePool) -> Result<()> {
    for pragma in [
        "PRAGMA journal_mode = WAL",
        "PRAGMA busy_timeout = 5000",
        "PRAGMA synchronous = NORMAL",
        "PRAGMA cache_size = -20000",
        "PRAGMA foreign_keys = true",
        "PRAGMA temp_store = memory",
    ] {
        sqlx::query(pragma).execute(pool).await?;
    }

    Ok(())
}

/// Create a pool with the PRAGMAs above, creating the database file if needed
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .log_statements(LevelFilter::Debug);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    configure_pragmas(&pool).await?;

    tracing::debug!("Created pool with {} max connections", max_connections);

    Ok(pool)
}
