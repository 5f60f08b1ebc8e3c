use sqlx::SqlitePool;
use sqlx_migrator::{Info, Migrate, Migrator, Plan};

mod m0001;
pub mod table;

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(m0001::Migration)])?;

    Ok(migrator)
}

/// Apply every pending migration on the pool
pub async fn migrate(pool: &SqlitePool) -> anyhow::Result<()> {
    let mut conn = pool.acquire().await?;
    migrator()?.run(&mut *conn, &Plan::apply_all()).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn test_migrate_is_idempotent() -> anyhow::Result<()> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        migrate(&pool).await?;
        migrate(&pool).await?;

        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(&pool)
                .await?;
        let tables: Vec<_> = tables.into_iter().map(|(name,)| name).collect();

        for expected in [
            "ingredient",
            "meal_plan",
            "recipe",
            "recipe_ingredient",
            "shopping_list_item",
        ] {
            assert!(tables.iter().any(|t| t == expected), "missing table {expected}");
        }

        Ok(())
    }
}
