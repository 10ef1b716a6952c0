//! SQLite connection pool and schema bootstrap.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::StoreConfig;
use crate::error::StoreResult;

/// Schema statements, applied idempotently at connect time.
///
/// `stock_transactions` rows are removed together with their product.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT    NOT NULL,
        brand       TEXT,
        category    TEXT    NOT NULL,
        subcategory TEXT,
        price       REAL    NOT NULL CHECK (price >= 0),
        quantity    INTEGER NOT NULL DEFAULT 0 CHECK (quantity BETWEEN 0 AND 2147483647),
        created_at  TEXT    NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS stock_transactions (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        product_id       INTEGER NOT NULL REFERENCES products (id) ON DELETE CASCADE,
        transaction_type TEXT    NOT NULL CHECK (transaction_type IN ('IN', 'OUT')),
        quantity         INTEGER NOT NULL CHECK (quantity > 0),
        notes            TEXT,
        created_at       TEXT    NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_stock_transactions_product ON stock_transactions (product_id)",
    "CREATE INDEX IF NOT EXISTS idx_stock_transactions_created ON stock_transactions (created_at)",
    "CREATE INDEX IF NOT EXISTS idx_products_name ON products (name)",
];

/// Owner of the connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the database and apply the schema.
    ///
    /// In-memory databases live only as long as their connection, so the pool
    /// is pinned to a single connection that never idles out.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new();
        if config.is_in_memory() {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            pool_options = pool_options.max_connections(config.max_connections);
        }

        let pool = pool_options.connect_with(options).await?;
        let db = Self { pool };
        db.apply_schema().await?;

        tracing::info!(
            database_url = %config.database_url,
            in_memory = config.is_in_memory(),
            "database ready"
        );
        Ok(db)
    }

    async fn apply_schema(&self) -> StoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn schema_is_idempotent() {
        let db = Database::connect(&StoreConfig::in_memory()).await.unwrap();
        db.apply_schema().await.unwrap();

        let tables: Vec<String> = sqlx::query(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.get::<String, _>("name"))
        .collect();
        assert_eq!(tables, vec!["products", "stock_transactions"]);
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = Database::connect(&StoreConfig::in_memory()).await.unwrap();
        let res = sqlx::query(
            "INSERT INTO stock_transactions (product_id, transaction_type, quantity, created_at) \
             VALUES (999, 'IN', 1, '2024-01-01T00:00:00Z')",
        )
        .execute(db.pool())
        .await;
        assert!(res.is_err());
    }
}
