//! Bulk catalog maintenance: deduplication, sample seeding, wipe.

use chrono::Utc;
use serde::Serialize;
use sqlx::SqliteConnection;

use stockroom_core::DomainError;

use super::InventoryStore;
use crate::error::StoreResult;
use crate::seed::sample_products;

/// Rows removed by [`InventoryStore::clear_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClearedCounts {
    pub products: u64,
    pub transactions: u64,
}

impl InventoryStore {
    /// Keep only the lowest-id product per distinct name. Returns the number
    /// of products removed (their ledger entries go with them).
    pub async fn deduplicate_by_name(&self) -> StoreResult<u64> {
        let result = sqlx::query(
            "DELETE FROM products WHERE id NOT IN (SELECT MIN(id) FROM products GROUP BY name)",
        )
        .execute(self.pool())
        .await?;

        let removed = result.rows_affected();
        tracing::info!(removed, "duplicate products removed");
        Ok(removed)
    }

    /// Insert the sample catalog. Fails with `Validation` when any product
    /// already exists.
    pub async fn seed_sample_data(&self) -> StoreResult<usize> {
        let mut tx = self.pool().begin().await?;
        if product_count(&mut tx).await? > 0 {
            return Err(DomainError::validation(
                "products already exist in database; clear existing products first or add new ones manually",
            )
            .into());
        }
        let inserted = insert_samples(&mut tx).await?;
        tx.commit().await?;

        tracing::info!(inserted, "sample catalog seeded");
        Ok(inserted)
    }

    /// Seed the sample catalog only if the database is empty. Returns the
    /// number of products inserted (0 when data was already present).
    pub async fn seed_if_empty(&self) -> StoreResult<usize> {
        let mut tx = self.pool().begin().await?;
        if product_count(&mut tx).await? > 0 {
            return Ok(0);
        }
        let inserted = insert_samples(&mut tx).await?;
        tx.commit().await?;
        Ok(inserted)
    }

    /// Delete every product and ledger entry.
    pub async fn clear_all(&self) -> StoreResult<ClearedCounts> {
        let mut tx = self.pool().begin().await?;
        let transactions = sqlx::query("DELETE FROM stock_transactions")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let products = sqlx::query("DELETE FROM products")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;

        tracing::warn!(products, transactions, "all inventory data cleared");
        Ok(ClearedCounts {
            products,
            transactions,
        })
    }
}

async fn product_count(conn: &mut SqliteConnection) -> StoreResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(conn)
        .await?;
    Ok(count)
}

async fn insert_samples(conn: &mut SqliteConnection) -> StoreResult<usize> {
    let samples = sample_products();
    let created_at = Utc::now();
    for p in &samples {
        sqlx::query(
            r#"
            INSERT INTO products (name, brand, category, subcategory, price, quantity, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&p.name)
        .bind(&p.brand)
        .bind(&p.category)
        .bind(&p.subcategory)
        .bind(p.price)
        .bind(p.quantity)
        .bind(created_at)
        .execute(&mut *conn)
        .await?;
    }
    Ok(samples.len())
}
