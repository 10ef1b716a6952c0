//! Summary report and CSV export.

use chrono::Utc;
use sqlx::{Row, SqliteConnection};

use stockroom_inventory::report::round_money;
use stockroom_inventory::{CategoryStats, InventoryReport, RecentTransaction, SummaryReport, csv};
use stockroom_products::ProductFilter;

use super::catalog::fetch_products;
use super::{InventoryStore, RECENT_TRANSACTIONS_LIMIT, transaction_from_row};
use crate::error::StoreResult;

/// A rendered CSV download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub body: String,
}

struct Totals {
    total_products: i64,
    total_value: f64,
    low_stock_count: i64,
}

impl InventoryStore {
    /// Totals, per-category aggregates and the most recent ledger entries.
    pub async fn summary_report(&self) -> StoreResult<SummaryReport> {
        // One read transaction so all figures come from the same snapshot.
        let mut tx = self.pool().begin().await?;

        let totals = totals(&mut tx, self.policy().threshold()).await?;
        let category_stats = category_stats(&mut tx).await?;

        let rows = sqlx::query(
            r#"
            SELECT st.id, st.product_id, st.transaction_type, st.quantity, st.notes,
                   st.created_at, p.name AS product_name
            FROM stock_transactions st
            JOIN products p ON st.product_id = p.id
            ORDER BY st.created_at DESC, st.id DESC
            LIMIT ?1
            "#,
        )
        .bind(RECENT_TRANSACTIONS_LIMIT)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        let recent_transactions = rows
            .iter()
            .map(|row| -> Result<RecentTransaction, sqlx::Error> {
                Ok(RecentTransaction {
                    transaction: transaction_from_row(row)?,
                    product_name: row.try_get("product_name")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SummaryReport {
            total_products: totals.total_products,
            total_value: round_money(totals.total_value),
            low_stock_count: totals.low_stock_count,
            category_stats: category_stats
                .into_iter()
                .map(|s| CategoryStats {
                    total_value: round_money(s.total_value),
                    ..s
                })
                .collect(),
            recent_transactions,
        })
    }

    /// Snapshot of every product plus totals, as consumed by the CSV export.
    ///
    /// Rows and totals are read in one transaction so the sections agree.
    pub async fn inventory_report(&self) -> StoreResult<InventoryReport> {
        let mut tx = self.pool().begin().await?;
        let products = fetch_products(&mut tx, &ProductFilter::default()).await?;
        let totals = totals(&mut tx, self.policy().threshold()).await?;
        let category_stats = category_stats(&mut tx).await?;
        tx.commit().await?;

        Ok(InventoryReport {
            generated_at: Utc::now(),
            policy: self.policy(),
            products,
            total_products: totals.total_products,
            total_value: totals.total_value,
            low_stock_count: totals.low_stock_count,
            category_stats,
        })
    }

    /// Render the inventory report as CSV with a timestamped filename.
    pub async fn export_csv(&self) -> StoreResult<CsvExport> {
        let report = self.inventory_report().await?;
        let export = CsvExport {
            filename: report.filename(),
            body: csv::render(&report),
        };
        tracing::info!(
            filename = %export.filename,
            products = report.products.len(),
            "inventory report exported"
        );
        Ok(export)
    }
}

async fn totals(conn: &mut SqliteConnection, threshold: i64) -> StoreResult<Totals> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS total_products,
               CAST(COALESCE(SUM(price * quantity), 0) AS REAL) AS total_value,
               CAST(COALESCE(SUM(CASE WHEN quantity < ?1 THEN 1 ELSE 0 END), 0) AS INTEGER)
                   AS low_stock_count
        FROM products
        "#,
    )
    .bind(threshold)
    .fetch_one(conn)
    .await?;

    Ok(Totals {
        total_products: row.try_get("total_products")?,
        total_value: row.try_get("total_value")?,
        low_stock_count: row.try_get("low_stock_count")?,
    })
}

async fn category_stats(conn: &mut SqliteConnection) -> StoreResult<Vec<CategoryStats>> {
    let rows = sqlx::query(
        r#"
        SELECT category,
               COUNT(*) AS count,
               CAST(COALESCE(SUM(quantity), 0) AS INTEGER) AS total_qty,
               CAST(COALESCE(SUM(price * quantity), 0) AS REAL) AS total_value
        FROM products
        GROUP BY category
        ORDER BY category
        "#,
    )
    .fetch_all(conn)
    .await?;

    let stats = rows
        .iter()
        .map(|row| -> Result<CategoryStats, sqlx::Error> {
            Ok(CategoryStats {
                category: row.try_get("category")?,
                count: row.try_get("count")?,
                total_qty: row.try_get("total_qty")?,
                total_value: row.try_get("total_value")?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(stats)
}
