//! Stock movements and the ledger.

use chrono::Utc;
use sqlx::SqliteConnection;

use stockroom_core::{DomainError, ProductId, TransactionId};
use stockroom_inventory::{StockMovement, StockTransaction, StockUpdate, TransactionType};
use stockroom_products::{MAX_QUANTITY, Product};

use super::{
    InventoryStore, PRODUCT_COLUMNS, TRANSACTION_COLUMNS, product_from_row, transaction_from_row,
};
use crate::error::StoreResult;

impl InventoryStore {
    /// Increment on-hand quantity and append an `IN` ledger entry, atomically.
    ///
    /// Fails with `NotFound` for an unknown product and `Validation` when the
    /// result would exceed [`MAX_QUANTITY`]; in both cases nothing is written.
    pub async fn stock_in(&self, movement: StockMovement) -> StoreResult<StockUpdate> {
        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            "UPDATE products SET quantity = quantity + ?1 WHERE id = ?2 AND quantity <= ?3 - ?1",
        )
        .bind(movement.quantity)
        .bind(movement.product_id.get())
        .bind(MAX_QUANTITY)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            let err = match current_quantity(&mut tx, movement.product_id).await? {
                None => DomainError::not_found(),
                Some(on_hand) => {
                    tracing::warn!(
                        product_id = %movement.product_id,
                        requested = movement.quantity,
                        on_hand,
                        "stock in rejected: would exceed maximum stock"
                    );
                    DomainError::validation(format!(
                        "stock in would exceed maximum stock of {MAX_QUANTITY}"
                    ))
                }
            };
            return Err(err.into());
        }

        let transaction = insert_transaction(&mut tx, &movement, TransactionType::In).await?;
        let quantity = current_quantity(&mut tx, movement.product_id)
            .await?
            .ok_or_else(DomainError::not_found)?;
        tx.commit().await?;

        tracing::info!(
            product_id = %movement.product_id,
            quantity = movement.quantity,
            on_hand = quantity,
            "stock in"
        );
        Ok(StockUpdate {
            quantity,
            transaction,
        })
    }

    /// Decrement on-hand quantity and append an `OUT` ledger entry, atomically.
    ///
    /// The decrement is a single conditional statement, so concurrent requests
    /// cannot drive the quantity below zero. Fails with `NotFound` for an
    /// unknown product and `InsufficientStock` when the request exceeds the
    /// quantity on hand; in both cases nothing is written.
    pub async fn stock_out(&self, movement: StockMovement) -> StoreResult<StockUpdate> {
        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            "UPDATE products SET quantity = quantity - ?1 WHERE id = ?2 AND quantity >= ?1",
        )
        .bind(movement.quantity)
        .bind(movement.product_id.get())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            let err = match current_quantity(&mut tx, movement.product_id).await? {
                None => DomainError::not_found(),
                Some(available) => {
                    tracing::warn!(
                        product_id = %movement.product_id,
                        requested = movement.quantity,
                        available,
                        "stock out rejected: insufficient stock"
                    );
                    DomainError::insufficient_stock(movement.quantity, available)
                }
            };
            return Err(err.into());
        }

        let transaction = insert_transaction(&mut tx, &movement, TransactionType::Out).await?;
        let quantity = current_quantity(&mut tx, movement.product_id)
            .await?
            .ok_or_else(DomainError::not_found)?;
        tx.commit().await?;

        tracing::info!(
            product_id = %movement.product_id,
            quantity = movement.quantity,
            on_hand = quantity,
            "stock out"
        );
        Ok(StockUpdate {
            quantity,
            transaction,
        })
    }

    /// Ledger entries of one product, newest first.
    pub async fn history(&self, product_id: ProductId) -> StoreResult<Vec<StockTransaction>> {
        // Distinguish "no product" from "no movements yet".
        self.get(product_id).await?;

        let rows = sqlx::query(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM stock_transactions \
             WHERE product_id = ?1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(product_id.get())
        .fetch_all(self.pool())
        .await?;

        let entries = rows
            .iter()
            .map(transaction_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Products below the configured threshold, ascending by quantity.
    pub async fn low_stock_alerts(&self) -> StoreResult<Vec<Product>> {
        self.low_stock_below(self.policy().threshold()).await
    }

    /// Products with quantity strictly below `threshold`, ascending by quantity.
    pub async fn low_stock_below(&self, threshold: i64) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE quantity < ?1 ORDER BY quantity ASC, id ASC"
        ))
        .bind(threshold)
        .fetch_all(self.pool())
        .await?;

        let products = rows
            .iter()
            .map(product_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }
}

async fn current_quantity(
    conn: &mut SqliteConnection,
    product_id: ProductId,
) -> StoreResult<Option<i64>> {
    let quantity = sqlx::query_scalar::<_, i64>("SELECT quantity FROM products WHERE id = ?1")
        .bind(product_id.get())
        .fetch_optional(conn)
        .await?;
    Ok(quantity)
}

async fn insert_transaction(
    conn: &mut SqliteConnection,
    movement: &StockMovement,
    transaction_type: TransactionType,
) -> StoreResult<StockTransaction> {
    let created_at = Utc::now();
    let result = sqlx::query(
        r#"
        INSERT INTO stock_transactions (product_id, transaction_type, quantity, notes, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(movement.product_id.get())
    .bind(transaction_type.as_str())
    .bind(movement.quantity)
    .bind(&movement.notes)
    .bind(created_at)
    .execute(conn)
    .await?;

    Ok(StockTransaction {
        id: TransactionId::new(result.last_insert_rowid()),
        product_id: movement.product_id,
        transaction_type,
        quantity: movement.quantity,
        notes: movement.notes.clone(),
        created_at,
    })
}
