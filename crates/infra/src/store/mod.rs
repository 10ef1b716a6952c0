//! SQLite-backed inventory store.
//!
//! Every operation acquires a pooled connection for its own scope. Mutations
//! that touch both tables run inside a single SQL transaction so that product
//! quantities and the stock ledger never diverge.

mod catalog;
mod maintenance;
mod reports;
mod stock;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use stockroom_core::{ProductId, TransactionId};
use stockroom_inventory::{LowStockPolicy, StockTransaction, TransactionType};
use stockroom_products::Product;

use crate::config::StoreConfig;
use crate::db::Database;
use crate::error::StoreResult;

pub use maintenance::ClearedCounts;
pub use reports::CsvExport;

const PRODUCT_COLUMNS: &str =
    "id, name, brand, category, subcategory, price, quantity, created_at";

const TRANSACTION_COLUMNS: &str =
    "id, product_id, transaction_type, quantity, notes, created_at";

/// Number of ledger entries included in the summary report.
const RECENT_TRANSACTIONS_LIMIT: i64 = 10;

/// Persistence handle for products and the stock ledger.
///
/// Cheap to clone; clones share the underlying pool.
#[derive(Debug, Clone)]
pub struct InventoryStore {
    db: Database,
    policy: LowStockPolicy,
}

impl InventoryStore {
    /// Connect using `config`, applying the schema and, when configured,
    /// seeding the sample catalog into an empty database.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let db = Database::connect(config).await?;
        let store = Self::new(db, LowStockPolicy::new(config.low_stock_threshold));

        if config.seed_on_empty {
            let inserted = store.seed_if_empty().await?;
            if inserted > 0 {
                tracing::info!(inserted, "seeded sample catalog into empty database");
            }
        }

        Ok(store)
    }

    pub fn new(db: Database, policy: LowStockPolicy) -> Self {
        Self { db, policy }
    }

    pub fn policy(&self) -> LowStockPolicy {
        self.policy
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn pool(&self) -> &SqlitePool {
        self.db.pool()
    }
}

fn product_from_row(row: &SqliteRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: ProductId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        brand: row.try_get("brand")?,
        category: row.try_get("category")?,
        subcategory: row.try_get("subcategory")?,
        price: row.try_get("price")?,
        quantity: row.try_get("quantity")?,
        created_at: row.try_get("created_at")?,
    })
}

fn transaction_from_row(row: &SqliteRow) -> Result<StockTransaction, sqlx::Error> {
    let raw_type: String = row.try_get("transaction_type")?;
    let transaction_type = raw_type
        .parse::<TransactionType>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    Ok(StockTransaction {
        id: TransactionId::new(row.try_get("id")?),
        product_id: ProductId::new(row.try_get("product_id")?),
        transaction_type,
        quantity: row.try_get("quantity")?,
        notes: row.try_get("notes")?,
        created_at: row.try_get("created_at")?,
    })
}
