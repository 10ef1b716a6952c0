//! Aggregate reporting shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_products::Product;

use crate::stock::LowStockPolicy;
use crate::transaction::StockTransaction;

/// Per-category aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub count: i64,
    pub total_qty: i64,
    pub total_value: f64,
}

/// A ledger entry joined with the name of its product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentTransaction {
    #[serde(flatten)]
    pub transaction: StockTransaction,
    pub product_name: String,
}

/// Inventory summary served as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub total_products: i64,
    pub total_value: f64,
    pub low_stock_count: i64,
    pub category_stats: Vec<CategoryStats>,
    pub recent_transactions: Vec<RecentTransaction>,
}

/// Everything the CSV export needs, captured at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryReport {
    pub generated_at: DateTime<Utc>,
    pub policy: LowStockPolicy,
    pub products: Vec<Product>,
    pub total_products: i64,
    pub total_value: f64,
    pub low_stock_count: i64,
    pub category_stats: Vec<CategoryStats>,
}

impl InventoryReport {
    /// `inventory_report_YYYYMMDD_HHMMSS.csv`
    pub fn filename(&self) -> String {
        format!(
            "inventory_report_{}.csv",
            self.generated_at.format("%Y%m%d_%H%M%S")
        )
    }
}

/// Round a money amount to cents.
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
