//! Low-stock rule.

use serde::{Deserialize, Serialize};

use stockroom_products::Product;

/// Quantity below which a product counts as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Per-product stock status as shown in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "Low Stock")]
    Low,
    #[serde(rename = "In Stock")]
    InStock,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Low => "Low Stock",
            StockStatus::InStock => "In Stock",
        }
    }
}

/// Low-stock threshold, owned by the store rather than a global constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowStockPolicy {
    threshold: i64,
}

impl LowStockPolicy {
    pub fn new(threshold: i64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    /// Strictly below the threshold.
    pub fn is_low(&self, quantity: i64) -> bool {
        quantity < self.threshold
    }

    pub fn status(&self, quantity: i64) -> StockStatus {
        if self.is_low(quantity) {
            StockStatus::Low
        } else {
            StockStatus::InStock
        }
    }

    /// The low-stock subset of `products`, ascending by quantity.
    pub fn alerts<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Vec<&'a Product> {
        let mut low: Vec<&Product> = products
            .into_iter()
            .filter(|p| self.is_low(p.quantity))
            .collect();
        low.sort_by_key(|p| (p.quantity, p.id));
        low
    }
}

impl Default for LowStockPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_LOW_STOCK_THRESHOLD)
    }
}
