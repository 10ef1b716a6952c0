use serde::{Deserialize, Serialize};

use stockroom_inventory::{StockTransaction, StockUpdate};
use stockroom_products::Product;

// -------------------------
// Query DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct SubcategoryQuery {
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertsQuery {
    pub threshold: Option<i64>,
}

// -------------------------
// Response DTOs
// -------------------------

/// `{"success": true, "message": ...}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductCreatedResponse {
    pub success: bool,
    pub message: String,
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct StockUpdateResponse {
    pub success: bool,
    pub message: String,
    pub quantity: i64,
    pub transaction: StockTransaction,
}

impl StockUpdateResponse {
    pub fn new(message: impl Into<String>, update: StockUpdate) -> Self {
        Self {
            success: true,
            message: message.into(),
            quantity: update.quantity,
            transaction: update.transaction,
        }
    }
}
