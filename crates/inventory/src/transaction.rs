use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ProductId, TransactionId};
use stockroom_products::MAX_QUANTITY;

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    In,
    Out,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::In => "IN",
            TransactionType::Out => "OUT",
        }
    }
}

impl core::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(TransactionType::In),
            "OUT" => Ok(TransactionType::Out),
            other => Err(DomainError::validation(format!(
                "unknown transaction type: {other}"
            ))),
        }
    }
}

/// Immutable ledger entry recording one quantity change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockTransaction {
    pub id: TransactionId,
    pub product_id: ProductId,
    pub transaction_type: TransactionType,
    pub quantity: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Raw stock-in / stock-out request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StockMovementInput {
    pub product_id: Option<i64>,
    pub quantity: Option<i64>,
    pub notes: Option<String>,
}

/// A validated request to move stock for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockMovement {
    pub product_id: ProductId,
    pub quantity: i64,
    pub notes: Option<String>,
}

impl StockMovement {
    pub fn new(product_id: ProductId, quantity: i64, notes: Option<String>) -> DomainResult<Self> {
        if product_id.get() <= 0 {
            return Err(DomainError::validation("product_id must be positive"));
        }
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be greater than zero"));
        }
        if quantity > MAX_QUANTITY {
            return Err(DomainError::validation(format!(
                "quantity cannot exceed {MAX_QUANTITY}"
            )));
        }
        let notes = notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        Ok(Self {
            product_id,
            quantity,
            notes,
        })
    }
}

/// Result of an applied movement: the new on-hand quantity and its ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub quantity: i64,
    pub transaction: StockTransaction,
}

impl StockMovementInput {
    pub fn validate(self) -> DomainResult<StockMovement> {
        let product_id = self
            .product_id
            .ok_or_else(|| DomainError::validation("product_id is required"))?;
        let quantity = self
            .quantity
            .ok_or_else(|| DomainError::validation("quantity is required"))?;
        StockMovement::new(ProductId::new(product_id), quantity, self.notes)
    }
}
