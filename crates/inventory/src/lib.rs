//! Inventory domain module.
//!
//! This crate contains the stock ledger model, the low-stock rule and the
//! reporting shapes, implemented purely as deterministic domain logic (no IO,
//! no HTTP, no storage).

pub mod csv;
pub mod report;
pub mod stock;
pub mod transaction;

pub use report::{CategoryStats, InventoryReport, RecentTransaction, SummaryReport};
pub use stock::{LowStockPolicy, StockStatus, DEFAULT_LOW_STOCK_THRESHOLD};
pub use transaction::{
    StockMovement, StockMovementInput, StockTransaction, StockUpdate, TransactionType,
};
