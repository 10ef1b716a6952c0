//! Infrastructure layer: configuration, SQLite persistence, sample data.

pub mod config;
pub mod db;
pub mod error;
pub mod seed;
pub mod store;

pub use config::{AppConfig, ServerConfig, StoreConfig};
pub use db::Database;
pub use error::{StoreError, StoreResult};
pub use store::{ClearedCounts, CsvExport, InventoryStore};
