//! Configuration loading and representation.
//!
//! Values come from environment variables with development defaults. Nothing
//! here is global: the loaded [`AppConfig`] is handed to the store and server
//! at construction.

use std::net::SocketAddr;

use stockroom_inventory::DEFAULT_LOW_STOCK_THRESHOLD;

use crate::error::{StoreError, StoreResult};

pub const ENV_BIND_ADDR: &str = "STOCKROOM_BIND_ADDR";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_MAX_CONNECTIONS: &str = "STOCKROOM_DB_MAX_CONNECTIONS";
pub const ENV_LOW_STOCK_THRESHOLD: &str = "STOCKROOM_LOW_STOCK_THRESHOLD";
pub const ENV_SEED_ON_EMPTY: &str = "STOCKROOM_SEED_ON_EMPTY";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE_URL: &str = "sqlite://inventory.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub low_stock_threshold: i64,
    pub seed_on_empty: bool,
}

impl StoreConfig {
    /// Private in-memory database; used by tests and throwaway runs.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            seed_on_empty: false,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            seed_on_empty: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> StoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> StoreResult<Self> {
        let defaults = StoreConfig::default();

        let bind_addr = lookup(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| StoreError::config(format!("{ENV_BIND_ADDR}: {e}")))?;

        let database_url = lookup(ENV_DATABASE_URL)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.database_url);

        let max_connections = parse_or(&lookup, ENV_MAX_CONNECTIONS, defaults.max_connections)?;
        if max_connections == 0 {
            return Err(StoreError::config(format!("{ENV_MAX_CONNECTIONS}: must be at least 1")));
        }

        let low_stock_threshold =
            parse_or(&lookup, ENV_LOW_STOCK_THRESHOLD, defaults.low_stock_threshold)?;
        if low_stock_threshold < 0 {
            return Err(StoreError::config(format!(
                "{ENV_LOW_STOCK_THRESHOLD}: cannot be negative"
            )));
        }

        let seed_on_empty = parse_or(&lookup, ENV_SEED_ON_EMPTY, defaults.seed_on_empty)?;

        Ok(Self {
            server: ServerConfig { bind_addr },
            store: StoreConfig {
                database_url,
                max_connections,
                low_stock_threshold,
                seed_on_empty,
            },
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> StoreResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| StoreError::config(format!("{key}: {e}"))),
        _ => Ok(default),
    }
}
