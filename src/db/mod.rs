pub mod adapter;
pub mod models;
pub mod price_changes;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::config::POOL_MAX_CONNECTIONS;
use crate::error::{AppError, Result};

/// Builds a lazy pool for one backing store. No connection is attempted
/// until the first query, so an unreachable store degrades that store's
/// queries to warnings instead of failing process startup.
pub fn lazy_pool(url: &str) -> Result<MySqlPool> {
    MySqlPoolOptions::new()
        .max_connections(POOL_MAX_CONNECTIONS)
        .connect_lazy(url)
        .map_err(AppError::from_sqlx)
}
