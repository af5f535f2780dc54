//! Database layer - connection pool, schema, repositories
//!
//! # Design Principles
//!
//! - Connection pool, one scoped connection or transaction per operation
//! - Rely on DB constraints for uniqueness, pre-checks only for friendlier errors
//! - Roll back before surfacing any storage error

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_memory_pool, create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;

use sqlx::SqlitePool;

/// Open a pool and make sure the schema exists.
pub async fn open(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let pool = create_pool_with_options(database_url, max_connections).await?;
    migrations::run(&pool).await?;
    Ok(pool)
}
