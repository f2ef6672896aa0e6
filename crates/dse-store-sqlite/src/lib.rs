//! SQLite backend for the DSE Survival Kit store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on dedicated
//! connection threads without blocking the async runtime. Connections are
//! handed out by a small bounded pool, one per statement.

mod encode;
mod pool;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use pool::DEFAULT_POOL_SIZE;
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
