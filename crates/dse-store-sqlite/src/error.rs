//! Error type for `dse-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown finance type: {0:?}")]
  UnknownFinanceKind(String),

  /// The pool was closed by [`SqliteStore::close`](crate::SqliteStore::close).
  #[error("connection pool is closed")]
  PoolClosed,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
