//! A bounded pool of [`tokio_rusqlite`] connections.
//!
//! Each connection owns a background thread. A caller holds one connection
//! for the duration of a single statement; callers beyond the pool's
//! capacity wait on a semaphore in arrival order.

use std::{
  ops::Deref,
  path::Path,
  sync::{Mutex, MutexGuard, PoisonError},
  time::Duration,
};

use tokio::sync::{Semaphore, SemaphorePermit};
use tokio_rusqlite::Connection;

use crate::{Error, Result, schema::SCHEMA};

/// Connection count used by [`SqliteStore::open`](crate::SqliteStore::open).
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// How long a statement waits on SQLite's write lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) struct Pool {
  idle:    Mutex<Vec<Connection>>,
  permits: Semaphore,
  size:    u32,
}

impl Pool {
  /// Open `size` connections to the database at `path`. The schema is
  /// applied through the first one before the rest are opened.
  pub async fn open(path: &Path, size: u32) -> Result<Self> {
    let size = size.max(1);
    let mut conns = Vec::with_capacity(size as usize);
    for n in 0..size {
      let conn = Connection::open(path).await?;
      configure(&conn, n == 0).await?;
      conns.push(conn);
    }
    Ok(Self::from_connections(conns))
  }

  /// A single in-memory connection. Separate in-memory connections would each
  /// see their own empty database, so this pool never grows.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory().await?;
    configure(&conn, true).await?;
    Ok(Self::from_connections(vec![conn]))
  }

  fn from_connections(conns: Vec<Connection>) -> Self {
    let size = conns.len() as u32;
    Self {
      idle: Mutex::new(conns),
      permits: Semaphore::new(size as usize),
      size,
    }
  }

  pub fn size(&self) -> u32 { self.size }

  fn idle(&self) -> MutexGuard<'_, Vec<Connection>> {
    self.idle.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Wait for a free connection.
  pub async fn acquire(&self) -> Result<PooledConnection<'_>> {
    let permit = self.permits.acquire().await.map_err(|_| Error::PoolClosed)?;
    // Holding a permit guarantees an idle connection.
    let conn = self.idle().pop().ok_or(Error::PoolClosed)?;
    Ok(PooledConnection {
      conn,
      pool: self,
      _permit: permit,
    })
  }

  /// Wait for every borrowed connection to come back, then close them all.
  /// Later calls to [`acquire`](Self::acquire) fail with
  /// [`Error::PoolClosed`].
  pub async fn close(&self) -> Result<()> {
    let _all = self
      .permits
      .acquire_many(self.size)
      .await
      .map_err(|_| Error::PoolClosed)?;
    self.permits.close();

    let conns = std::mem::take(&mut *self.idle());
    for conn in conns {
      conn.close().await?;
    }
    Ok(())
  }
}

async fn configure(conn: &Connection, apply_schema: bool) -> Result<()> {
  conn
    .call(move |conn| {
      conn.busy_timeout(BUSY_TIMEOUT)?;
      if apply_schema {
        conn.execute_batch(SCHEMA)?;
      }
      Ok(())
    })
    .await?;
  Ok(())
}

// ─── Guard ───────────────────────────────────────────────────────────────────

/// A connection borrowed from the [`Pool`]; returned to it on drop.
pub(crate) struct PooledConnection<'a> {
  conn:    Connection,
  pool:    &'a Pool,
  // Dropped after `drop` has pushed the connection back.
  _permit: SemaphorePermit<'a>,
}

impl Deref for PooledConnection<'_> {
  type Target = Connection;

  fn deref(&self) -> &Connection { &self.conn }
}

impl Drop for PooledConnection<'_> {
  fn drop(&mut self) {
    // Clones share the same background thread.
    self.pool.idle().push(self.conn.clone());
  }
}
