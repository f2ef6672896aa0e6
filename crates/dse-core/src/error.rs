//! Error types for `dse-core`.
//!
//! Every variant describes input that was rejected before reaching a store.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
  #[error("field `{0}` must not be blank")]
  Blank(&'static str),

  #[error("amount must be a finite number")]
  NonFiniteAmount,

  #[error("review interval of {0} days is out of range")]
  IntervalOutOfRange(u32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reject empty or whitespace-only text for a required field.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::Blank(field));
  }
  Ok(())
}
