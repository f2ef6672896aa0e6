//! Tasks: a flat to-do list, newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_USER_ID, Id, Result, error::require_text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
  pub id:         Id,
  pub user_id:    Id,
  pub text:       String,
  pub completed:  bool,
  pub created_at: DateTime<Utc>,
}

/// Input to [`StudyStore::add_task`](crate::store::StudyStore::add_task).
/// New tasks always start incomplete.
#[derive(Debug, Clone)]
pub struct NewTask {
  pub user_id: Id,
  pub text:    String,
}

impl NewTask {
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      user_id: DEFAULT_USER_ID,
      text:    text.into(),
    }
  }

  pub fn validate(&self) -> Result<()> { require_text("text", &self.text) }
}
