//! Notes, most recently modified first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_USER_ID, Id, Result, error::require_text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
  pub id:            Id,
  pub user_id:       Id,
  pub title:         String,
  pub body:          String,
  /// Set on insert and refreshed by every update.
  pub last_modified: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNote {
  pub user_id: Id,
  pub title:   String,
  pub body:    String,
}

impl NewNote {
  pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
    Self {
      user_id: DEFAULT_USER_ID,
      title:   title.into(),
      body:    body.into(),
    }
  }

  pub fn validate(&self) -> Result<()> { require_text("title", &self.title) }
}

/// Replacement title and body for an existing note.
#[derive(Debug, Clone)]
pub struct NoteUpdate {
  pub title: String,
  pub body:  String,
}

impl NoteUpdate {
  pub fn validate(&self) -> Result<()> { require_text("title", &self.title) }
}
