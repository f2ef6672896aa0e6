//! Calendar events. Events are created and deleted, never edited.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_USER_ID, Id, Result, error::require_text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
  pub id:         Id,
  pub user_id:    Id,
  pub title:      String,
  pub event_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
  pub user_id:    Id,
  pub title:      String,
  pub event_date: NaiveDate,
}

impl NewEvent {
  pub fn new(title: impl Into<String>, event_date: NaiveDate) -> Self {
    Self {
      user_id: DEFAULT_USER_ID,
      title: title.into(),
      event_date,
    }
  }

  pub fn validate(&self) -> Result<()> { require_text("title", &self.title) }
}
