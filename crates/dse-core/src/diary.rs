//! Diary entries: homework and other dated items, soonest first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_USER_ID, Id, Result, error::require_text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
  pub id:          Id,
  pub user_id:     Id,
  pub subject:     String,
  pub description: String,
  pub due_date:    NaiveDate,
  /// Free-form category chosen by the client (e.g. `"homework"`, `"test"`).
  #[serde(rename = "type")]
  pub kind:        String,
  pub completed:   bool,
}

#[derive(Debug, Clone)]
pub struct NewDiaryEntry {
  pub user_id:     Id,
  pub subject:     String,
  pub description: String,
  pub due_date:    NaiveDate,
  pub kind:        String,
}

impl NewDiaryEntry {
  pub fn new(
    subject: impl Into<String>,
    description: impl Into<String>,
    due_date: NaiveDate,
    kind: impl Into<String>,
  ) -> Self {
    Self {
      user_id: DEFAULT_USER_ID,
      subject: subject.into(),
      description: description.into(),
      due_date,
      kind: kind.into(),
    }
  }

  pub fn validate(&self) -> Result<()> {
    require_text("subject", &self.subject)?;
    require_text("description", &self.description)?;
    require_text("type", &self.kind)
  }
}
