//! Handlers for `/diary` endpoints.
//!
//! | Method   | Path         | Notes |
//! |----------|--------------|-------|
//! | `GET`    | `/diary`     | Earliest due date first |
//! | `POST`   | `/diary`     | Body: [`DiaryBody`]; echoed back with its id |
//! | `PUT`    | `/diary/:id` | Body: `{"completed": true}` |
//! | `DELETE` | `/diary/:id` | |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::NaiveDate;
use dse_core::{
  Id,
  diary::{DiaryEntry, NewDiaryEntry},
  store::StudyStore,
};
use serde::{Deserialize, Serialize};

use crate::{
  body::{Ack, CompletedBody, Created, JsonBody, ack, default_user_id},
  error::ApiError,
};

/// `GET /diary`
pub async fn list<S: StudyStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<DiaryEntry>>, ApiError> {
  let entries = store
    .list_diary()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(entries))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiaryBody {
  pub subject:     String,
  pub description: String,
  #[serde(rename = "dueDate")]
  pub due_date:    NaiveDate,
  #[serde(rename = "type")]
  pub kind:        String,
  #[serde(default = "default_user_id")]
  pub user_id:     Id,
}

impl From<DiaryBody> for NewDiaryEntry {
  fn from(b: DiaryBody) -> Self {
    NewDiaryEntry {
      user_id:     b.user_id,
      subject:     b.subject,
      description: b.description,
      due_date:    b.due_date,
      kind:        b.kind,
    }
  }
}

impl From<DiaryEntry> for DiaryBody {
  fn from(d: DiaryEntry) -> Self {
    DiaryBody {
      subject:     d.subject,
      description: d.description,
      due_date:    d.due_date,
      kind:        d.kind,
      user_id:     d.user_id,
    }
  }
}

/// `POST /diary`
pub async fn create<S: StudyStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<DiaryBody>,
) -> Result<Json<Created<DiaryBody>>, ApiError> {
  let input = NewDiaryEntry::from(body);
  input.validate()?;

  let entry = store
    .add_diary_entry(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(Created {
    id:   entry.id,
    body: DiaryBody::from(entry),
  }))
}

/// `PUT /diary/:id`
pub async fn update<S: StudyStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Id>,
  JsonBody(body): JsonBody<CompletedBody>,
) -> Result<Json<Ack>, ApiError> {
  let matched = store
    .set_diary_completed(id, body.completed)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(ack("diary entry", id, matched))
}

/// `DELETE /diary/:id`
pub async fn delete_one<S: StudyStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Id>,
) -> Result<Json<Ack>, ApiError> {
  let matched = store
    .delete_diary_entry(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(ack("diary entry", id, matched))
}
