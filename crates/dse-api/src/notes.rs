//! Handlers for `/notes` endpoints.
//!
//! | Method | Path         | Notes |
//! |--------|--------------|-------|
//! | `GET`  | `/notes`     | Most recently modified first |
//! | `POST` | `/notes`     | Body: `{"title":"...","body":"..."}` |
//! | `PUT`  | `/notes/:id` | Body: `{"title":"...","body":"..."}`; replaces both |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use dse_core::{
  Id,
  note::{NewNote, Note, NoteUpdate},
  store::StudyStore,
};
use serde::{Deserialize, Serialize};

use crate::{
  body::{Ack, JsonBody, ack, default_user_id},
  error::ApiError,
};

/// `GET /notes`
pub async fn list<S: StudyStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Note>>, ApiError> {
  let notes = store
    .list_notes()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(notes))
}

#[derive(Debug, Deserialize)]
pub struct NewNoteBody {
  pub title:   String,
  pub body:    String,
  #[serde(default = "default_user_id")]
  pub user_id: Id,
}

#[derive(Debug, Serialize)]
pub struct CreatedNote {
  pub id:    Id,
  pub title: String,
  pub body:  String,
}

/// `POST /notes`
pub async fn create<S: StudyStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewNoteBody>,
) -> Result<Json<CreatedNote>, ApiError> {
  let input = NewNote {
    user_id: body.user_id,
    title:   body.title,
    body:    body.body,
  };
  input.validate()?;

  let note = store
    .add_note(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(CreatedNote {
    id:    note.id,
    title: note.title,
    body:  note.body,
  }))
}

#[derive(Debug, Deserialize)]
pub struct NoteUpdateBody {
  pub title: String,
  pub body:  String,
}

/// `PUT /notes/:id`
pub async fn update<S: StudyStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Id>,
  JsonBody(body): JsonBody<NoteUpdateBody>,
) -> Result<Json<Ack>, ApiError> {
  let update = NoteUpdate {
    title: body.title,
    body:  body.body,
  };
  update.validate()?;

  let matched = store
    .update_note(id, update)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(ack("note", id, matched))
}
