//! Handlers for `/tasks` endpoints.
//!
//! | Method   | Path         | Notes |
//! |----------|--------------|-------|
//! | `GET`    | `/tasks`     | Newest first |
//! | `POST`   | `/tasks`     | Body: [`NewTaskBody`]; returns `{id, text, completed}` |
//! | `PUT`    | `/tasks/:id` | Body: `{"completed": true}` |
//! | `DELETE` | `/tasks/:id` | |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use dse_core::{
  Id,
  store::StudyStore,
  task::{NewTask, Task},
};
use serde::{Deserialize, Serialize};

use crate::{
  body::{Ack, CompletedBody, JsonBody, ack, default_user_id},
  error::ApiError,
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /tasks`
pub async fn list<S: StudyStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Task>>, ApiError> {
  let tasks = store
    .list_tasks()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(tasks))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NewTaskBody {
  pub text:    String,
  #[serde(default = "default_user_id")]
  pub user_id: Id,
}

impl From<NewTaskBody> for NewTask {
  fn from(b: NewTaskBody) -> Self {
    NewTask {
      user_id: b.user_id,
      text:    b.text,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct CreatedTask {
  pub id:        Id,
  pub text:      String,
  pub completed: bool,
}

/// `POST /tasks`, body: `{"text":"..."}`
pub async fn create<S: StudyStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewTaskBody>,
) -> Result<Json<CreatedTask>, ApiError> {
  let input = NewTask::from(body);
  input.validate()?;

  let task = store
    .add_task(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(CreatedTask {
    id:        task.id,
    text:      task.text,
    completed: task.completed,
  }))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /tasks/:id`, body: `{"completed": true}`
pub async fn update<S: StudyStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Id>,
  JsonBody(body): JsonBody<CompletedBody>,
) -> Result<Json<Ack>, ApiError> {
  let matched = store
    .set_task_completed(id, body.completed)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(ack("task", id, matched))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /tasks/:id`
pub async fn delete_one<S: StudyStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Id>,
) -> Result<Json<Ack>, ApiError> {
  let matched = store
    .delete_task(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(ack("task", id, matched))
}
