//! Handlers for `/events` endpoints. Events have no update route.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::NaiveDate;
use dse_core::{
  Id,
  event::{Event, NewEvent},
  store::StudyStore,
};
use serde::{Deserialize, Serialize};

use crate::{
  body::{Ack, JsonBody, ack, default_user_id},
  error::ApiError,
};

/// `GET /events`
pub async fn list<S: StudyStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Event>>, ApiError> {
  let events = store
    .list_events()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(events))
}

#[derive(Debug, Deserialize)]
pub struct NewEventBody {
  pub title:   String,
  pub date:    NaiveDate,
  #[serde(default = "default_user_id")]
  pub user_id: Id,
}

#[derive(Debug, Serialize)]
pub struct CreatedEvent {
  pub id:         Id,
  pub title:      String,
  pub event_date: NaiveDate,
}

/// `POST /events`, body: `{"title":"...","date":"YYYY-MM-DD"}`
pub async fn create<S: StudyStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewEventBody>,
) -> Result<Json<CreatedEvent>, ApiError> {
  let input = NewEvent {
    user_id:    body.user_id,
    title:      body.title,
    event_date: body.date,
  };
  input.validate()?;

  let event = store
    .add_event(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(CreatedEvent {
    id:         event.id,
    title:      event.title,
    event_date: event.event_date,
  }))
}

/// `DELETE /events/:id`
pub async fn delete_one<S: StudyStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Id>,
) -> Result<Json<Ack>, ApiError> {
  let matched = store
    .delete_event(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(ack("event", id, matched))
}
