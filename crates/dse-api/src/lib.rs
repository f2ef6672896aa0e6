//! JSON REST API for the DSE Survival Kit.
//!
//! Exposes an axum [`Router`] backed by any [`dse_core::store::StudyStore`].
//! CORS, body limits, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", dse_api::api_router(store.clone()))
//! ```

pub mod body;
pub mod diary;
pub mod error;
pub mod events;
pub mod finance;
pub mod notes;
pub mod questions;
pub mod tasks;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, put},
};
use dse_core::store::StudyStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: StudyStore + 'static,
{
  Router::new()
    // Tasks
    .route("/tasks", get(tasks::list::<S>).post(tasks::create::<S>))
    .route("/tasks/{id}", put(tasks::update::<S>).delete(tasks::delete_one::<S>))
    // Questions
    .route("/questions", get(questions::list::<S>).post(questions::create::<S>))
    .route("/questions/{id}/review", put(questions::review::<S>))
    // Diary
    .route("/diary", get(diary::list::<S>).post(diary::create::<S>))
    .route("/diary/{id}", put(diary::update::<S>).delete(diary::delete_one::<S>))
    // Finance
    .route("/finance", get(finance::list::<S>).post(finance::create::<S>))
    .route("/finance/{id}", delete(finance::delete_one::<S>))
    // Events
    .route("/events", get(events::list::<S>).post(events::create::<S>))
    .route("/events/{id}", delete(events::delete_one::<S>))
    // Notes
    .route("/notes", get(notes::list::<S>).post(notes::create::<S>))
    .route("/notes/{id}", put(notes::update::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
