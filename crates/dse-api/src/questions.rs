//! Handlers for `/questions` endpoints.
//!
//! | Method | Path                    | Notes |
//! |--------|-------------------------|-------|
//! | `GET`  | `/questions`            | Creation order |
//! | `POST` | `/questions`            | Body: [`QuestionBody`]; echoed back with its id |
//! | `PUT`  | `/questions/:id/review` | Body: `{"interval": <days>}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::Utc;
use dse_core::{
  Id,
  question::{NewQuestion, Question, ReviewSchedule},
  store::StudyStore,
};
use serde::{Deserialize, Serialize};

use crate::{
  body::{Ack, Created, JsonBody, ack, default_user_id},
  error::ApiError,
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /questions`
pub async fn list<S: StudyStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Question>>, ApiError> {
  let questions = store
    .list_questions()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(questions))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /questions`, and echoed in its response.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionBody {
  pub subject:  String,
  pub topic:    String,
  pub question: String,
  pub answer:   String,
  /// Base64 image, usually a data URL.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image:    Option<String>,
  #[serde(default = "default_user_id")]
  pub user_id:  Id,
}

impl From<QuestionBody> for NewQuestion {
  fn from(b: QuestionBody) -> Self {
    NewQuestion {
      user_id:       b.user_id,
      subject:       b.subject,
      topic:         b.topic,
      question_text: b.question,
      answer_text:   b.answer,
      image_data:    b.image,
    }
  }
}

impl From<Question> for QuestionBody {
  fn from(q: Question) -> Self {
    QuestionBody {
      subject:  q.subject,
      topic:    q.topic,
      question: q.question_text,
      answer:   q.answer_text,
      image:    q.image_data,
      user_id:  q.user_id,
    }
  }
}

/// `POST /questions`. The question is first due one day from now.
pub async fn create<S: StudyStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<QuestionBody>,
) -> Result<Json<Created<QuestionBody>>, ApiError> {
  let input = NewQuestion::from(body);
  input.validate()?;

  let question = store
    .add_question(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(Created {
    id:   question.id,
    body: QuestionBody::from(question),
  }))
}

// ─── Review ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
  /// Days until the question is due again.
  pub interval: u32,
}

/// `PUT /questions/:id/review` reschedules to `now + interval` days.
pub async fn review<S: StudyStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Id>,
  JsonBody(body): JsonBody<ReviewBody>,
) -> Result<Json<Ack>, ApiError> {
  let schedule = ReviewSchedule::after(Utc::now(), body.interval)?;

  let matched = store
    .review_question(id, schedule)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(ack("question", id, matched))
}
