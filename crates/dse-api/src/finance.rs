//! Handlers for `/finance` endpoints.
//!
//! | Method   | Path           | Notes |
//! |----------|----------------|-------|
//! | `GET`    | `/finance`     | Newest transaction first |
//! | `POST`   | `/finance`     | Body: [`FinanceBody`]; echoed back with its id |
//! | `DELETE` | `/finance/:id` | |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use dse_core::{
  Id,
  finance::{FinanceKind, FinanceRecord, NewFinanceRecord},
  store::StudyStore,
};
use serde::{Deserialize, Serialize};

use crate::{
  body::{Ack, Created, JsonBody, ack, default_user_id},
  error::ApiError,
};

/// `GET /finance`
pub async fn list<S: StudyStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<FinanceRecord>>, ApiError> {
  let records = store
    .list_finance()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FinanceBody {
  pub description: String,
  pub amount:      f64,
  /// `"income"` or `"expense"`; anything else is rejected.
  #[serde(rename = "type")]
  pub kind:        FinanceKind,
  pub category:    String,
  #[serde(default = "default_user_id")]
  pub user_id:     Id,
}

impl From<FinanceBody> for NewFinanceRecord {
  fn from(b: FinanceBody) -> Self {
    NewFinanceRecord {
      user_id:     b.user_id,
      description: b.description,
      amount:      b.amount,
      kind:        b.kind,
      category:    b.category,
    }
  }
}

impl From<FinanceRecord> for FinanceBody {
  fn from(r: FinanceRecord) -> Self {
    FinanceBody {
      description: r.description,
      amount:      r.amount,
      kind:        r.kind,
      category:    r.category,
      user_id:     r.user_id,
    }
  }
}

/// `POST /finance`. The transaction date is set by the store.
pub async fn create<S: StudyStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<FinanceBody>,
) -> Result<Json<Created<FinanceBody>>, ApiError> {
  let input = NewFinanceRecord::from(body);
  input.validate()?;

  let record = store
    .add_finance_record(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(Created {
    id:   record.id,
    body: FinanceBody::from(record),
  }))
}

/// `DELETE /finance/:id`
pub async fn delete_one<S: StudyStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Id>,
) -> Result<Json<Ack>, ApiError> {
  let matched = store
    .delete_finance_record(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(ack("finance record", id, matched))
}
