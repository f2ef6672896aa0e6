//! Request and response shapes shared by every resource.

use axum::{Json, extract::FromRequest};
use dse_core::{DEFAULT_USER_ID, Id};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

use crate::error::ApiError;

/// [`axum::Json`] with rejections rendered as [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `{"success": true}`, the answer to every update and delete.
#[derive(Debug, Serialize)]
pub struct Ack {
  pub success: bool,
}

/// Acknowledge a mutation. Misses still count as success; they are only
/// logged.
pub(crate) fn ack(resource: &'static str, id: Id, matched: bool) -> Json<Ack> {
  if !matched {
    tracing::debug!(resource, id, "no row matched");
  }
  Json(Ack { success: true })
}

/// `{"id": .., ...body}`: a create body echoed back with its new id.
#[derive(Debug, Serialize)]
pub struct Created<B> {
  pub id:   Id,
  #[serde(flatten)]
  pub body: B,
}

/// Body of `PUT /tasks/:id` and `PUT /diary/:id`.
#[derive(Debug, Deserialize)]
pub struct CompletedBody {
  #[serde(deserialize_with = "flag")]
  pub completed: bool,
}

pub(crate) fn default_user_id() -> Id { DEFAULT_USER_ID }

/// Accept `true`/`false` as well as `1`/`0`.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Flag {
    Bool(bool),
    Int(i64),
  }

  match Flag::deserialize(deserializer)? {
    Flag::Bool(b) => Ok(b),
    Flag::Int(0) => Ok(false),
    Flag::Int(1) => Ok(true),
    Flag::Int(n) => Err(D::Error::custom(format!("expected 0 or 1, got {n}"))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn completed(json: &str) -> Result<bool, serde_json::Error> {
    serde_json::from_str::<CompletedBody>(json).map(|b| b.completed)
  }

  #[test]
  fn completed_accepts_bools_and_bits() {
    assert!(completed(r#"{"completed":true}"#).unwrap());
    assert!(!completed(r#"{"completed":false}"#).unwrap());
    assert!(completed(r#"{"completed":1}"#).unwrap());
    assert!(!completed(r#"{"completed":0}"#).unwrap());
  }

  #[test]
  fn completed_rejects_other_values() {
    assert!(completed(r#"{"completed":2}"#).is_err());
    assert!(completed(r#"{"completed":"yes"}"#).is_err());
    assert!(completed(r#"{}"#).is_err());
  }

  #[test]
  fn created_flattens_body() {
    #[derive(Serialize)]
    struct Body {
      title: &'static str,
    }
    let v = serde_json::to_value(Created { id: 3, body: Body { title: "t" } }).unwrap();
    assert_eq!(v, serde_json::json!({ "id": 3, "title": "t" }));
  }
}
