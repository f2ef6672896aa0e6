//! The spaced-repetition question bank.
//!
//! Scheduling is deliberately minimal: a question is due again `interval`
//! days after it was last reviewed, where `interval` is whatever the client
//! chose. There is no ease factor and no review history; each review
//! overwrites the previous interval.

use chrono::{DateTime, Datelike as _, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_USER_ID, Error, Id, Result, error::require_text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
  pub id:              Id,
  pub user_id:         Id,
  pub subject:         String,
  pub topic:           String,
  pub question_text:   String,
  pub answer_text:     String,
  /// Base64 (usually a data URL) of an attached image.
  pub image_data:      Option<String>,
  pub next_review:     DateTime<Utc>,
  /// Days between the last review and `next_review`.
  pub review_interval: u32,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
  pub user_id:       Id,
  pub subject:       String,
  pub topic:         String,
  pub question_text: String,
  pub answer_text:   String,
  pub image_data:    Option<String>,
}

impl NewQuestion {
  pub fn new(
    subject: impl Into<String>,
    topic: impl Into<String>,
    question_text: impl Into<String>,
    answer_text: impl Into<String>,
  ) -> Self {
    Self {
      user_id:       DEFAULT_USER_ID,
      subject:       subject.into(),
      topic:         topic.into(),
      question_text: question_text.into(),
      answer_text:   answer_text.into(),
      image_data:    None,
    }
  }

  /// The answer may be empty (e.g. when it lives in the image); everything
  /// else must carry text.
  pub fn validate(&self) -> Result<()> {
    require_text("subject", &self.subject)?;
    require_text("topic", &self.topic)?;
    require_text("question", &self.question_text)
  }
}

// ─── Scheduling ──────────────────────────────────────────────────────────────

/// The pair of columns written whenever a question is created or reviewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewSchedule {
  pub next_review:     DateTime<Utc>,
  pub review_interval: u32,
}

impl ReviewSchedule {
  pub const INITIAL_INTERVAL: u32 = 1;
  pub const MAX_YEAR: i32 = 9999;

  /// Schedule for a freshly created question: due tomorrow.
  pub fn initial(now: DateTime<Utc>) -> Self {
    Self {
      next_review:     now + TimeDelta::days(i64::from(Self::INITIAL_INTERVAL)),
      review_interval: Self::INITIAL_INTERVAL,
    }
  }

  /// Schedule after a review at `now` with a client-chosen interval.
  ///
  /// Fails when the resulting timestamp falls past [`Self::MAX_YEAR`], the
  /// last year an RFC 3339 timestamp can carry.
  pub fn after(now: DateTime<Utc>, interval: u32) -> Result<Self> {
    let next_review = TimeDelta::try_days(i64::from(interval))
      .and_then(|delta| now.checked_add_signed(delta))
      .filter(|at| at.year() <= Self::MAX_YEAR)
      .ok_or(Error::IntervalOutOfRange(interval))?;
    Ok(Self { next_review, review_interval: interval })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
  }

  #[test]
  fn initial_schedule_is_one_day_out() {
    let s = ReviewSchedule::initial(noon());
    assert_eq!(s.review_interval, 1);
    assert_eq!(s.next_review, Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap());
  }

  #[test]
  fn review_adds_interval_in_days() {
    let s = ReviewSchedule::after(noon(), 7).unwrap();
    assert_eq!(s.review_interval, 7);
    assert_eq!(s.next_review, Utc.with_ymd_and_hms(2024, 3, 8, 12, 0, 0).unwrap());
  }

  #[test]
  fn zero_interval_is_due_immediately() {
    let s = ReviewSchedule::after(noon(), 0).unwrap();
    assert_eq!(s.next_review, noon());
  }

  #[test]
  fn unrepresentable_interval_is_rejected() {
    assert_eq!(
      ReviewSchedule::after(noon(), u32::MAX),
      Err(Error::IntervalOutOfRange(u32::MAX)),
    );
  }

  #[test]
  fn interval_past_year_9999_is_rejected() {
    assert_eq!(
      ReviewSchedule::after(noon(), 3_000_000),
      Err(Error::IntervalOutOfRange(3_000_000)),
    );
  }

  #[test]
  fn interval_up_to_year_9999_is_accepted() {
    // 2024-03-01 + 2_900_000 days lands in the 9900s.
    let s = ReviewSchedule::after(noon(), 2_900_000).unwrap();
    assert!(s.next_review.year() <= ReviewSchedule::MAX_YEAR);
  }

  #[test]
  fn blank_question_fails_validation() {
    let q = NewQuestion::new("Maths", "Calculus", "  ", "42");
    assert_eq!(q.validate(), Err(Error::Blank("question")));
  }

  #[test]
  fn empty_answer_is_allowed() {
    assert!(NewQuestion::new("Maths", "Calculus", "d/dx x^2?", "").validate().is_ok());
  }
}
