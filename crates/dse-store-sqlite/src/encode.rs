//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed microsecond
//! precision, so lexicographic order in SQL equals chronological order.
//! Calendar dates are stored as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound as _, Utc};
use dse_core::{
  Id,
  diary::DiaryEntry,
  event::Event,
  finance::{FinanceKind, FinanceRecord},
  note::Note,
  question::Question,
  task::Task,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// The current time, truncated to the precision the store keeps.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── FinanceKind ─────────────────────────────────────────────────────────────

pub fn encode_finance_kind(k: FinanceKind) -> &'static str {
  match k {
    FinanceKind::Income => "income",
    FinanceKind::Expense => "expense",
  }
}

pub fn decode_finance_kind(s: &str) -> Result<FinanceKind> {
  match s {
    "income" => Ok(FinanceKind::Income),
    "expense" => Ok(FinanceKind::Expense),
    other => Err(Error::UnknownFinanceKind(other.to_owned())),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `tasks` row.
pub struct RawTask {
  pub id:         Id,
  pub user_id:    Id,
  pub text:       String,
  pub completed:  bool,
  pub created_at: String,
}

impl RawTask {
  pub fn into_task(self) -> Result<Task> {
    Ok(Task {
      id:         self.id,
      user_id:    self.user_id,
      text:       self.text,
      completed:  self.completed,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `questions` row.
pub struct RawQuestion {
  pub id:              Id,
  pub user_id:         Id,
  pub subject:         String,
  pub topic:           String,
  pub question_text:   String,
  pub answer_text:     String,
  pub image_data:      Option<String>,
  pub next_review:     String,
  pub review_interval: u32,
}

impl RawQuestion {
  pub fn into_question(self) -> Result<Question> {
    Ok(Question {
      id:              self.id,
      user_id:         self.user_id,
      subject:         self.subject,
      topic:           self.topic,
      question_text:   self.question_text,
      answer_text:     self.answer_text,
      image_data:      self.image_data,
      next_review:     decode_dt(&self.next_review)?,
      review_interval: self.review_interval,
    })
  }
}

/// Raw values read directly from a `diary` row.
pub struct RawDiaryEntry {
  pub id:          Id,
  pub user_id:     Id,
  pub subject:     String,
  pub description: String,
  pub due_date:    String,
  pub kind:        String,
  pub completed:   bool,
}

impl RawDiaryEntry {
  pub fn into_entry(self) -> Result<DiaryEntry> {
    Ok(DiaryEntry {
      id:          self.id,
      user_id:     self.user_id,
      subject:     self.subject,
      description: self.description,
      due_date:    decode_date(&self.due_date)?,
      kind:        self.kind,
      completed:   self.completed,
    })
  }
}

/// Raw values read directly from a `finance` row.
pub struct RawFinanceRecord {
  pub id:               Id,
  pub user_id:          Id,
  pub description:      String,
  pub amount:           f64,
  pub kind:             String,
  pub category:         String,
  pub transaction_date: String,
}

impl RawFinanceRecord {
  pub fn into_record(self) -> Result<FinanceRecord> {
    Ok(FinanceRecord {
      id:               self.id,
      user_id:          self.user_id,
      description:      self.description,
      amount:           self.amount,
      kind:             decode_finance_kind(&self.kind)?,
      category:         self.category,
      transaction_date: decode_dt(&self.transaction_date)?,
    })
  }
}

/// Raw values read directly from an `events` row.
pub struct RawEvent {
  pub id:         Id,
  pub user_id:    Id,
  pub title:      String,
  pub event_date: String,
}

impl RawEvent {
  pub fn into_event(self) -> Result<Event> {
    Ok(Event {
      id:         self.id,
      user_id:    self.user_id,
      title:      self.title,
      event_date: decode_date(&self.event_date)?,
    })
  }
}

/// Raw values read directly from a `notes` row.
pub struct RawNote {
  pub id:            Id,
  pub user_id:       Id,
  pub title:         String,
  pub body:          String,
  pub last_modified: String,
}

impl RawNote {
  pub fn into_note(self) -> Result<Note> {
    Ok(Note {
      id:            self.id,
      user_id:       self.user_id,
      title:         self.title,
      body:          self.body,
      last_modified: decode_dt(&self.last_modified)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  #[test]
  fn timestamps_have_fixed_width() {
    let whole = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let frac = whole + chrono::TimeDelta::microseconds(120);
    assert_eq!(encode_dt(whole), "2024-01-02T03:04:05.000000Z");
    assert_eq!(encode_dt(frac), "2024-01-02T03:04:05.000120Z");
    assert!(encode_dt(whole) < encode_dt(frac));
  }

  #[test]
  fn timestamp_round_trips_at_store_precision() {
    let t = now();
    assert_eq!(decode_dt(&encode_dt(t)).unwrap(), t);
  }

  #[test]
  fn unknown_finance_kind_is_an_error() {
    assert!(matches!(
      decode_finance_kind("refund"),
      Err(Error::UnknownFinanceKind(k)) if k == "refund"
    ));
  }
}
