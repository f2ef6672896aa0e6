//! [`MemoryStore`], an in-process [`StudyStore`] for tests and demos.
//!
//! Mirrors the SQLite backend's observable behaviour: ids start at 1 and are
//! never reused, and every list uses the same ordering as the SQL queries.

use std::{
  convert::Infallible,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chrono::Utc;

use crate::{
  Id,
  diary::{DiaryEntry, NewDiaryEntry},
  event::{Event, NewEvent},
  finance::{FinanceRecord, NewFinanceRecord},
  note::{NewNote, Note, NoteUpdate},
  question::{NewQuestion, Question, ReviewSchedule},
  store::StudyStore,
  task::{NewTask, Task},
};

// ─── Tables ──────────────────────────────────────────────────────────────────

struct Table<T> {
  rows:    Vec<T>,
  last_id: Id,
}

impl<T> Default for Table<T> {
  fn default() -> Self {
    Self {
      rows:    Vec::new(),
      last_id: 0,
    }
  }
}

impl<T: Clone> Table<T> {
  fn insert(&mut self, build: impl FnOnce(Id) -> T) -> T {
    self.last_id += 1;
    let row = build(self.last_id);
    self.rows.push(row.clone());
    row
  }

  fn update(&mut self, matches: impl Fn(&T) -> bool, apply: impl FnOnce(&mut T)) -> bool {
    match self.rows.iter_mut().find(|row| matches(row)) {
      Some(row) => {
        apply(row);
        true
      }
      None => false,
    }
  }

  fn remove(&mut self, matches: impl Fn(&T) -> bool) -> bool {
    let before = self.rows.len();
    self.rows.retain(|row| !matches(row));
    self.rows.len() != before
  }
}

#[derive(Default)]
struct Tables {
  tasks:     Table<Task>,
  questions: Table<Question>,
  diary:     Table<DiaryEntry>,
  finance:   Table<FinanceRecord>,
  events:    Table<Event>,
  notes:     Table<Note>,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A store held entirely in memory.
///
/// Cloning is cheap and clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
  tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn tables(&self) -> MutexGuard<'_, Tables> {
    // No invariant spans more than one statement, so a poisoned lock is
    // still consistent.
    self.tables.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl StudyStore for MemoryStore {
  type Error = Infallible;

  // ── Tasks ─────────────────────────────────────────────────────────────────

  async fn list_tasks(&self) -> Result<Vec<Task>, Infallible> {
    let mut rows = self.tables().tasks.rows.clone();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    Ok(rows)
  }

  async fn add_task(&self, input: NewTask) -> Result<Task, Infallible> {
    Ok(self.tables().tasks.insert(|id| Task {
      id,
      user_id: input.user_id,
      text: input.text,
      completed: false,
      created_at: Utc::now(),
    }))
  }

  async fn set_task_completed(&self, id: Id, completed: bool) -> Result<bool, Infallible> {
    Ok(self.tables().tasks.update(|t| t.id == id, |t| t.completed = completed))
  }

  async fn delete_task(&self, id: Id) -> Result<bool, Infallible> {
    Ok(self.tables().tasks.remove(|t| t.id == id))
  }

  // ── Questions ─────────────────────────────────────────────────────────────

  async fn list_questions(&self) -> Result<Vec<Question>, Infallible> {
    Ok(self.tables().questions.rows.clone())
  }

  async fn add_question(&self, input: NewQuestion) -> Result<Question, Infallible> {
    let schedule = ReviewSchedule::initial(Utc::now());
    Ok(self.tables().questions.insert(|id| Question {
      id,
      user_id: input.user_id,
      subject: input.subject,
      topic: input.topic,
      question_text: input.question_text,
      answer_text: input.answer_text,
      image_data: input.image_data,
      next_review: schedule.next_review,
      review_interval: schedule.review_interval,
    }))
  }

  async fn review_question(&self, id: Id, schedule: ReviewSchedule) -> Result<bool, Infallible> {
    Ok(self.tables().questions.update(
      |q| q.id == id,
      |q| {
        q.next_review = schedule.next_review;
        q.review_interval = schedule.review_interval;
      },
    ))
  }

  // ── Diary ─────────────────────────────────────────────────────────────────

  async fn list_diary(&self) -> Result<Vec<DiaryEntry>, Infallible> {
    let mut rows = self.tables().diary.rows.clone();
    rows.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.id.cmp(&b.id)));
    Ok(rows)
  }

  async fn add_diary_entry(&self, input: NewDiaryEntry) -> Result<DiaryEntry, Infallible> {
    Ok(self.tables().diary.insert(|id| DiaryEntry {
      id,
      user_id: input.user_id,
      subject: input.subject,
      description: input.description,
      due_date: input.due_date,
      kind: input.kind,
      completed: false,
    }))
  }

  async fn set_diary_completed(&self, id: Id, completed: bool) -> Result<bool, Infallible> {
    Ok(self.tables().diary.update(|d| d.id == id, |d| d.completed = completed))
  }

  async fn delete_diary_entry(&self, id: Id) -> Result<bool, Infallible> {
    Ok(self.tables().diary.remove(|d| d.id == id))
  }

  // ── Finance ───────────────────────────────────────────────────────────────

  async fn list_finance(&self) -> Result<Vec<FinanceRecord>, Infallible> {
    let mut rows = self.tables().finance.rows.clone();
    rows.sort_by(|a, b| {
      b.transaction_date
        .cmp(&a.transaction_date)
        .then(b.id.cmp(&a.id))
    });
    Ok(rows)
  }

  async fn add_finance_record(
    &self,
    input: NewFinanceRecord,
  ) -> Result<FinanceRecord, Infallible> {
    Ok(self.tables().finance.insert(|id| FinanceRecord {
      id,
      user_id: input.user_id,
      description: input.description,
      amount: input.amount,
      kind: input.kind,
      category: input.category,
      transaction_date: Utc::now(),
    }))
  }

  async fn delete_finance_record(&self, id: Id) -> Result<bool, Infallible> {
    Ok(self.tables().finance.remove(|r| r.id == id))
  }

  // ── Events ────────────────────────────────────────────────────────────────

  async fn list_events(&self) -> Result<Vec<Event>, Infallible> {
    let mut rows = self.tables().events.rows.clone();
    rows.sort_by(|a, b| a.event_date.cmp(&b.event_date).then(a.id.cmp(&b.id)));
    Ok(rows)
  }

  async fn add_event(&self, input: NewEvent) -> Result<Event, Infallible> {
    Ok(self.tables().events.insert(|id| Event {
      id,
      user_id: input.user_id,
      title: input.title,
      event_date: input.event_date,
    }))
  }

  async fn delete_event(&self, id: Id) -> Result<bool, Infallible> {
    Ok(self.tables().events.remove(|e| e.id == id))
  }

  // ── Notes ─────────────────────────────────────────────────────────────────

  async fn list_notes(&self) -> Result<Vec<Note>, Infallible> {
    let mut rows = self.tables().notes.rows.clone();
    rows.sort_by(|a, b| b.last_modified.cmp(&a.last_modified).then(b.id.cmp(&a.id)));
    Ok(rows)
  }

  async fn add_note(&self, input: NewNote) -> Result<Note, Infallible> {
    Ok(self.tables().notes.insert(|id| Note {
      id,
      user_id: input.user_id,
      title: input.title,
      body: input.body,
      last_modified: Utc::now(),
    }))
  }

  async fn update_note(&self, id: Id, update: NoteUpdate) -> Result<bool, Infallible> {
    Ok(self.tables().notes.update(
      |n| n.id == id,
      |n| {
        n.title = update.title;
        n.body = update.body;
        n.last_modified = Utc::now();
      },
    ))
  }
}
