//! The `StudyStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `dse-store-sqlite`, or
//! [`MemoryStore`](crate::memory::MemoryStore) in tests). The HTTP layer
//! depends on this abstraction, not on any concrete backend.
//!
//! Every method maps to exactly one statement against the store. There are
//! no read-then-write sequences, so each call is atomic on its own.

use std::future::Future;

use crate::{
  Id,
  diary::{DiaryEntry, NewDiaryEntry},
  event::{Event, NewEvent},
  finance::{FinanceRecord, NewFinanceRecord},
  note::{NewNote, Note, NoteUpdate},
  question::{NewQuestion, Question, ReviewSchedule},
  task::{NewTask, Task},
};

/// Abstraction over a DSE Survival Kit store backend.
///
/// `add_*` methods return the persisted row, with its store-assigned id and
/// timestamps. Update and delete methods return whether a row matched;
/// callers decide what a miss means.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait StudyStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Tasks ─────────────────────────────────────────────────────────────

  /// All tasks, newest first.
  fn list_tasks(
    &self,
  ) -> impl Future<Output = Result<Vec<Task>, Self::Error>> + Send + '_;

  fn add_task(
    &self,
    input: NewTask,
  ) -> impl Future<Output = Result<Task, Self::Error>> + Send + '_;

  fn set_task_completed(
    &self,
    id: Id,
    completed: bool,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn delete_task(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Questions ─────────────────────────────────────────────────────────

  /// All questions in creation order.
  fn list_questions(
    &self,
  ) -> impl Future<Output = Result<Vec<Question>, Self::Error>> + Send + '_;

  /// Persist a question with [`ReviewSchedule::initial`] at the current time.
  fn add_question(
    &self,
    input: NewQuestion,
  ) -> impl Future<Output = Result<Question, Self::Error>> + Send + '_;

  /// Overwrite both scheduling columns of a question.
  fn review_question(
    &self,
    id: Id,
    schedule: ReviewSchedule,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Diary ─────────────────────────────────────────────────────────────

  /// All diary entries, earliest due date first.
  fn list_diary(
    &self,
  ) -> impl Future<Output = Result<Vec<DiaryEntry>, Self::Error>> + Send + '_;

  fn add_diary_entry(
    &self,
    input: NewDiaryEntry,
  ) -> impl Future<Output = Result<DiaryEntry, Self::Error>> + Send + '_;

  fn set_diary_completed(
    &self,
    id: Id,
    completed: bool,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn delete_diary_entry(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Finance ───────────────────────────────────────────────────────────

  /// All finance records, newest transaction first.
  fn list_finance(
    &self,
  ) -> impl Future<Output = Result<Vec<FinanceRecord>, Self::Error>> + Send + '_;

  /// The `transaction_date` is set by the store.
  fn add_finance_record(
    &self,
    input: NewFinanceRecord,
  ) -> impl Future<Output = Result<FinanceRecord, Self::Error>> + Send + '_;

  fn delete_finance_record(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Events ────────────────────────────────────────────────────────────

  /// All events, earliest date first.
  fn list_events(
    &self,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + '_;

  fn add_event(
    &self,
    input: NewEvent,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  fn delete_event(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Notes ─────────────────────────────────────────────────────────────

  /// All notes, most recently modified first.
  fn list_notes(
    &self,
  ) -> impl Future<Output = Result<Vec<Note>, Self::Error>> + Send + '_;

  fn add_note(
    &self,
    input: NewNote,
  ) -> impl Future<Output = Result<Note, Self::Error>> + Send + '_;

  /// Replace title and body and refresh `last_modified`.
  fn update_note(
    &self,
    id: Id,
    update: NoteUpdate,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
