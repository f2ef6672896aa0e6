//! Integration tests for `SqliteStore` against in-memory and on-disk databases.

use chrono::{NaiveDate, TimeDelta, Utc};
use dse_core::{
  diary::NewDiaryEntry,
  event::NewEvent,
  finance::{FinanceKind, NewFinanceRecord},
  note::{NewNote, NoteUpdate},
  Error as CoreError,
  question::{NewQuestion, ReviewSchedule},
  store::StudyStore,
  task::NewTask,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

// ─── Tasks ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_task_starts_incomplete() {
  let s = store().await;
  let task = s.add_task(NewTask::new("Revise organic chemistry")).await.unwrap();
  assert_eq!(task.id, 1);
  assert_eq!(task.user_id, 1);
  assert!(!task.completed);

  let all = s.list_tasks().await.unwrap();
  assert_eq!(all, vec![task]);
}

#[tokio::test]
async fn task_ids_increase_and_list_is_newest_first() {
  let s = store().await;
  let mut ids = Vec::new();
  for text in ["one", "two", "three"] {
    ids.push(s.add_task(NewTask::new(text)).await.unwrap().id);
  }
  assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids: {ids:?}");

  let listed: Vec<_> = s
    .list_tasks()
    .await
    .unwrap()
    .into_iter()
    .map(|t| t.text)
    .collect();
  assert_eq!(listed, ["three", "two", "one"]);
}

#[tokio::test]
async fn deleted_ids_are_not_reused() {
  let s = store().await;
  let a = s.add_task(NewTask::new("a")).await.unwrap();
  assert!(s.delete_task(a.id).await.unwrap());
  let b = s.add_task(NewTask::new("b")).await.unwrap();
  assert!(b.id > a.id);
}

#[tokio::test]
async fn set_task_completed_reports_match() {
  let s = store().await;
  let task = s.add_task(NewTask::new("x")).await.unwrap();

  assert!(s.set_task_completed(task.id, true).await.unwrap());
  assert!(s.list_tasks().await.unwrap()[0].completed);

  assert!(!s.set_task_completed(999, true).await.unwrap());
  assert!(!s.delete_task(999).await.unwrap());
}

#[tokio::test]
async fn explicit_user_id_is_stored() {
  let s = store().await;
  let mut input = NewTask::new("shared");
  input.user_id = 7;
  s.add_task(input).await.unwrap();
  assert_eq!(s.list_tasks().await.unwrap()[0].user_id, 7);
}

// ─── Questions ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn new_question_is_due_tomorrow() {
  let s = store().await;
  let before = Utc::now();
  let mut input = NewQuestion::new("Physics", "Waves", "What is λ?", "Wavelength");
  input.image_data = Some("data:image/png;base64,iVBORw0KGgo=".into());
  let q = s.add_question(input).await.unwrap();
  let after = Utc::now();

  assert_eq!(q.review_interval, 1);
  assert!(q.next_review >= before + TimeDelta::days(1) - TimeDelta::milliseconds(1));
  assert!(q.next_review <= after + TimeDelta::days(1));

  let listed = s.list_questions().await.unwrap();
  assert_eq!(listed, vec![q]);
}

#[tokio::test]
async fn review_overwrites_schedule() {
  let s = store().await;
  let q = s
    .add_question(NewQuestion::new("Maths", "Vectors", "|a×b|?", "|a||b|sinθ"))
    .await
    .unwrap();

  let schedule = ReviewSchedule::after(crate::encode::now(), 7).unwrap();
  assert!(s.review_question(q.id, schedule).await.unwrap());

  let stored = &s.list_questions().await.unwrap()[0];
  assert_eq!(stored.review_interval, 7);
  assert_eq!(stored.next_review, schedule.next_review);

  let again = ReviewSchedule::after(crate::encode::now(), 2).unwrap();
  s.review_question(q.id, again).await.unwrap();
  assert_eq!(s.list_questions().await.unwrap()[0].review_interval, 2);
}

#[tokio::test]
async fn review_of_missing_question_changes_nothing() {
  let s = store().await;
  let schedule = ReviewSchedule::after(Utc::now(), 3).unwrap();
  assert!(!s.review_question(42, schedule).await.unwrap());
  assert!(s.list_questions().await.unwrap().is_empty());
}

#[tokio::test]
async fn review_schedule_past_year_9999_never_reaches_the_table() {
  let s = store().await;
  let q = s
    .add_question(NewQuestion::new("Physics", "Optics", "n = ?", "c/v"))
    .await
    .unwrap();

  let far = ReviewSchedule::after(crate::encode::now(), 3_000_000);
  assert_eq!(far, Err(CoreError::IntervalOutOfRange(3_000_000)));

  // The furthest accepted schedule still reads back.
  let latest = ReviewSchedule::after(crate::encode::now(), 2_900_000).unwrap();
  assert!(s.review_question(q.id, latest).await.unwrap());
  let listed = s.list_questions().await.unwrap();
  assert_eq!(listed[0].next_review, latest.next_review);
}

// ─── Diary ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn diary_is_ordered_by_due_date() {
  let s = store().await;
  s.add_diary_entry(NewDiaryEntry::new("Econ", "Essay", date(6, 1), "homework"))
    .await
    .unwrap();
  s.add_diary_entry(NewDiaryEntry::new("Bio", "Quiz", date(5, 2), "test"))
    .await
    .unwrap();
  s.add_diary_entry(NewDiaryEntry::new("Chem", "Lab", date(5, 20), "homework"))
    .await
    .unwrap();

  let due: Vec<_> = s
    .list_diary()
    .await
    .unwrap()
    .into_iter()
    .map(|d| d.due_date)
    .collect();
  assert_eq!(due, [date(5, 2), date(5, 20), date(6, 1)]);
}

#[tokio::test]
async fn diary_completion_and_delete() {
  let s = store().await;
  let entry = s
    .add_diary_entry(NewDiaryEntry::new("Eng", "Read ch. 3", date(4, 4), "homework"))
    .await
    .unwrap();
  assert!(!entry.completed);

  assert!(s.set_diary_completed(entry.id, true).await.unwrap());
  assert!(s.list_diary().await.unwrap()[0].completed);

  assert!(s.delete_diary_entry(entry.id).await.unwrap());
  assert!(s.list_diary().await.unwrap().is_empty());
}

// ─── Finance ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn finance_is_newest_first() {
  let s = store().await;
  let first = s
    .add_finance_record(NewFinanceRecord::new("Allowance", 200.0, FinanceKind::Income, "family"))
    .await
    .unwrap();
  let second = s
    .add_finance_record(NewFinanceRecord::new("Lunch", 12.5, FinanceKind::Expense, "food"))
    .await
    .unwrap();

  let listed = s.list_finance().await.unwrap();
  assert_eq!(listed, vec![second, first]);
  assert_eq!(listed[0].kind, FinanceKind::Expense);
  assert_eq!(listed[0].amount, 12.5);
}

#[tokio::test]
async fn delete_finance_record() {
  let s = store().await;
  let r = s
    .add_finance_record(NewFinanceRecord::new("Book", 80.0, FinanceKind::Expense, "study"))
    .await
    .unwrap();
  assert!(s.delete_finance_record(r.id).await.unwrap());
  assert!(!s.delete_finance_record(r.id).await.unwrap());
}

// ─── Events ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn events_are_ordered_by_date() {
  let s = store().await;
  s.add_event(NewEvent::new("DSE English", date(4, 26))).await.unwrap();
  s.add_event(NewEvent::new("Mock exam", date(1, 15))).await.unwrap();

  let titles: Vec<_> = s
    .list_events()
    .await
    .unwrap()
    .into_iter()
    .map(|e| e.title)
    .collect();
  assert_eq!(titles, ["Mock exam", "DSE English"]);
}

// ─── Notes ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_note_moves_it_to_the_front() {
  let s = store().await;
  let old = s.add_note(NewNote::new("Formulae", "E = mc²")).await.unwrap();
  let newer = s.add_note(NewNote::new("Vocab", "ubiquitous")).await.unwrap();
  assert_eq!(s.list_notes().await.unwrap()[0].id, newer.id);

  let update = NoteUpdate {
    title: "Formulae v2".into(),
    body:  "F = ma".into(),
  };
  assert!(s.update_note(old.id, update).await.unwrap());

  let notes = s.list_notes().await.unwrap();
  assert_eq!(notes[0].id, old.id);
  assert_eq!(notes[0].title, "Formulae v2");
  assert_eq!(notes[0].body, "F = ma");
  assert!(notes[0].last_modified >= old.last_modified);
}

// ─── Pool lifecycle ──────────────────────────────────────────────────────────

#[tokio::test]
async fn closed_store_rejects_statements() {
  let s = store().await;
  s.add_task(NewTask::new("before")).await.unwrap();
  s.close().await.unwrap();

  let err = s.list_tasks().await.unwrap_err();
  assert!(matches!(err, Error::PoolClosed), "got {err:?}");
}

#[tokio::test]
async fn memory_path_uses_a_single_connection() {
  let s = SqliteStore::open_with_pool_size(":memory:", 8).await.unwrap();
  assert_eq!(s.pool_size(), 1);
}

#[tokio::test]
async fn file_store_shares_data_across_pooled_connections() {
  let path = std::env::temp_dir().join(format!(
    "dse-store-test-{}-{}.sqlite3",
    std::process::id(),
    Utc::now().timestamp_nanos_opt().unwrap_or_default(),
  ));

  let s = SqliteStore::open_with_pool_size(&path, 4).await.unwrap();
  assert_eq!(s.pool_size(), 4);

  let mut handles = Vec::new();
  for n in 0..16 {
    let s = s.clone();
    handles.push(tokio::spawn(async move {
      s.add_task(NewTask::new(format!("task {n}"))).await.unwrap()
    }));
  }
  for h in handles {
    h.await.unwrap();
  }

  // Newest first by timestamp is also newest first by id.
  let tasks = s.list_tasks().await.unwrap();
  assert_eq!(tasks.len(), 16);
  for pair in tasks.windows(2) {
    assert!(pair[0].id > pair[1].id, "{:?} listed before {:?}", pair[0].id, pair[1].id);
    assert!(pair[0].created_at >= pair[1].created_at);
  }
  s.close().await.unwrap();

  // Reopening sees the same rows through a fresh pool.
  let reopened = SqliteStore::open_with_pool_size(&path, 2).await.unwrap();
  assert_eq!(reopened.list_tasks().await.unwrap().len(), 16);
  reopened.close().await.unwrap();

  for suffix in ["", "-wal", "-shm"] {
    let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
  }
}
