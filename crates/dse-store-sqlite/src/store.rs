//! [`SqliteStore`], the SQLite implementation of [`StudyStore`].

use std::{path::Path, sync::Arc};

use chrono::{DateTime, Utc};
use rusqlite::{Row, TransactionBehavior, params_from_iter, types::Value};

use dse_core::{
  Id,
  diary::{DiaryEntry, NewDiaryEntry},
  event::{Event, NewEvent},
  finance::{FinanceRecord, NewFinanceRecord},
  note::{NewNote, Note, NoteUpdate},
  question::{NewQuestion, Question, ReviewSchedule},
  store::StudyStore,
  task::{NewTask, Task},
};

use crate::{
  Result,
  encode::{
    RawDiaryEntry, RawEvent, RawFinanceRecord, RawNote, RawQuestion, RawTask,
    encode_date, encode_dt, encode_finance_kind, now,
  },
  pool::{DEFAULT_POOL_SIZE, Pool},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A DSE store backed by a single SQLite file.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Clone)]
pub struct SqliteStore {
  pool: Arc<Pool>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` with [`DEFAULT_POOL_SIZE`]
  /// connections and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::open_with_pool_size(path, DEFAULT_POOL_SIZE).await
  }

  /// Open (or create) a store at `path` with `pool_size` connections.
  ///
  /// The path `:memory:` opens an in-memory store, whose pool is always a
  /// single connection.
  pub async fn open_with_pool_size(
    path:      impl AsRef<Path>,
    pool_size: u32,
  ) -> Result<Self> {
    let path = path.as_ref();
    if path == Path::new(":memory:") {
      if pool_size > 1 {
        tracing::warn!(pool_size, "in-memory store is limited to one connection");
      }
      return Self::open_in_memory().await;
    }

    let pool = Pool::open(path, pool_size).await?;
    tracing::info!(path = %path.display(), pool_size = pool.size(), "opened sqlite store");
    Ok(Self { pool: Arc::new(pool) })
  }

  /// Open an in-memory store for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let pool = Pool::open_in_memory().await?;
    Ok(Self { pool: Arc::new(pool) })
  }

  /// Number of pooled connections.
  pub fn pool_size(&self) -> u32 { self.pool.size() }

  /// Wait for in-flight statements to finish, then close every connection.
  ///
  /// Every store method called afterwards fails with
  /// [`Error::PoolClosed`](crate::Error::PoolClosed).
  pub async fn close(&self) -> Result<()> {
    self.pool.close().await?;
    tracing::info!("closed sqlite store");
    Ok(())
  }

  /// Run a parameterless `SELECT` and map every row.
  async fn query<T, F>(&self, sql: &'static str, map: F) -> Result<Vec<T>>
  where
    T: Send + 'static,
    F: Fn(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let conn = self.pool.acquire().await?;
    let rows = conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(sql)?;
        let rows = stmt
          .query_map([], |row| map(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  /// Run an `UPDATE` or `DELETE`; returns whether any row matched.
  async fn execute(&self, sql: &'static str, params: Vec<Value>) -> Result<bool> {
    let conn = self.pool.acquire().await?;
    let changed = conn
      .call(move |conn| Ok(conn.execute(sql, params_from_iter(params))?))
      .await?;
    Ok(changed > 0)
  }

  /// Run an `INSERT`; returns the generated row id.
  async fn insert(&self, sql: &'static str, params: Vec<Value>) -> Result<Id> {
    let conn = self.pool.acquire().await?;
    let id = conn
      .call(move |conn| {
        conn.execute(sql, params_from_iter(params))?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  /// Run a write whose final parameter is the current time.
  ///
  /// The time is read only once the write lock is held, so timestamps from
  /// concurrent writers follow the order in which their rows were written.
  async fn write_stamped(
    &self,
    sql:        &'static str,
    mut params: Vec<Value>,
  ) -> Result<Stamped> {
    let conn = self.pool.acquire().await?;
    let stamped = conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let at = now();
        params.push(encode_dt(at).into());
        let changed = tx.execute(sql, params_from_iter(params))?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(Stamped { changed, id, at })
      })
      .await?;
    Ok(stamped)
  }
}

/// Outcome of [`SqliteStore::write_stamped`].
struct Stamped {
  changed: usize,
  /// Row id of the last insert on this connection.
  id:      Id,
  at:      DateTime<Utc>,
}

// ─── StudyStore impl ─────────────────────────────────────────────────────────

impl StudyStore for SqliteStore {
  type Error = crate::Error;

  // ── Tasks ─────────────────────────────────────────────────────────────────

  async fn list_tasks(&self) -> Result<Vec<Task>> {
    let raws = self
      .query(
        "SELECT id, user_id, text, completed, created_at
         FROM tasks
         ORDER BY created_at DESC, id DESC",
        |row| {
          Ok(RawTask {
            id:         row.get(0)?,
            user_id:    row.get(1)?,
            text:       row.get(2)?,
            completed:  row.get(3)?,
            created_at: row.get(4)?,
          })
        },
      )
      .await?;

    raws.into_iter().map(RawTask::into_task).collect()
  }

  async fn add_task(&self, input: NewTask) -> Result<Task> {
    let Stamped { id, at, .. } = self
      .write_stamped(
        "INSERT INTO tasks (user_id, text, completed, created_at) VALUES (?1, ?2, 0, ?3)",
        vec![input.user_id.into(), input.text.clone().into()],
      )
      .await?;

    Ok(Task {
      id,
      user_id: input.user_id,
      text: input.text,
      completed: false,
      created_at: at,
    })
  }

  async fn set_task_completed(&self, id: Id, completed: bool) -> Result<bool> {
    self
      .execute(
        "UPDATE tasks SET completed = ?1 WHERE id = ?2",
        vec![completed.into(), id.into()],
      )
      .await
  }

  async fn delete_task(&self, id: Id) -> Result<bool> {
    self.execute("DELETE FROM tasks WHERE id = ?1", vec![id.into()]).await
  }

  // ── Questions ─────────────────────────────────────────────────────────────

  async fn list_questions(&self) -> Result<Vec<Question>> {
    let raws = self
      .query(
        "SELECT id, user_id, subject, topic, question_text, answer_text,
                image_data, next_review, review_interval
         FROM questions
         ORDER BY id",
        |row| {
          Ok(RawQuestion {
            id:              row.get(0)?,
            user_id:         row.get(1)?,
            subject:         row.get(2)?,
            topic:           row.get(3)?,
            question_text:   row.get(4)?,
            answer_text:     row.get(5)?,
            image_data:      row.get(6)?,
            next_review:     row.get(7)?,
            review_interval: row.get(8)?,
          })
        },
      )
      .await?;

    raws.into_iter().map(RawQuestion::into_question).collect()
  }

  async fn add_question(&self, input: NewQuestion) -> Result<Question> {
    let schedule = ReviewSchedule::initial(now());
    let id = self
      .insert(
        "INSERT INTO questions (
           user_id, subject, topic, question_text, answer_text,
           image_data, next_review, review_interval
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        vec![
          input.user_id.into(),
          input.subject.clone().into(),
          input.topic.clone().into(),
          input.question_text.clone().into(),
          input.answer_text.clone().into(),
          input.image_data.clone().into(),
          encode_dt(schedule.next_review).into(),
          schedule.review_interval.into(),
        ],
      )
      .await?;

    Ok(Question {
      id,
      user_id: input.user_id,
      subject: input.subject,
      topic: input.topic,
      question_text: input.question_text,
      answer_text: input.answer_text,
      image_data: input.image_data,
      next_review: schedule.next_review,
      review_interval: schedule.review_interval,
    })
  }

  async fn review_question(&self, id: Id, schedule: ReviewSchedule) -> Result<bool> {
    self
      .execute(
        "UPDATE questions SET next_review = ?1, review_interval = ?2 WHERE id = ?3",
        vec![
          encode_dt(schedule.next_review).into(),
          schedule.review_interval.into(),
          id.into(),
        ],
      )
      .await
  }

  // ── Diary ─────────────────────────────────────────────────────────────────

  async fn list_diary(&self) -> Result<Vec<DiaryEntry>> {
    let raws = self
      .query(
        "SELECT id, user_id, subject, description, due_date, type, completed
         FROM diary
         ORDER BY due_date ASC, id ASC",
        |row| {
          Ok(RawDiaryEntry {
            id:          row.get(0)?,
            user_id:     row.get(1)?,
            subject:     row.get(2)?,
            description: row.get(3)?,
            due_date:    row.get(4)?,
            kind:        row.get(5)?,
            completed:   row.get(6)?,
          })
        },
      )
      .await?;

    raws.into_iter().map(RawDiaryEntry::into_entry).collect()
  }

  async fn add_diary_entry(&self, input: NewDiaryEntry) -> Result<DiaryEntry> {
    let id = self
      .insert(
        "INSERT INTO diary (user_id, subject, description, due_date, type, completed)
         VALUES (?1, ?2, ?3, ?4, ?5, 0)",
        vec![
          input.user_id.into(),
          input.subject.clone().into(),
          input.description.clone().into(),
          encode_date(input.due_date).into(),
          input.kind.clone().into(),
        ],
      )
      .await?;

    Ok(DiaryEntry {
      id,
      user_id: input.user_id,
      subject: input.subject,
      description: input.description,
      due_date: input.due_date,
      kind: input.kind,
      completed: false,
    })
  }

  async fn set_diary_completed(&self, id: Id, completed: bool) -> Result<bool> {
    self
      .execute(
        "UPDATE diary SET completed = ?1 WHERE id = ?2",
        vec![completed.into(), id.into()],
      )
      .await
  }

  async fn delete_diary_entry(&self, id: Id) -> Result<bool> {
    self.execute("DELETE FROM diary WHERE id = ?1", vec![id.into()]).await
  }

  // ── Finance ───────────────────────────────────────────────────────────────

  async fn list_finance(&self) -> Result<Vec<FinanceRecord>> {
    let raws = self
      .query(
        "SELECT id, user_id, description, amount, type, category, transaction_date
         FROM finance
         ORDER BY transaction_date DESC, id DESC",
        |row| {
          Ok(RawFinanceRecord {
            id:               row.get(0)?,
            user_id:          row.get(1)?,
            description:      row.get(2)?,
            amount:           row.get(3)?,
            kind:             row.get(4)?,
            category:         row.get(5)?,
            transaction_date: row.get(6)?,
          })
        },
      )
      .await?;

    raws.into_iter().map(RawFinanceRecord::into_record).collect()
  }

  async fn add_finance_record(&self, input: NewFinanceRecord) -> Result<FinanceRecord> {
    let Stamped { id, at: transaction_date, .. } = self
      .write_stamped(
        "INSERT INTO finance (user_id, description, amount, type, category, transaction_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        vec![
          input.user_id.into(),
          input.description.clone().into(),
          input.amount.into(),
          encode_finance_kind(input.kind).to_owned().into(),
          input.category.clone().into(),
        ],
      )
      .await?;

    Ok(FinanceRecord {
      id,
      user_id: input.user_id,
      description: input.description,
      amount: input.amount,
      kind: input.kind,
      category: input.category,
      transaction_date,
    })
  }

  async fn delete_finance_record(&self, id: Id) -> Result<bool> {
    self.execute("DELETE FROM finance WHERE id = ?1", vec![id.into()]).await
  }

  // ── Events ────────────────────────────────────────────────────────────────

  async fn list_events(&self) -> Result<Vec<Event>> {
    let raws = self
      .query(
        "SELECT id, user_id, title, event_date
         FROM events
         ORDER BY event_date ASC, id ASC",
        |row| {
          Ok(RawEvent {
            id:         row.get(0)?,
            user_id:    row.get(1)?,
            title:      row.get(2)?,
            event_date: row.get(3)?,
          })
        },
      )
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }

  async fn add_event(&self, input: NewEvent) -> Result<Event> {
    let id = self
      .insert(
        "INSERT INTO events (user_id, title, event_date) VALUES (?1, ?2, ?3)",
        vec![
          input.user_id.into(),
          input.title.clone().into(),
          encode_date(input.event_date).into(),
        ],
      )
      .await?;

    Ok(Event {
      id,
      user_id: input.user_id,
      title: input.title,
      event_date: input.event_date,
    })
  }

  async fn delete_event(&self, id: Id) -> Result<bool> {
    self.execute("DELETE FROM events WHERE id = ?1", vec![id.into()]).await
  }

  // ── Notes ─────────────────────────────────────────────────────────────────

  async fn list_notes(&self) -> Result<Vec<Note>> {
    let raws = self
      .query(
        "SELECT id, user_id, title, body, last_modified
         FROM notes
         ORDER BY last_modified DESC, id DESC",
        |row| {
          Ok(RawNote {
            id:            row.get(0)?,
            user_id:       row.get(1)?,
            title:         row.get(2)?,
            body:          row.get(3)?,
            last_modified: row.get(4)?,
          })
        },
      )
      .await?;

    raws.into_iter().map(RawNote::into_note).collect()
  }

  async fn add_note(&self, input: NewNote) -> Result<Note> {
    let Stamped { id, at: last_modified, .. } = self
      .write_stamped(
        "INSERT INTO notes (user_id, title, body, last_modified) VALUES (?1, ?2, ?3, ?4)",
        vec![
          input.user_id.into(),
          input.title.clone().into(),
          input.body.clone().into(),
        ],
      )
      .await?;

    Ok(Note {
      id,
      user_id: input.user_id,
      title: input.title,
      body: input.body,
      last_modified,
    })
  }

  async fn update_note(&self, id: Id, update: NoteUpdate) -> Result<bool> {
    let Stamped { changed, .. } = self
      .write_stamped(
        "UPDATE notes SET title = ?1, body = ?2, last_modified = ?4 WHERE id = ?3",
        vec![update.title.into(), update.body.into(), id.into()],
      )
      .await?;
    Ok(changed > 0)
  }
}
