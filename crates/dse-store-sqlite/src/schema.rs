//! SQL schema for the DSE SQLite store.
//!
//! Executed once, on the first connection the pool opens. Future migrations
//! will be gated on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `AUTOINCREMENT` keeps ids strictly increasing even after deletes.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS tasks (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL DEFAULT 1,
    text        TEXT    NOT NULL,
    completed   INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT    NOT NULL   -- RFC 3339 UTC, fixed width
);

CREATE TABLE IF NOT EXISTS questions (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id         INTEGER NOT NULL DEFAULT 1,
    subject         TEXT    NOT NULL,
    topic           TEXT    NOT NULL,
    question_text   TEXT    NOT NULL,
    answer_text     TEXT    NOT NULL,
    image_data      TEXT,              -- base64, may be large
    next_review     TEXT    NOT NULL,
    review_interval INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS diary (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL DEFAULT 1,
    subject     TEXT    NOT NULL,
    description TEXT    NOT NULL,
    due_date    TEXT    NOT NULL,      -- YYYY-MM-DD
    type        TEXT    NOT NULL,
    completed   INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS finance (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id          INTEGER NOT NULL DEFAULT 1,
    description      TEXT    NOT NULL,
    amount           REAL    NOT NULL,
    type             TEXT    NOT NULL CHECK (type IN ('income', 'expense')),
    category         TEXT    NOT NULL,
    transaction_date TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS events (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id    INTEGER NOT NULL DEFAULT 1,
    title      TEXT    NOT NULL,
    event_date TEXT    NOT NULL        -- YYYY-MM-DD
);

CREATE TABLE IF NOT EXISTS notes (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id       INTEGER NOT NULL DEFAULT 1,
    title         TEXT    NOT NULL,
    body          TEXT    NOT NULL DEFAULT '',
    last_modified TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS tasks_created_idx     ON tasks(created_at);
CREATE INDEX IF NOT EXISTS diary_due_idx         ON diary(due_date);
CREATE INDEX IF NOT EXISTS finance_date_idx      ON finance(transaction_date);
CREATE INDEX IF NOT EXISTS notes_modified_idx    ON notes(last_modified);

PRAGMA user_version = 1;
";
