// src/infrastructure/store.rs
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::application::MemoStore;
use crate::domain::{Alarm, DomainError, Memo, MemoDraft, MemoKind, MemoPatch};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS memos (
    id            TEXT PRIMARY KEY,
    title         TEXT NOT NULL,
    content       TEXT NOT NULL,
    image         TEXT,
    kind          TEXT NOT NULL DEFAULT 'text',
    alarm_enabled INTEGER NOT NULL DEFAULT 0,
    alarm_time    TEXT,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
)";

/// SQLite-backed memo store. One file, one connection; the server owns it
/// behind a single lock.
pub struct SqliteStore {
    connection: Connection,
    path: PathBuf,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = PathBuf::from(db_path.as_ref());
        debug!(?path, "Opening memo database");

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
        }

        let connection = Connection::open(&path)
            .with_context(|| format!("Failed to open memo database at {}", path.display()))?;
        connection
            .execute(SCHEMA, [])
            .context("Failed to initialize memo schema")?;

        info!(?path, "Memo database ready");
        Ok(Self { connection, path })
    }

    /// In-memory database, for tests.
    pub fn in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().context("Failed to open in-memory store")?;
        connection
            .execute(SCHEMA, [])
            .context("Failed to initialize memo schema")?;
        Ok(Self {
            connection,
            path: PathBuf::from(":memory:"),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn fetch(&self, id: &str) -> Result<Option<Memo>, DomainError> {
        self.connection
            .query_row(
                "SELECT id, title, content, image, kind, alarm_enabled, alarm_time,
                        created_at, updated_at
                 FROM memos WHERE id = ?1",
                params![id],
                row_to_memo,
            )
            .optional()
            .map_err(store_err)
    }

    fn write_back(&self, memo: &Memo) -> Result<(), DomainError> {
        self.connection
            .execute(
                "UPDATE memos
                 SET title = ?2, content = ?3, image = ?4, kind = ?5,
                     alarm_enabled = ?6, alarm_time = ?7, updated_at = ?8
                 WHERE id = ?1",
                params![
                    memo.id,
                    memo.title,
                    memo.content,
                    memo.image,
                    kind_to_str(memo.kind),
                    memo.alarm.enabled,
                    memo.alarm.time,
                    memo.updated_at,
                ],
            )
            .map_err(store_err)?;
        Ok(())
    }
}

impl MemoStore for SqliteStore {
    #[instrument(level = "debug", skip(self))]
    fn list(&mut self) -> Result<Vec<Memo>, DomainError> {
        let mut stmt = self
            .connection
            .prepare(
                "SELECT id, title, content, image, kind, alarm_enabled, alarm_time,
                        created_at, updated_at
                 FROM memos ORDER BY created_at DESC",
            )
            .map_err(store_err)?;
        let rows = stmt.query_map([], row_to_memo).map_err(store_err)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(store_err)
    }

    #[instrument(level = "debug", skip(self))]
    fn get(&mut self, id: &str) -> Result<Memo, DomainError> {
        self.fetch(id)?
            .ok_or_else(|| DomainError::MemoNotFound(id.to_string()))
    }

    #[instrument(level = "debug", skip(self, draft))]
    fn create(&mut self, draft: MemoDraft) -> Result<Memo, DomainError> {
        let now = Utc::now();
        let memo = Memo {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            content: draft.content,
            image: draft.image,
            kind: draft.kind,
            alarm: draft.alarm,
            created_at: now,
            updated_at: now,
        };
        self.connection
            .execute(
                "INSERT INTO memos
                     (id, title, content, image, kind, alarm_enabled, alarm_time,
                      created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    memo.id,
                    memo.title,
                    memo.content,
                    memo.image,
                    kind_to_str(memo.kind),
                    memo.alarm.enabled,
                    memo.alarm.time,
                    memo.created_at,
                    memo.updated_at,
                ],
            )
            .map_err(store_err)?;
        debug!(memo_id = %memo.id, "Created memo");
        Ok(memo)
    }

    #[instrument(level = "debug", skip(self, patch))]
    fn update(&mut self, id: &str, patch: MemoPatch) -> Result<Memo, DomainError> {
        let mut memo = self
            .fetch(id)?
            .ok_or_else(|| DomainError::MemoNotFound(id.to_string()))?;
        patch.apply_to(&mut memo);
        memo.updated_at = Utc::now();
        self.write_back(&memo)?;
        Ok(memo)
    }

    #[instrument(level = "debug", skip(self))]
    fn delete(&mut self, id: &str) -> Result<(), DomainError> {
        let affected = self
            .connection
            .execute("DELETE FROM memos WHERE id = ?1", params![id])
            .map_err(store_err)?;
        if affected == 0 {
            return Err(DomainError::MemoNotFound(id.to_string()));
        }
        debug!(memo_id = %id, "Deleted memo");
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn toggle_alarm(&mut self, id: &str) -> Result<Memo, DomainError> {
        let mut memo = self
            .fetch(id)?
            .ok_or_else(|| DomainError::MemoNotFound(id.to_string()))?;
        memo.alarm.enabled = !memo.alarm.enabled;
        memo.updated_at = Utc::now();
        self.write_back(&memo)?;
        Ok(memo)
    }
}

fn row_to_memo(row: &Row<'_>) -> rusqlite::Result<Memo> {
    let kind: String = row.get("kind")?;
    let alarm_time: Option<DateTime<Utc>> = row.get("alarm_time")?;
    Ok(Memo {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        image: row.get("image")?,
        kind: kind_from_str(&kind),
        alarm: Alarm {
            enabled: row.get("alarm_enabled")?,
            time: alarm_time,
        },
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn kind_to_str(kind: MemoKind) -> &'static str {
    match kind {
        MemoKind::Text => "text",
        MemoKind::Image => "image",
    }
}

fn kind_from_str(kind: &str) -> MemoKind {
    match kind {
        "image" => MemoKind::Image,
        _ => MemoKind::Text,
    }
}

fn store_err(e: rusqlite::Error) -> DomainError {
    DomainError::StoreError(e.to_string())
}
