//! SQLite-based lecture store implementation.

use super::{Lecture, LectureStore};
use crate::error::{ForeleseError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, instrument};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS lectures (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT NOT NULL,
    transcript TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
);
"#;

/// SQLite-based lecture store.
///
/// A single connection behind a mutex; the lock guard scopes acquisition and
/// release on every exit path, including errors.
pub struct SqliteLectureStore {
    conn: Mutex<Connection>,
}

impl SqliteLectureStore {
    /// Open (or create) a lecture store at the given path.
    #[instrument(skip_all)]
    pub fn new(path: &Path) -> Result<Self> {
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrent performance
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!("Initialized lecture store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory lecture store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ForeleseError::Storage(format!("Failed to acquire lock: {}", e)))
    }
}

#[async_trait]
impl LectureStore for SqliteLectureStore {
    #[instrument(skip(self, transcript))]
    async fn insert_lecture(&self, filename: &str, transcript: &str) -> Result<i64> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO lectures (filename, transcript) VALUES (?1, ?2)",
            params![filename, transcript],
        )?;

        let id = conn.last_insert_rowid();
        debug!("Inserted lecture {} ({})", id, filename);
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn fetch_all_transcripts(&self) -> Result<Vec<String>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare("SELECT transcript FROM lectures ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let transcripts: Vec<String> = rows.filter_map(|r| r.ok()).collect();
        debug!("Fetched {} transcripts", transcripts.len());
        Ok(transcripts)
    }

    #[instrument(skip(self))]
    async fn list_lectures(&self) -> Result<Vec<Lecture>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT id, filename, transcript, created_at FROM lectures ORDER BY id",
        )?;

        let lectures = stmt.query_map([], |row| {
            let created_at_str: String = row.get(3)?;
            Ok(Lecture {
                id: row.get(0)?,
                filename: row.get(1)?,
                transcript: row.get(2)?,
                created_at: DateTime::parse_from_rfc3339(&created_at_str)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now()),
            })
        })?;

        let result: Vec<Lecture> = lectures.filter_map(|l| l.ok()).collect();
        Ok(result)
    }

    async fn lecture_count(&self) -> Result<usize> {
        let conn = self.lock()?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM lectures", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
