//! Lecture record persistence.
//!
//! The store holds one row per successfully transcribed upload. Rows are
//! append-only: nothing in the system updates or deletes a lecture record.

mod sqlite;

pub use sqlite::SqliteLectureStore;

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A persisted lecture record.
#[derive(Debug, Clone)]
pub struct Lecture {
    /// Store-assigned surrogate key (monotonic).
    pub id: i64,
    /// Sanitized filename as received at upload time.
    pub filename: String,
    /// Full transcript text.
    pub transcript: String,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Trait for lecture record stores.
#[async_trait]
pub trait LectureStore: Send + Sync {
    /// Append one lecture record, returning its assigned id.
    async fn insert_lecture(&self, filename: &str, transcript: &str) -> Result<i64>;

    /// Fetch every stored transcript in the store's natural order.
    async fn fetch_all_transcripts(&self) -> Result<Vec<String>>;

    /// List all stored lecture records.
    async fn list_lectures(&self) -> Result<Vec<Lecture>>;

    /// Count stored lecture records.
    async fn lecture_count(&self) -> Result<usize>;
}
