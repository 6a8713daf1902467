//! List command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::store::{LectureStore, SqliteLectureStore};
use anyhow::Result;

/// Run the list command.
pub async fn run_list(settings: Settings) -> Result<()> {
    let store = SqliteLectureStore::new(&settings.sqlite_path())?;

    match store.list_lectures().await {
        Ok(lectures) => {
            if lectures.is_empty() {
                Output::info(
                    "No lectures stored yet. Use 'forelese transcribe <file>' to add one.",
                );
            } else {
                Output::header(&format!("Stored Lectures ({})", lectures.len()));
                println!();

                for lecture in &lectures {
                    Output::lecture_info(
                        lecture.id,
                        &lecture.filename,
                        &lecture.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
                        &lecture.transcript,
                    );
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Failed to list lectures: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
