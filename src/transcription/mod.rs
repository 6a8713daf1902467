//! Transcription module for Forelese.
//!
//! Wraps the speech-to-text engine behind a capability trait so the upload
//! pipeline can be tested without real API calls.

mod whisper;

pub use whisper::WhisperTranscriber;

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Trait for transcription services.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file and return the full transcript text.
    async fn transcribe(&self, audio_path: &Path) -> Result<String>;
}
