//! Upload pipeline: validate, store on disk, transcribe, persist.

use crate::config::Settings;
use crate::error::{ForeleseError, Result};
use crate::store::{LectureStore, SqliteLectureStore};
use crate::transcription::{Transcriber, WhisperTranscriber};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Audio formats accepted for upload (matched against the file extension,
/// case-insensitive).
pub const ALLOWED_EXTENSIONS: &[&str] = &["wav", "mp3", "m4a"];

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    /// Store-assigned lecture id.
    pub id: i64,
    /// Sanitized filename the file was stored under.
    pub filename: String,
    /// Full transcript text.
    pub transcript: String,
}

/// The upload pipeline: one instance serves all requests.
pub struct UploadPipeline {
    transcriber: Arc<dyn Transcriber>,
    store: Arc<dyn LectureStore>,
    upload_dir: PathBuf,
}

impl UploadPipeline {
    /// Create an upload pipeline with explicit collaborators.
    ///
    /// Creates the upload directory if it does not exist.
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        store: Arc<dyn LectureStore>,
        upload_dir: PathBuf,
    ) -> Result<Self> {
        std::fs::create_dir_all(&upload_dir)?;

        Ok(Self {
            transcriber,
            store,
            upload_dir,
        })
    }

    /// Create an upload pipeline with real adapters from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let transcriber = Arc::new(WhisperTranscriber::with_model(&settings.transcription.model));
        let store = Arc::new(SqliteLectureStore::new(&settings.sqlite_path())?);

        Self::new(transcriber, store, settings.upload_dir())
    }

    /// Process one uploaded file: validate, write to disk, transcribe, and
    /// persist the transcript as a new lecture record.
    ///
    /// Duplicate filenames overwrite the on-disk file (last writer wins) but
    /// still create an independent lecture record. The on-disk file is kept
    /// even when transcription or persistence fails.
    #[instrument(skip(self, bytes), fields(filename = %filename, size = bytes.len()))]
    pub async fn run(&self, filename: &str, bytes: &[u8]) -> Result<UploadReceipt> {
        if bytes.is_empty() {
            return Err(ForeleseError::InvalidInput(
                "No audio file provided".to_string(),
            ));
        }

        if !is_allowed_file(filename) {
            return Err(ForeleseError::InvalidInput(
                "Invalid file format".to_string(),
            ));
        }

        let name = sanitize_filename(filename);
        if name.is_empty() {
            return Err(ForeleseError::InvalidInput(
                "Invalid file format".to_string(),
            ));
        }

        let path = self.upload_dir.join(&name);
        tokio::fs::write(&path, bytes).await?;
        info!("Saved {} ({} bytes)", path.display(), bytes.len());

        let transcript = self.transcriber.transcribe(&path).await?;
        if transcript.trim().is_empty() {
            warn!("Transcriber returned an empty transcript for {}", name);
            return Err(ForeleseError::Transcription(
                "Audio transcription failed".to_string(),
            ));
        }

        // A storage failure past this point discards the computed transcript;
        // the response contract only carries transcripts for persisted rows.
        let id = self.store.insert_lecture(&name, &transcript).await?;
        info!("Stored lecture {} ({})", id, name);

        Ok(UploadReceipt {
            id,
            filename: name,
            transcript,
        })
    }
}

/// Check whether the declared filename carries an allowed audio extension.
///
/// Everything after the last dot is the extension, so a bare ".wav" counts
/// while "archive.wav.exe" does not.
fn is_allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Sanitize a client-supplied filename for use as an on-disk name.
///
/// Strips any path components, replaces characters outside `[A-Za-z0-9._-]`
/// with underscores, and trims leading and trailing dots so the result can
/// never escape the upload directory or hide as a dotfile.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    cleaned.trim_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::Mutex;

    struct FakeTranscriber {
        result: std::result::Result<String, String>,
        calls: Mutex<Vec<PathBuf>>,
    }

    impl FakeTranscriber {
        fn returning(text: &str) -> Self {
            Self {
                result: Ok(text.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transcriber for FakeTranscriber {
        async fn transcribe(&self, audio_path: &Path) -> Result<String> {
            self.calls.lock().unwrap().push(audio_path.to_path_buf());
            self.result
                .clone()
                .map_err(ForeleseError::Transcription)
        }
    }

    fn pipeline_with(
        transcriber: Arc<FakeTranscriber>,
        store: Arc<SqliteLectureStore>,
    ) -> (UploadPipeline, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = UploadPipeline::new(
            transcriber,
            store,
            dir.path().join("uploads"),
        )
        .unwrap();
        (pipeline, dir)
    }

    fn files_in(dir: &Path) -> usize {
        std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
    }

    #[tokio::test]
    async fn test_successful_upload_creates_one_row() {
        let transcriber = Arc::new(FakeTranscriber::returning("hello world"));
        let store = Arc::new(SqliteLectureStore::in_memory().unwrap());
        let (pipeline, _dir) = pipeline_with(transcriber.clone(), store.clone());

        let receipt = pipeline.run("lecture1.wav", b"RIFF....").await.unwrap();

        assert_eq!(receipt.filename, "lecture1.wav");
        assert_eq!(receipt.transcript, "hello world");

        let lectures = store.list_lectures().await.unwrap();
        assert_eq!(lectures.len(), 1);
        assert_eq!(lectures[0].filename, "lecture1.wav");
        assert_eq!(lectures[0].transcript, "hello world");
        assert_eq!(transcriber.call_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_extension_has_no_side_effects() {
        let transcriber = Arc::new(FakeTranscriber::returning("hello world"));
        let store = Arc::new(SqliteLectureStore::in_memory().unwrap());
        let (pipeline, dir) = pipeline_with(transcriber.clone(), store.clone());

        for name in ["notes.txt", "talk.pdf", "lecture", "archive.wav.exe"] {
            let err = pipeline.run(name, b"data").await.unwrap_err();
            assert!(matches!(err, ForeleseError::InvalidInput(ref msg) if msg == "Invalid file format"));
        }

        assert_eq!(files_in(&dir.path().join("uploads")), 0);
        assert_eq!(store.lecture_count().await.unwrap(), 0);
        assert_eq!(transcriber.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_payload_is_rejected() {
        let transcriber = Arc::new(FakeTranscriber::returning("hello world"));
        let store = Arc::new(SqliteLectureStore::in_memory().unwrap());
        let (pipeline, _dir) = pipeline_with(transcriber.clone(), store.clone());

        let err = pipeline.run("lecture1.wav", b"").await.unwrap_err();
        assert!(matches!(err, ForeleseError::InvalidInput(ref msg) if msg == "No audio file provided"));

        // A field with no declared filename fails the extension check instead.
        let err = pipeline.run("", b"data").await.unwrap_err();
        assert!(matches!(err, ForeleseError::InvalidInput(ref msg) if msg == "Invalid file format"));

        assert_eq!(transcriber.call_count(), 0);
    }

    #[tokio::test]
    async fn test_extension_check_is_case_insensitive() {
        let transcriber = Arc::new(FakeTranscriber::returning("hello world"));
        let store = Arc::new(SqliteLectureStore::in_memory().unwrap());
        let (pipeline, _dir) = pipeline_with(transcriber, store);

        pipeline.run("Lecture.WAV", b"data").await.unwrap();
        pipeline.run("talk.Mp3", b"data").await.unwrap();
        pipeline.run("seminar.M4A", b"data").await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_upload_overwrites_file_and_appends_row() {
        let transcriber = Arc::new(FakeTranscriber::returning("hello world"));
        let store = Arc::new(SqliteLectureStore::in_memory().unwrap());
        let (pipeline, dir) = pipeline_with(transcriber, store.clone());

        pipeline.run("lecture1.wav", b"first").await.unwrap();
        pipeline.run("lecture1.wav", b"second").await.unwrap();

        let uploads = dir.path().join("uploads");
        assert_eq!(files_in(&uploads), 1);
        let on_disk = std::fs::read(uploads.join("lecture1.wav")).unwrap();
        assert_eq!(on_disk, b"second");

        // Two independent rows, not one.
        assert_eq!(store.lecture_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_transcript_fails_but_keeps_file() {
        let transcriber = Arc::new(FakeTranscriber::returning("   "));
        let store = Arc::new(SqliteLectureStore::in_memory().unwrap());
        let (pipeline, dir) = pipeline_with(transcriber, store.clone());

        let err = pipeline.run("lecture1.wav", b"data").await.unwrap_err();
        assert!(matches!(err, ForeleseError::Transcription(_)));

        // The on-disk file is not rolled back.
        assert!(dir.path().join("uploads").join("lecture1.wav").exists());
        assert_eq!(store.lecture_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_transcriber_failure_propagates() {
        let transcriber = Arc::new(FakeTranscriber {
            result: Err("model unavailable".to_string()),
            calls: Mutex::new(Vec::new()),
        });
        let store = Arc::new(SqliteLectureStore::in_memory().unwrap());
        let (pipeline, _dir) = pipeline_with(transcriber, store.clone());

        let err = pipeline.run("lecture1.wav", b"data").await.unwrap_err();
        assert!(matches!(err, ForeleseError::Transcription(_)));
        assert_eq!(store.lecture_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_path_components_are_stripped_before_write() {
        let transcriber = Arc::new(FakeTranscriber::returning("hello world"));
        let store = Arc::new(SqliteLectureStore::in_memory().unwrap());
        let (pipeline, dir) = pipeline_with(transcriber, store.clone());

        let receipt = pipeline.run("../../evil/lecture1.wav", b"data").await.unwrap();
        assert_eq!(receipt.filename, "lecture1.wav");
        assert!(dir.path().join("uploads").join("lecture1.wav").exists());

        let lectures = store.list_lectures().await.unwrap();
        assert_eq!(lectures[0].filename, "lecture1.wav");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("lecture1.wav"), "lecture1.wav");
        assert_eq!(sanitize_filename("my lecture.wav"), "my_lecture.wav");
        assert_eq!(sanitize_filename("/etc/passwd.wav"), "passwd.wav");
        assert_eq!(sanitize_filename("..\\..\\boot.mp3"), "boot.mp3");
        assert_eq!(sanitize_filename(".hidden.m4a"), "hidden.m4a");
        assert_eq!(sanitize_filename("forelesning-øving.wav"), "forelesning-_ving.wav");
    }

    #[test]
    fn test_is_allowed_file() {
        assert!(is_allowed_file("a.wav"));
        assert!(is_allowed_file("a.MP3"));
        assert!(is_allowed_file("a.m4a"));
        assert!(is_allowed_file(".wav"));
        assert!(!is_allowed_file("a.flac"));
        assert!(!is_allowed_file("wav"));
        assert!(!is_allowed_file(""));
    }

    #[tokio::test]
    async fn test_bare_dot_extension_name_is_accepted() {
        let transcriber = Arc::new(FakeTranscriber::returning("hello world"));
        let store = Arc::new(SqliteLectureStore::in_memory().unwrap());
        let (pipeline, dir) = pipeline_with(transcriber, store.clone());

        // ".wav" passes the extension check; sanitization strips the
        // leading dot so it lands on disk as "wav".
        let receipt = pipeline.run(".wav", b"data").await.unwrap();
        assert_eq!(receipt.filename, "wav");
        assert!(dir.path().join("uploads").join("wav").exists());
        assert_eq!(store.lecture_count().await.unwrap(), 1);
    }
}
