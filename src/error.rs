//! Error types for Forelese.

use thiserror::Error;

/// Library-level error type for Forelese operations.
#[derive(Error, Debug)]
pub enum ForeleseError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bad or missing request fields. The message is shown to clients
    /// verbatim, so keep it free of internal detail.
    #[error("{0}")]
    InvalidInput(String),

    /// Nothing to answer against. Shown to clients verbatim.
    #[error("{0}")]
    NotFound(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Answer generation failed: {0}")]
    Answer(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),
}

/// Result type alias for Forelese operations.
pub type Result<T> = std::result::Result<T, ForeleseError>;
