//! Configuration module for Forelese.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    AnswerSettings, GeneralSettings, ServerSettings, Settings, StorageSettings,
    TranscriptionSettings, UploadSettings,
};
