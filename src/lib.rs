//! Forelese - Lecture Transcription and Q&A
//!
//! A small web backend for uploading lecture recordings, transcribing them,
//! and asking questions about the accumulated transcripts.
//!
//! The name "Forelese" comes from the Norwegian word for "to lecture."
//!
//! # Overview
//!
//! Forelese allows you to:
//! - Upload audio recordings of lectures over HTTP
//! - Transcribe them with a speech-to-text model and persist the transcripts
//! - Ask free-text questions answered by an LLM over all stored transcripts
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `transcription` - Speech-to-text adapter
//! - `answer` - Language-model answer adapter
//! - `store` - Lecture record persistence
//! - `pipeline` - Upload and query request pipelines
//! - `server` - HTTP API surface
//!
//! # Example
//!
//! ```rust,no_run
//! use forelese::config::Settings;
//! use forelese::pipeline::QueryPipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = QueryPipeline::from_settings(&settings)?;
//!
//!     let answer = pipeline.run("What was covered in the last lecture?").await?;
//!     println!("{}", answer);
//!
//!     Ok(())
//! }
//! ```

pub mod answer;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod pipeline;
pub mod server;
pub mod store;
pub mod transcription;

pub use error::{ForeleseError, Result};
