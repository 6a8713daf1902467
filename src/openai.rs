//! Shared OpenAI client construction.
//!
//! Both adapters (Whisper transcription and chat-completion answers) go
//! through the same API, so the client setup lives here. The credential is
//! read from `OPENAI_API_KEY` by the client library itself; `forelese init`
//! surfaces a missing key before any request is made.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default request timeout. Transcribing a long lecture can take minutes,
/// so this is deliberately generous; it exists to bound hung connections,
/// not slow ones.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client with the default timeout.
pub fn create_client() -> Client<OpenAIConfig> {
    create_client_with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create an OpenAI client with a custom request timeout.
pub fn create_client_with_timeout(timeout: Duration) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    Client::with_config(OpenAIConfig::default()).with_http_client(http_client)
}

/// Whether `OPENAI_API_KEY` is present in the environment.
pub fn is_api_key_configured() -> bool {
    std::env::var("OPENAI_API_KEY").is_ok()
}
