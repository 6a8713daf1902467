//! Serve command - run the HTTP API server.

use crate::answer::OpenAiResponder;
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::{QueryPipeline, UploadPipeline};
use crate::server::{router, AppState};
use crate::store::SqliteLectureStore;
use crate::transcription::WhisperTranscriber;
use std::sync::Arc;

/// Run the HTTP API server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    // One store shared by both pipelines; adapters are per-pipeline.
    let store = Arc::new(SqliteLectureStore::new(&settings.sqlite_path())?);
    let transcriber = Arc::new(WhisperTranscriber::with_model(&settings.transcription.model));
    let responder = Arc::new(OpenAiResponder::new(
        &settings.answer.model,
        settings.answer.max_tokens,
    ));

    let state = Arc::new(AppState {
        upload: UploadPipeline::new(transcriber, store.clone(), settings.upload_dir())?,
        query: QueryPipeline::new(responder, store),
    });

    let app = router(state, settings.server.max_upload_bytes);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Forelese API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Landing page", "GET  /");
    Output::kv("Health", "GET  /health");
    Output::kv("Upload audio", "POST /upload-audio");
    Output::kv("Query", "POST /query");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}
