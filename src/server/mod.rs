//! HTTP API surface for Forelese.
//!
//! Provides REST endpoints for uploading lecture audio and querying the
//! accumulated transcripts. Every pipeline failure is converted to a JSON
//! error response here; no error escalates beyond its request.

use crate::error::ForeleseError;
use crate::pipeline::{QueryPipeline, UploadPipeline};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
pub struct AppState {
    pub upload: UploadPipeline,
    pub query: QueryPipeline,
}

/// Build the application router.
pub fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route(
            "/upload-audio",
            // Audio uploads can be several MB; raise the default extractor cap.
            post(upload_audio).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/query", post(query))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Serialize)]
struct UploadResponse {
    message: String,
    transcript: String,
}

#[derive(Deserialize)]
struct QueryRequest {
    #[serde(default)]
    question: Option<String>,
}

#[derive(Serialize)]
struct AnswerResponse {
    answer: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Wrapper mapping pipeline errors onto HTTP statuses.
struct ApiError(ForeleseError);

impl From<ForeleseError> for ApiError {
    fn from(err: ForeleseError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ForeleseError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ForeleseError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

// === Handlers ===

async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn upload_audio(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut audio: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ForeleseError::InvalidInput(format!("Invalid multipart payload: {}", e))
    })? {
        if field.name() == Some("audio") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(|e| {
                ForeleseError::InvalidInput(format!("Invalid multipart payload: {}", e))
            })?;
            audio = Some((filename, bytes.to_vec()));
            break;
        }
    }

    let (filename, bytes) = audio.ok_or_else(|| {
        ForeleseError::InvalidInput("No audio file provided".to_string())
    })?;

    let receipt = state.upload.run(&filename, &bytes).await?;

    Ok(Json(UploadResponse {
        message: "Audio uploaded and transcribed successfully".to_string(),
        transcript: receipt.transcript,
    }))
}

async fn query(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let question = req.question.unwrap_or_default();
    let answer = state.query.run(&question).await?;

    Ok(Json(AnswerResponse { answer }))
}
