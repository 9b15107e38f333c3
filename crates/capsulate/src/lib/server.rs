//! HTTP layer: the single-page UI plus the JSON API it calls.
//!
//! Every upstream failure is mapped to a distinct error kind and user-facing
//! message here; nothing propagates as a crash.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::{
    error::{PipelineError, SummarizeError, TranscriptError},
    export,
    llm::summarizer::Summarizer,
    parser,
    pipeline::SummaryPipeline,
    yt::{self, TranscriptSource},
};

const INDEX_HTML: &str = include_str!("../../assets/index.html");

pub struct AppState<T, S> {
    pub pipeline: Arc<SummaryPipeline<T, S>>,
}

impl<T, S> Clone for AppState<T, S> {
    fn clone(&self) -> Self {
        AppState {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

pub fn router<T, S>(pipeline: SummaryPipeline<T, S>) -> Router
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/resolve", post(resolve))
        .route("/api/summarize", post(summarize::<T, S>))
        .route("/api/export/text", post(export_text))
        .route("/api/export/pdf", post(export_pdf))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve<T, S>(pipeline: SummaryPipeline<T, S>, addr: SocketAddr) -> anyhow::Result<()>
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let app = router(pipeline);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Serving capsulate UI");
    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct VideoRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub content: String,
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Serialize)]
struct ResolveResponse {
    video_id: String,
    thumbnail_url: String,
}

#[derive(Debug, Serialize)]
struct ApiError {
    error: &'static str,
    message: String,
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn resolve(Json(req): Json<VideoRequest>) -> Response {
    let url = req.url.trim();
    if url.is_empty() {
        return error_response(
            "missing_url",
            StatusCode::UNPROCESSABLE_ENTITY,
            "Please enter a YouTube URL.".into(),
        );
    }

    match parser::extract_video_id(url) {
        Some(video_id) => (
            StatusCode::OK,
            Json(ResolveResponse {
                thumbnail_url: yt::thumbnail_url(&video_id),
                video_id,
            }),
        )
            .into_response(),
        None => error_response(
            "invalid_url",
            StatusCode::UNPROCESSABLE_ENTITY,
            "Could not extract a video ID. Please check your link.".into(),
        ),
    }
}

async fn summarize<T, S>(
    State(state): State<AppState<T, S>>,
    Json(req): Json<VideoRequest>,
) -> Response
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let url = req.url.trim();
    if url.is_empty() {
        return error_response(
            "missing_url",
            StatusCode::UNPROCESSABLE_ENTITY,
            "Please enter a YouTube URL.".into(),
        );
    }

    let Some(video_id) = parser::extract_video_id(url) else {
        return error_response(
            "invalid_url",
            StatusCode::UNPROCESSABLE_ENTITY,
            "Could not extract a video ID. Please check your link.".into(),
        );
    };

    match state.pipeline.run(&video_id).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => pipeline_error_response(err),
    }
}

async fn export_text(Json(req): Json<ExportRequest>) -> Response {
    let filename = sanitize_filename(req.filename.as_deref().unwrap_or("export.txt"));
    attachment(
        export::text_bytes(&req.content),
        "text/plain; charset=utf-8",
        &filename,
    )
}

async fn export_pdf(Json(req): Json<ExportRequest>) -> Response {
    let filename = sanitize_filename(req.filename.as_deref().unwrap_or("export.pdf"));
    match export::pdf_bytes(&req.content) {
        Ok(bytes) => attachment(bytes, "application/pdf", &filename),
        Err(e) => error_response(
            "export_failed",
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("PDF generation error: {e}"),
        ),
    }
}

fn pipeline_error_response(err: PipelineError) -> Response {
    let (kind, status, message) = match err {
        PipelineError::Transcript(TranscriptError::Disabled) => (
            "transcripts_disabled",
            StatusCode::NOT_FOUND,
            "Transcripts are disabled for this video.".to_string(),
        ),
        PipelineError::Transcript(TranscriptError::NoEnglishTranscript) => (
            "no_english_transcript",
            StatusCode::NOT_FOUND,
            "No English transcript found for this video.".to_string(),
        ),
        PipelineError::Transcript(e) => (
            "transcript_failed",
            StatusCode::BAD_GATEWAY,
            format!("Error retrieving transcript: {e}"),
        ),
        PipelineError::Summarize(SummarizeError::MissingCredential) => (
            "missing_credential",
            StatusCode::SERVICE_UNAVAILABLE,
            "Google API key is missing. Set GOOGLE_API_KEY to enable summaries.".to_string(),
        ),
        PipelineError::Summarize(e) => (
            "summary_failed",
            StatusCode::BAD_GATEWAY,
            format!("Error generating summary: {e}"),
        ),
    };
    error_response(kind, status, message)
}

fn error_response(kind: &'static str, status: StatusCode, message: String) -> Response {
    (
        status,
        Json(ApiError {
            error: kind,
            message,
        }),
    )
        .into_response()
}

fn attachment(bytes: Vec<u8>, content_type: &'static str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "export".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_strips_header_breaking_characters() {
        assert_eq!(sanitize_filename("summary.txt"), "summary.txt");
        assert_eq!(sanitize_filename("my \"file\".pdf"), "my__file_.pdf");
        assert_eq!(sanitize_filename(""), "export");
    }
}
