//! Error types for each external boundary.
//!
//! Every upstream call site returns an explicit error kind so callers can
//! distinguish failure causes programmatically instead of by message string.

/// Failures while retrieving a video's caption transcript.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("Transcripts are disabled for this video")]
    Disabled,
    #[error("No English transcript found for this video")]
    NoEnglishTranscript,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parse error: {0}")]
    Parse(&'static str),
}

/// Failures while generating a summary.
#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("Google API key is missing")]
    MissingCredential,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Failures while laying out a document export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("character {0:?} is outside the PDF font's encoding range")]
    UnsupportedCharacter(char),
    #[error("PDF error: {0}")]
    Pdf(String),
}

/// A failure anywhere in the transcript-then-summary flow.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
    #[error(transparent)]
    Summarize(#[from] SummarizeError),
}
