pub mod error;
pub mod export;
mod llm;
pub mod parser;
mod pipeline;
pub mod server;
pub mod tracing;
pub mod types;
pub mod yt;

pub use llm::gemini::GeminiClient;
pub use llm::summarizer::{Summarizer, SummaryResponse};
pub use pipeline::{SummaryOutcome, SummaryPipeline, SummaryPipelineBuilder};
pub use yt::{transcript::TranscriptClient, TranscriptSource};
