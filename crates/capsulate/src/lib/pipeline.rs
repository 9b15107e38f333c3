use serde::Serialize;

use crate::{
    error::{PipelineError, SummarizeError},
    llm::summarizer::Summarizer,
    yt::TranscriptSource,
};

/// Everything one request produces. Discarded once the response is sent.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryOutcome {
    pub video_id: String,
    pub transcript: String,
    pub summary: String,
}

/// The transcript-then-summary flow behind a single UI interaction.
///
/// The two upstream calls run strictly sequentially and block until complete
/// or failed; there are no retries and no fallback language.
pub struct SummaryPipeline<T, S> {
    transcript_source: T,
    summarizer: Option<S>,
}

impl<T, S> SummaryPipeline<T, S>
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    /// Whether a summarizer credential was configured at startup.
    pub fn has_summarizer(&self) -> bool {
        self.summarizer.is_some()
    }

    #[tracing::instrument(skip(self))]
    pub async fn run(&self, video_id: &str) -> Result<SummaryOutcome, PipelineError> {
        // Without a credential no upstream call is made at all.
        let summarizer = self
            .summarizer
            .as_ref()
            .ok_or(SummarizeError::MissingCredential)?;

        let transcript = self
            .transcript_source
            .fetch_transcript(video_id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to fetch transcript"))?;

        let transcript_text = transcript.render();
        tracing::info!(
            segments = transcript.segments.len(),
            "Fetched transcript"
        );

        let summary = summarizer
            .summarize(&transcript_text)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to generate summary"))?;

        Ok(SummaryOutcome {
            video_id: video_id.to_string(),
            transcript: transcript_text,
            summary: summary.summary,
        })
    }
}

pub struct SummaryPipelineBuilder<T = (), S = ()> {
    transcript_source: T,
    summarizer: Option<S>,
}

impl SummaryPipelineBuilder {
    pub fn new() -> Self {
        Self {
            transcript_source: (),
            summarizer: None,
        }
    }
}

impl Default for SummaryPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> SummaryPipelineBuilder<T, S> {
    pub fn transcript_source<T2: TranscriptSource + Send + Sync + 'static>(
        self,
        transcript_source: T2,
    ) -> SummaryPipelineBuilder<T2, S> {
        SummaryPipelineBuilder {
            transcript_source,
            summarizer: self.summarizer,
        }
    }

    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: Option<S2>,
    ) -> SummaryPipelineBuilder<T, S2> {
        SummaryPipelineBuilder {
            transcript_source: self.transcript_source,
            summarizer,
        }
    }
}

impl<T, S> SummaryPipelineBuilder<T, S>
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    pub fn build(self) -> SummaryPipeline<T, S> {
        SummaryPipeline {
            transcript_source: self.transcript_source,
            summarizer: self.summarizer,
        }
    }
}
