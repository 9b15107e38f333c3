use std::future::Future;

use crate::error::SummarizeError;

#[derive(Debug, Clone)]
pub struct SummaryResponse {
    pub summary: String,
}

pub trait Summarizer {
    const SUMMARIZER_MODEL: &str;

    fn summarize(
        &self,
        transcript: &str,
    ) -> impl Future<Output = Result<SummaryResponse, SummarizeError>> + Send;
}
