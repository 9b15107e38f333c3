use std::sync::{Arc, Mutex};

use capsulate::{error::SummarizeError, Summarizer, SummaryResponse};

#[derive(Clone)]
pub struct MockSummarizer {
    pub summary: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockSummarizer {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            summary: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl Summarizer for MockSummarizer {
    const SUMMARIZER_MODEL: &str = "mock-gemini";

    async fn summarize(&self, transcript: &str) -> Result<SummaryResponse, SummarizeError> {
        self.calls.lock().unwrap().push(transcript.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(SummarizeError::Api {
                status: 500,
                message: msg.clone(),
            });
        }
        Ok(SummaryResponse {
            summary: self.summary.clone(),
        })
    }
}
