use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    error::SummarizeError,
    llm::summarizer::{Summarizer, SummaryResponse},
};

/// Client for the Google Gemini `generateContent` API, authenticated with an
/// explicitly passed API key.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    const SUMMARY_PROMPT: &str = "Summarize the transcript in bullet points within 350 words:";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            model: Self::SUMMARIZER_MODEL.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub async fn send_generate_request(
        &self,
        model_name: &str,
        prompt: impl Into<String>,
    ) -> Result<GenerateContentResponse, SummarizeError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
        };

        let resp = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, model_name
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(SummarizeError::Api { status, message });
        }

        Ok(resp.json::<GenerateContentResponse>().await?)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    /// Absent when generation was blocked before producing any content.
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: String,
}

impl GenerateContentResponse {
    pub fn first_text(&self) -> Option<String> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.first())
            .map(|part| part.text.clone())
    }
}

impl Summarizer for GeminiClient {
    const SUMMARIZER_MODEL: &str = "gemini-2.0-flash";

    #[tracing::instrument(skip_all)]
    async fn summarize(&self, transcript: &str) -> Result<SummaryResponse, SummarizeError> {
        let prompt = format!("{}\n\n{}", Self::SUMMARY_PROMPT, transcript);

        let response = self
            .send_generate_request(&self.model, prompt)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize content"))?;

        // A 2xx response with no candidate text is reported as prose, not an
        // error: the upstream call itself succeeded.
        let summary = response
            .first_text()
            .unwrap_or_else(|| "No summary generated.".to_string());

        Ok(SummaryResponse { summary })
    }
}
