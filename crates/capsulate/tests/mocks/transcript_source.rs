use std::sync::{Arc, Mutex};

use capsulate::{
    error::TranscriptError,
    types::{Transcript, TranscriptSegment},
    TranscriptSource,
};

#[derive(Clone, Copy)]
pub enum MockFailure {
    Disabled,
    NoEnglish,
    Fetch(&'static str),
}

#[derive(Clone)]
pub struct MockTranscriptSource {
    pub segments: Vec<TranscriptSegment>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub failure: Option<MockFailure>,
}

impl MockTranscriptSource {
    pub fn new(segments: Vec<(f64, &str)>) -> Self {
        Self {
            segments: segments
                .into_iter()
                .map(|(start, text)| TranscriptSegment {
                    start,
                    text: text.to_string(),
                })
                .collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    pub fn failing(failure: MockFailure) -> Self {
        Self {
            segments: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            failure: Some(failure),
        }
    }
}

impl TranscriptSource for MockTranscriptSource {
    const WATCH_BASE_URL: &str = "https://youtube.mock/watch";

    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript, TranscriptError> {
        self.calls.lock().unwrap().push(video_id.to_string());
        match self.failure {
            Some(MockFailure::Disabled) => Err(TranscriptError::Disabled),
            Some(MockFailure::NoEnglish) => Err(TranscriptError::NoEnglishTranscript),
            Some(MockFailure::Fetch(msg)) => Err(TranscriptError::Parse(msg)),
            None => Ok(Transcript {
                segments: self.segments.clone(),
            }),
        }
    }
}
