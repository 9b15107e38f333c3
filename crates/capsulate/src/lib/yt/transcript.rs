use std::ops::Deref;

use crate::{
    error::TranscriptError,
    parser::{self, WatchPageDocument},
    types::Transcript,
    yt::TranscriptSource,
};

/// Fetches caption transcripts straight from YouTube's watch page and
/// timedtext endpoint. No API key is involved.
pub struct TranscriptClient(pub reqwest::Client);

impl Default for TranscriptClient {
    fn default() -> Self {
        TranscriptClient(reqwest::Client::new())
    }
}

impl Deref for TranscriptClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TranscriptSource for TranscriptClient {
    const WATCH_BASE_URL: &str = "https://www.youtube.com/watch";

    #[tracing::instrument(skip(self))]
    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript, TranscriptError> {
        let html = self
            .get(format!("{}?v={}", Self::WATCH_BASE_URL, video_id))
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to fetch watch page"))?
            .text()
            .await?;

        let doc = WatchPageDocument::from(html);
        let player_response = doc.to_json::<serde_json::Value>()?;

        let tracks = parser::parse_caption_tracks(&player_response)?;
        let track = parser::select_english_track(&tracks)?;
        tracing::debug!(
            language_code = %track.language_code,
            kind = ?track.kind,
            "Selected caption track"
        );

        let json3 = self
            .get(format!("{}&fmt=json3", track.base_url))
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to fetch timedtext"))?
            .text()
            .await?;

        parser::parse_timed_events(&json3)
    }
}
