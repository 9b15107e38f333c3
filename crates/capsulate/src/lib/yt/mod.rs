pub mod transcript;

use std::future::Future;

use crate::{error::TranscriptError, types::Transcript};

/// Thumbnail images are addressed by convention from the video id; nothing
/// checks that the id resolves to an existing image.
pub const THUMBNAIL_BASE_URL: &str = "https://img.youtube.com/vi";

pub fn thumbnail_url(video_id: &str) -> String {
    format!("{THUMBNAIL_BASE_URL}/{video_id}/0.jpg")
}

pub trait TranscriptSource {
    const WATCH_BASE_URL: &str;

    fn fetch_transcript(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<Transcript, TranscriptError>> + Send;
}
