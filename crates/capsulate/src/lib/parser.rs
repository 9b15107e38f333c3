//! # Watch Page Parser
//!
//! This module provides functionality to extract video identifiers from
//! YouTube URLs and to parse caption data out of a YouTube watch page,
//! keeping all parsing separate from the network client in [`crate::yt`].

use std::{ops::Deref, sync::LazyLock};

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{
    error::TranscriptError,
    types::{CaptionTrack, TimedText, Transcript, TranscriptSegment},
};

static PLAYER_RESPONSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)var\s+ytInitialPlayerResponse\s*=\s*(\{.*?\})\s*;\s*(?:var\s|</script>)",
    )
    .unwrap()
});

/// Extracts the video identifier from a YouTube URL.
///
/// Long-form URLs (`youtube.com`) yield the `v` query parameter; short links
/// (`youtu.be`) yield the path with the leading slash stripped. Any other
/// host, or input that does not parse as a URL, yields `None` — never an
/// error.
pub fn extract_video_id(input: &str) -> Option<String> {
    let parsed = Url::parse(input.trim()).ok()?;
    let host = parsed.host_str()?;

    if host.contains("youtube.com") {
        parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty())
    } else if host.contains("youtu.be") {
        let id = parsed.path().trim_start_matches('/');
        (!id.is_empty()).then(|| id.to_string())
    } else {
        None
    }
}

/// Parses the caption track list from a `ytInitialPlayerResponse` object.
///
/// A missing `captions` object means the video has captions turned off
/// entirely, which is reported as [`TranscriptError::Disabled`].
#[tracing::instrument(skip(player_response))]
pub fn parse_caption_tracks(player_response: &Value) -> Result<Vec<CaptionTrack>, TranscriptError> {
    let captions = player_response
        .get("captions")
        .ok_or(TranscriptError::Disabled)?;

    let tracks = captions["playerCaptionsTracklistRenderer"]["captionTracks"]
        .as_array()
        .ok_or(TranscriptError::Disabled)?;

    tracks
        .iter()
        .map(|track| serde_json::from_value::<CaptionTrack>(track.clone()).map_err(Into::into))
        .collect()
}

/// Selects the English caption track, preferring a manually authored track
/// over an auto-generated (`asr`) one.
pub fn select_english_track(tracks: &[CaptionTrack]) -> Result<&CaptionTrack, TranscriptError> {
    fn is_english(track: &CaptionTrack) -> bool {
        track.language_code == "en" || track.language_code.starts_with("en-")
    }

    tracks
        .iter()
        .filter(|t| is_english(t))
        .find(|t| t.kind.as_deref() != Some("asr"))
        .or_else(|| tracks.iter().find(|t| is_english(t)))
        .ok_or(TranscriptError::NoEnglishTranscript)
}

/// Parses a `fmt=json3` timedtext payload into ordered transcript segments.
///
/// Styling events without caption text are skipped; segment text has inner
/// newlines collapsed so each segment renders as a single line.
pub fn parse_timed_events(json3: &str) -> Result<Transcript, TranscriptError> {
    let timed_text: TimedText = serde_json::from_str(json3)?;

    let mut segments = Vec::new();
    for event in timed_text.events {
        let Some(segs) = event.segs else { continue };
        let text = segs
            .iter()
            .map(|seg| seg.utf8.as_str())
            .collect::<String>()
            .replace('\n', " ")
            .trim()
            .to_string();
        if text.is_empty() {
            continue;
        }
        segments.push(TranscriptSegment {
            start: event.t_start_ms as f64 / 1000.0,
            text,
        });
    }

    if segments.is_empty() {
        return Err(TranscriptError::Parse(
            "timedtext payload contained no caption events",
        ));
    }

    Ok(Transcript { segments })
}

/// A raw YouTube watch page.
pub struct WatchPageDocument(String);

impl Deref for WatchPageDocument {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl WatchPageDocument {
    pub fn new(doc: String) -> Self {
        WatchPageDocument(doc)
    }

    /// Extracts the embedded `ytInitialPlayerResponse` JSON from the page.
    pub fn to_json<T>(&self) -> Result<T, TranscriptError>
    where
        T: DeserializeOwned,
    {
        PLAYER_RESPONSE_RE
            .captures(self)
            .and_then(|cap| cap.get(1))
            .and_then(|m| serde_json::from_str(m.as_str()).ok())
            .ok_or(TranscriptError::Parse(
                "Failed to extract ytInitialPlayerResponse from the watch page",
            ))
    }
}

impl From<String> for WatchPageDocument {
    fn from(value: String) -> Self {
        WatchPageDocument(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ─── Video id extraction ─────────────────────────────────────────────────

    #[test]
    fn test_long_form_url_yields_v_parameter() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_long_form_url_with_extra_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=120s&list=PL"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_short_link_yields_path() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_other_host_yields_none() {
        assert_eq!(extract_video_id("https://vimeo.com/12345"), None);
    }

    #[test]
    fn test_unparseable_input_yields_none() {
        assert_eq!(extract_video_id("not a url at all"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_long_form_url_without_query_yields_none() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/feed/library"),
            None
        );
    }

    #[test]
    fn test_short_link_without_path_yields_none() {
        assert_eq!(extract_video_id("https://youtu.be/"), None);
    }

    // ─── Player response extraction ──────────────────────────────────────────

    #[test]
    fn test_successful_extraction() {
        let html = r#"
            <html>
                <head>
                    <script nonce="abc123">
                        var ytInitialPlayerResponse = {"key": "value", "number": 42};
                    </script>
                </head>
                <body>
                    <p>Some content</p>
                </body>
            </html>
        "#;

        let doc = WatchPageDocument::from(html.to_string());
        let result = doc.to_json::<Value>();
        assert!(result.is_ok(), "Failed to extract JSON: {:?}", result.err());
        assert_eq!(result.unwrap(), json!({"key": "value", "number": 42}));
    }

    #[test]
    fn test_extraction_followed_by_another_var() {
        let html = r#"
            <script>var ytInitialPlayerResponse = {"first": true};var meta = {"second": true};</script>
        "#;

        let doc = WatchPageDocument::from(html.to_string());
        let json = doc.to_json::<Value>().expect("Failed to extract JSON");
        assert_eq!(json, json!({"first": true}));
    }

    #[test]
    fn test_extraction_with_no_data() {
        let html = "<html><body><p>No player response here</p></body></html>";

        let doc = WatchPageDocument::from(html.to_string());
        let result = doc.to_json::<Value>();
        assert!(matches!(result, Err(TranscriptError::Parse(_))));
    }

    // ─── Caption tracks ──────────────────────────────────────────────────────

    fn player_response_with_tracks(tracks: Value) -> Value {
        json!({
            "captions": {
                "playerCaptionsTracklistRenderer": {
                    "captionTracks": tracks
                }
            }
        })
    }

    #[test]
    fn test_missing_captions_object_is_disabled() {
        let response = json!({"videoDetails": {"videoId": "abc"}});
        let result = parse_caption_tracks(&response);
        assert!(matches!(result, Err(TranscriptError::Disabled)));
    }

    #[test]
    fn test_caption_tracks_parse() {
        let response = player_response_with_tracks(json!([
            {
                "baseUrl": "https://www.youtube.com/api/timedtext?v=abc&lang=en",
                "languageCode": "en",
                "kind": "asr",
                "name": {"simpleText": "English (auto-generated)"}
            },
            {
                "baseUrl": "https://www.youtube.com/api/timedtext?v=abc&lang=fr",
                "languageCode": "fr"
            }
        ]));

        let tracks = parse_caption_tracks(&response).expect("tracks should parse");
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].language_code, "en");
        assert_eq!(tracks[0].kind.as_deref(), Some("asr"));
        assert_eq!(tracks[1].language_code, "fr");
    }

    #[test]
    fn test_select_prefers_manual_english_track() {
        let response = player_response_with_tracks(json!([
            {"baseUrl": "auto", "languageCode": "en", "kind": "asr"},
            {"baseUrl": "manual", "languageCode": "en-GB"}
        ]));
        let tracks = parse_caption_tracks(&response).unwrap();

        let track = select_english_track(&tracks).expect("should find english track");
        assert_eq!(track.base_url, "manual");
    }

    #[test]
    fn test_select_falls_back_to_generated_track() {
        let response = player_response_with_tracks(json!([
            {"baseUrl": "auto", "languageCode": "en", "kind": "asr"}
        ]));
        let tracks = parse_caption_tracks(&response).unwrap();

        let track = select_english_track(&tracks).expect("should find english track");
        assert_eq!(track.base_url, "auto");
    }

    #[test]
    fn test_select_without_english_track_fails() {
        let response = player_response_with_tracks(json!([
            {"baseUrl": "fr", "languageCode": "fr"},
            {"baseUrl": "sw", "languageCode": "sw"}
        ]));
        let tracks = parse_caption_tracks(&response).unwrap();

        let result = select_english_track(&tracks);
        assert!(matches!(result, Err(TranscriptError::NoEnglishTranscript)));
    }

    // ─── Timedtext events ────────────────────────────────────────────────────

    #[test]
    fn test_timed_events_parse_into_segments() {
        let json3 = r#"{
            "events": [
                {"tStartMs": 0, "segs": [{"utf8": "Hello"}]},
                {"tStartMs": 1500, "segs": [{"utf8": "world"}]}
            ]
        }"#;

        let transcript = parse_timed_events(json3).expect("should parse");
        assert_eq!(transcript.segments.len(), 2);
        assert_eq!(transcript.segments[0].start, 0.0);
        assert_eq!(transcript.segments[0].text, "Hello");
        assert_eq!(transcript.segments[1].start, 1.5);
        assert_eq!(transcript.render(), "[0.00s] Hello\n[1.50s] world");
    }

    #[test]
    fn test_styling_events_are_skipped() {
        let json3 = r#"{
            "events": [
                {"tStartMs": 0},
                {"tStartMs": 100, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 210, "segs": [{"utf8": "actual "}, {"utf8": "text"}]}
            ]
        }"#;

        let transcript = parse_timed_events(json3).expect("should parse");
        assert_eq!(transcript.segments.len(), 1);
        assert_eq!(transcript.segments[0].text, "actual text");
        assert_eq!(transcript.segments[0].start, 0.21);
    }

    #[test]
    fn test_empty_payload_is_a_parse_error() {
        let result = parse_timed_events(r#"{"events": []}"#);
        assert!(matches!(result, Err(TranscriptError::Parse(_))));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let result = parse_timed_events("{not json");
        assert!(matches!(result, Err(TranscriptError::Json(_))));
    }
}
