use serde::{Deserialize, Serialize};

/// A single timed unit of spoken text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start offset from the beginning of the video, in seconds.
    pub start: f64,
    pub text: String,
}

/// Ordered caption segments for one video. Lives for a single request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Renders the transcript as timestamp-prefixed lines, one per segment,
    /// e.g. `[0.00s] Hello`.
    pub fn render(&self) -> String {
        self.segments
            .iter()
            .map(|seg| format!("[{:.2}s] {}", seg.start, seg.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// One entry of `captions.playerCaptionsTracklistRenderer.captionTracks`
/// inside `ytInitialPlayerResponse`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    /// `"asr"` marks an auto-generated track.
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<TrackName>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackName {
    #[serde(default)]
    pub simple_text: Option<String>,
}

/// The `fmt=json3` timedtext payload served from a caption track's base URL.
#[derive(Debug, Deserialize)]
pub struct TimedText {
    #[serde(default)]
    pub events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
pub struct TimedTextEvent {
    #[serde(rename = "tStartMs", default)]
    pub t_start_ms: u64,
    /// Absent on window-styling events that carry no caption text.
    #[serde(default)]
    pub segs: Option<Vec<TimedTextSeg>>,
}

#[derive(Debug, Deserialize)]
pub struct TimedTextSeg {
    #[serde(default)]
    pub utf8: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_formats_timestamps_with_two_decimals() {
        let transcript = Transcript {
            segments: vec![
                TranscriptSegment {
                    start: 0.0,
                    text: "Hello".to_string(),
                },
                TranscriptSegment {
                    start: 1.5,
                    text: "world".to_string(),
                },
            ],
        };

        assert_eq!(transcript.render(), "[0.00s] Hello\n[1.50s] world");
    }

    #[test]
    fn test_render_empty_transcript_is_empty_string() {
        let transcript = Transcript::default();
        assert!(transcript.is_empty());
        assert_eq!(transcript.render(), "");
    }

    #[test]
    fn test_render_fractional_offsets() {
        let transcript = Transcript {
            segments: vec![TranscriptSegment {
                start: 123.456,
                text: "deep into the video".to_string(),
            }],
        };

        assert_eq!(transcript.render(), "[123.46s] deep into the video");
    }
}
