//! Transcript port and the segment flattening rule.

use async_trait::async_trait;

/// One timed caption. Timing is carried but never used for the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionSegment {
    /// `None` when the caption entry has no textual payload.
    pub text: Option<String>,
    pub start: f64,
    pub duration: f64,
}

impl CaptionSegment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: Some(text.into()),
            start,
            duration,
        }
    }
}

/// Concatenate segment text in order, each piece prefixed by one space.
///
/// Segments without text are skipped. An empty sequence yields `""`.
pub fn flatten_segments(segments: &[CaptionSegment]) -> String {
    segments
        .iter()
        .filter_map(|segment| segment.text.as_deref())
        .fold(String::new(), |mut transcript, text| {
            transcript.push(' ');
            transcript.push_str(text);
            transcript
        })
}

/// Fetches the flattened transcript of a video by its platform id.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    async fn fetch(&self, video_id: &str) -> Result<String, TranscriptUnavailableError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptUnavailableError {
    #[error("Transcript unavailable: video {0} has no captions")]
    NoCaptions(String),

    #[error("Transcript unavailable: {0} is not a valid video id")]
    InvalidVideoId(String),

    #[error("Transcript unavailable: {0}")]
    Upstream(String),
}
