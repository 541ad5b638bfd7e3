//! Caption retrieval from the watch page's caption track list.
//!
//! The watch page embeds `"captionTracks": [...]` in its player response.
//! Each track has a `baseUrl` serving timed text as XML:
//!
//! ```text
//! <transcript><text start="0.0" dur="1.5">Hello &amp;amp; welcome</text>...</transcript>
//! ```

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;

use tubescribe_core::ports::{
    CaptionSegment, TranscriptFetcher, TranscriptUnavailableError, flatten_segments,
};

use super::{YOUTUBE_BASE_URL, is_valid_video_id};

static TEXT_NODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<text\b([^>]*?)(?:/>|>(.*?)</text>)").expect("static regex")
});
static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)="([^"]*)""#).expect("static regex"));
static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static regex"));

const CAPTION_TRACKS_KEY: &str = "\"captionTracks\":";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    #[serde(default)]
    language_code: String,
    /// `Some("asr")` for auto-generated captions.
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }

    fn is_english(&self) -> bool {
        self.language_code == "en" || self.language_code.starts_with("en-")
    }
}

/// Fetches captions straight from YouTube.
pub struct YouTubeTranscriptFetcher {
    client: Client,
    base_url: String,
}

impl YouTubeTranscriptFetcher {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, YOUTUBE_BASE_URL)
    }

    /// Point the fetcher at another origin (used by tests).
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_text(&self, url: &str) -> Result<String, TranscriptUnavailableError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| TranscriptUnavailableError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranscriptUnavailableError::Upstream(format!(
                "YouTube returned {status}"
            )));
        }

        response
            .text()
            .await
            .map_err(|e| TranscriptUnavailableError::Upstream(e.to_string()))
    }
}

#[async_trait]
impl TranscriptFetcher for YouTubeTranscriptFetcher {
    async fn fetch(&self, video_id: &str) -> Result<String, TranscriptUnavailableError> {
        if !is_valid_video_id(video_id) {
            return Err(TranscriptUnavailableError::InvalidVideoId(video_id.to_string()));
        }

        let watch_page = self
            .get_text(&format!("{}/watch?v={video_id}", self.base_url))
            .await?;

        let tracks = caption_tracks(&watch_page)
            .ok_or_else(|| TranscriptUnavailableError::NoCaptions(video_id.to_string()))?;
        let track = pick_track(&tracks)
            .ok_or_else(|| TranscriptUnavailableError::NoCaptions(video_id.to_string()))?;

        tracing::debug!(
            %video_id,
            language = %track.language_code,
            generated = track.is_generated(),
            "Downloading caption track"
        );

        let xml = self.get_text(&track.base_url).await?;
        let segments = parse_timed_text(&xml);

        tracing::debug!(%video_id, segments = segments.len(), "Captions parsed");
        Ok(flatten_segments(&segments))
    }
}

/// Pull the caption track list out of the watch page HTML.
fn caption_tracks(html: &str) -> Option<Vec<CaptionTrack>> {
    let start = html.find(CAPTION_TRACKS_KEY)? + CAPTION_TRACKS_KEY.len();

    // The list is followed by the rest of the player response; stop after it.
    serde_json::Deserializer::from_str(&html[start..])
        .into_iter::<Vec<CaptionTrack>>()
        .next()?
        .ok()
        .filter(|tracks| !tracks.is_empty())
}

/// Manual English, then generated English, then whatever comes first.
fn pick_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    tracks
        .iter()
        .find(|t| t.is_english() && !t.is_generated())
        .or_else(|| tracks.iter().find(|t| t.is_english()))
        .or_else(|| tracks.first())
}

/// Decode timed-text XML into caption segments, in document order.
///
/// Empty `<text/>` nodes become segments without text. Caption text is
/// entity-encoded twice upstream, so it is decoded twice and any leftover
/// inline markup is stripped.
pub fn parse_timed_text(xml: &str) -> Vec<CaptionSegment> {
    TEXT_NODE
        .captures_iter(xml)
        .map(|caps| {
            let attributes = caps.get(1).map_or("", |m| m.as_str());
            let number = |name: &str| {
                ATTRIBUTE
                    .captures_iter(attributes)
                    .find(|a| &a[1] == name)
                    .and_then(|a| a[2].parse::<f64>().ok())
                    .unwrap_or(0.0)
            };

            let text = caps
                .get(2)
                .map(|m| m.as_str())
                .filter(|raw| !raw.is_empty())
                .map(|raw| {
                    let once = html_escape::decode_html_entities(raw);
                    let decoded = html_escape::decode_html_entities(&once);
                    MARKUP.replace_all(&decoded, "").into_owned()
                });

            CaptionSegment {
                text,
                start: number("start"),
                duration: number("dur"),
            }
        })
        .collect()
}
