//! YouTube adapters: link parsing, title lookup and caption retrieval.

mod resolver;
mod transcript;
mod video_id;

pub use resolver::OEmbedVideoResolver;
pub use transcript::{YouTubeTranscriptFetcher, parse_timed_text};
pub use video_id::{extract_video_id, is_valid_video_id};

/// Public YouTube origin.
pub const YOUTUBE_BASE_URL: &str = "https://www.youtube.com";
