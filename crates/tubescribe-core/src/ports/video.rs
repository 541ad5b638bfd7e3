//! Video metadata port.

use async_trait::async_trait;

/// What the pipeline needs to know about a video before fetching captions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoInfo {
    pub title: String,
    pub video_id: String,
}

/// Turns a user-submitted link into a video id and display title.
#[async_trait]
pub trait VideoResolver: Send + Sync {
    async fn resolve(&self, link: &str) -> Result<VideoInfo, VideoResolutionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum VideoResolutionError {
    #[error("Could not resolve video: {0} is not a recognised video link")]
    InvalidLink(String),

    #[error("Could not resolve video: platform rejected the request ({0})")]
    Rejected(String),

    #[error("Could not resolve video: {0}")]
    Unreachable(String),
}
