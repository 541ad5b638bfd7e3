//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod generator;
mod repository;
mod transcript;
mod video;

pub use auth::{AuthError, PasswordService, SessionClaims, TokenService};
pub use generator::{
    ArticleGenerator, GenerationError, MAX_OUTPUT_TOKENS, SUMMARY_WORD_LIMIT, build_prompt,
};
pub use repository::{BaseRepository, BlogPostRepository, UserRepository};
pub use transcript::{
    CaptionSegment, TranscriptFetcher, TranscriptUnavailableError, flatten_segments,
};
pub use video::{VideoInfo, VideoResolutionError, VideoResolver};
