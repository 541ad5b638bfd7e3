//! # TubeScribe Infrastructure
//!
//! Concrete implementations of the ports defined in `tubescribe-core`:
//! storage, password hashing, session tokens and the YouTube and Gemini
//! clients used by the generation pipeline.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory stores only
//! - `postgres` - PostgreSQL storage via SeaORM
//! - `auth` - JWT sessions + Argon2 password hashing

pub mod database;
pub mod http;
pub mod llm;
pub mod youtube;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::{InMemoryBlogPostRepository, InMemoryUserRepository};

pub use http::{HttpClientConfig, build_http_client};
pub use llm::{GeminiArticleGenerator, GeminiConfig};
pub use youtube::{OEmbedVideoResolver, YouTubeTranscriptFetcher, extract_video_id};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresBlogPostRepository, PostgresUserRepository};
