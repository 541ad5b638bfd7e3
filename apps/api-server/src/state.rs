//! Application state - shared across all handlers.

use std::sync::Arc;

use tubescribe_core::ports::{
    ArticleGenerator, BlogPostRepository, PasswordService, TokenService, TranscriptFetcher,
    UserRepository, VideoResolver,
};
use tubescribe_core::{AccountService, GenerationPipeline};
use tubescribe_infra::{
    Argon2PasswordService, GeminiArticleGenerator, InMemoryBlogPostRepository,
    InMemoryUserRepository, JwtTokenService, OEmbedVideoResolver, YouTubeTranscriptFetcher,
    build_http_client,
};

use crate::config::{AppConfig, DatabaseSettings};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn BlogPostRepository>,
    pub accounts: AccountService,
    pub pipeline: GenerationPipeline,
    pub tokens: Arc<dyn TokenService>,
    pub secure_cookies: bool,
}

/// Every port implementation the state is assembled from.
pub struct Adapters {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn BlogPostRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub tokens: Arc<dyn TokenService>,
    pub resolver: Arc<dyn VideoResolver>,
    pub transcripts: Arc<dyn TranscriptFetcher>,
    pub generator: Arc<dyn ArticleGenerator>,
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to connect to database: {0}")]
    Database(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

type Stores = (Arc<dyn UserRepository>, Arc<dyn BlogPostRepository>);

fn in_memory_stores() -> Stores {
    (
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryBlogPostRepository::new()),
    )
}

/// In-memory stores when no database is configured. A configured database
/// that cannot be reached stops startup.
#[cfg(feature = "postgres")]
async fn init_stores(settings: Option<&DatabaseSettings>) -> Result<Stores, StartupError> {
    use tubescribe_infra::database::{DatabaseConfig, connect};
    use tubescribe_infra::{PostgresBlogPostRepository, PostgresUserRepository};

    let Some(settings) = settings else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return Ok(in_memory_stores());
    };

    let config = DatabaseConfig {
        url: settings.url.clone(),
        max_connections: settings.max_connections,
        min_connections: settings.min_connections,
    };

    let conn = connect(&config).await.map_err(|e| {
        tracing::error!("Failed to connect to database: {}", e);
        StartupError::Database(e.to_string())
    })?;

    Ok((
        Arc::new(PostgresUserRepository::new(conn.clone())),
        Arc::new(PostgresBlogPostRepository::new(conn)),
    ))
}

#[cfg(not(feature = "postgres"))]
async fn init_stores(_settings: Option<&DatabaseSettings>) -> Result<Stores, StartupError> {
    tracing::info!("Running without postgres feature - using in-memory repositories");
    Ok(in_memory_stores())
}

impl AppState {
    /// Build the application state with the production adapters.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let (users, posts) = init_stores(config.database.as_ref()).await?;

        let client =
            build_http_client(&config.http).map_err(|e| StartupError::HttpClient(e.to_string()))?;

        let state = Self::from_adapters(
            Adapters {
                users,
                posts,
                passwords: Arc::new(Argon2PasswordService::new()),
                tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
                resolver: Arc::new(OEmbedVideoResolver::new(client.clone())),
                transcripts: Arc::new(YouTubeTranscriptFetcher::new(client.clone())),
                generator: Arc::new(GeminiArticleGenerator::new(client, config.gemini.clone())),
            },
            config.secure_cookies,
        );

        tracing::info!(model = %config.gemini.model, "Application state initialized");
        Ok(state)
    }

    pub fn from_adapters(adapters: Adapters, secure_cookies: bool) -> Self {
        let pipeline = GenerationPipeline::new(
            adapters.resolver,
            adapters.transcripts,
            adapters.generator,
            adapters.posts.clone(),
        );

        Self {
            posts: adapters.posts,
            accounts: AccountService::new(adapters.users, adapters.passwords),
            pipeline,
            tokens: adapters.tokens,
            secure_cookies,
        }
    }
}
