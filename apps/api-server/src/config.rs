//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use tubescribe_infra::{GeminiConfig, HttpClientConfig, JwtConfig};

/// PostgreSQL settings; absent when `DATABASE_URL` is unset.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseSettings>,
    pub jwt: JwtConfig,
    /// Set the `Secure` flag on the session cookie.
    pub secure_cookies: bool,
    pub gemini: GeminiConfig,
    pub http: HttpClientConfig,
}

fn parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `GOOGLE_API_KEY` is deliberately not read here; the generator looks it
    /// up on each call.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .map(|url| DatabaseSettings {
                url,
                max_connections: parsed("DB_MAX_CONNECTIONS", 20),
                min_connections: parsed("DB_MIN_CONNECTIONS", 2),
            });

        let mut gemini = GeminiConfig::default();
        if let Ok(model) = env::var("GEMINI_MODEL") {
            gemini.model = model;
        }

        let http = HttpClientConfig {
            timeout: Duration::from_secs(parsed("HTTP_TIMEOUT_SECS", 60)),
            ..HttpClientConfig::default()
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT", 8080),
            database,
            jwt: JwtConfig::from_env(),
            secure_cookies: env::var("SESSION_COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            gemini,
            http,
        }
    }
}
