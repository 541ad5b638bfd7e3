//! Shared outbound HTTP client.

use std::time::Duration;

/// Settings applied to every outbound request.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            user_agent: concat!("tubescribe/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Build the client shared by the YouTube and Gemini adapters.
pub fn build_http_client(config: &HttpClientConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.as_str())
        .build()
}
