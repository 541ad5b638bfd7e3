//! Gemini client for turning transcripts into articles.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use tubescribe_core::ports::{ArticleGenerator, GenerationError, MAX_OUTPUT_TOKENS, build_prompt};

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the API key. Read on every call, so the
    /// server starts without it and picks it up once set.
    pub api_key_var: String,
    pub max_output_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key_var: "GOOGLE_API_KEY".to_string(),
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, joined.
    fn into_text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

/// Generates articles with the Gemini `generateContent` API.
pub struct GeminiArticleGenerator {
    client: Client,
    config: GeminiConfig,
}

impl GeminiArticleGenerator {
    pub fn new(client: Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    fn api_key(&self) -> Result<String, GenerationError> {
        std::env::var(&self.config.api_key_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GenerationError::MissingCredential(self.config.api_key_var.clone()))
    }
}

#[async_trait]
impl ArticleGenerator for GeminiArticleGenerator {
    async fn generate(&self, transcript: &str) -> Result<String, GenerationError> {
        let api_key = self.api_key()?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(transcript),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        tracing::info!(model = %self.config.model, "Calling Gemini");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Request(format!("undecodable response: {e}")))?;

        parsed.into_text().ok_or(GenerationError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    /// Each test owns its variable so they can run in parallel.
    fn config(server: &MockServer, api_key_var: &str) -> GeminiConfig {
        GeminiConfig {
            base_url: server.uri(),
            api_key_var: api_key_var.to_string(),
            ..GeminiConfig::default()
        }
    }

    fn set_key(var: &str) {
        // SAFETY: the variable name is unique to one test, nothing else reads it.
        unsafe { std::env::set_var(var, "test-api-key") };
    }

    #[tokio::test]
    async fn test_generates_article_with_bounded_output() {
        let server = MockServer::start().await;
        set_key("TUBESCRIBE_TEST_GEMINI_KEY_OK");

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-api-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"parts": [{"text": build_prompt(" a b c")}]}],
                "generationConfig": {"maxOutputTokens": 1024}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {"parts": [{"text": "This video "}, {"text": "explains a, b and c."}], "role": "model"},
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let generator = GeminiArticleGenerator::new(
            Client::new(),
            config(&server, "TUBESCRIBE_TEST_GEMINI_KEY_OK"),
        );

        let article = generator.generate(" a b c").await.unwrap();

        assert_eq!(article, "This video explains a, b and c.");
    }

    #[tokio::test]
    async fn test_missing_credential_fails_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let generator = GeminiArticleGenerator::new(
            Client::new(),
            config(&server, "TUBESCRIBE_TEST_GEMINI_KEY_NEVER_SET"),
        );

        let err = generator.generate("transcript").await.unwrap_err();

        assert!(matches!(err, GenerationError::MissingCredential(ref var) if var == "TUBESCRIBE_TEST_GEMINI_KEY_NEVER_SET"));
    }

    #[tokio::test]
    async fn test_api_error_status() {
        let server = MockServer::start().await;
        set_key("TUBESCRIBE_TEST_GEMINI_KEY_BAD");

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let generator = GeminiArticleGenerator::new(
            Client::new(),
            config(&server, "TUBESCRIBE_TEST_GEMINI_KEY_BAD"),
        );

        let err = generator.generate("transcript").await.unwrap_err();

        assert!(matches!(err, GenerationError::Api { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_blocked_prompt_has_no_text() {
        let server = MockServer::start().await;
        set_key("TUBESCRIBE_TEST_GEMINI_KEY_BLOCKED");

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let generator = GeminiArticleGenerator::new(
            Client::new(),
            config(&server, "TUBESCRIBE_TEST_GEMINI_KEY_BLOCKED"),
        );

        let err = generator.generate("transcript").await.unwrap_err();

        assert!(matches!(err, GenerationError::EmptyResponse));
    }
}
