//! Title lookup through YouTube's oEmbed endpoint.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use tubescribe_core::ports::{VideoInfo, VideoResolutionError, VideoResolver};

use super::{YOUTUBE_BASE_URL, extract_video_id};

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: String,
}

/// Resolves links to `(title, id)` without scraping the watch page.
pub struct OEmbedVideoResolver {
    client: Client,
    base_url: String,
}

impl OEmbedVideoResolver {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, YOUTUBE_BASE_URL)
    }

    /// Point the resolver at another origin (used by tests).
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl VideoResolver for OEmbedVideoResolver {
    async fn resolve(&self, link: &str) -> Result<VideoInfo, VideoResolutionError> {
        let video_id = extract_video_id(link)
            .ok_or_else(|| VideoResolutionError::InvalidLink(link.to_string()))?;

        let watch_url = format!("{YOUTUBE_BASE_URL}/watch?v={video_id}");
        tracing::debug!(%video_id, "Fetching oEmbed metadata");

        let response = self
            .client
            .get(format!("{}/oembed", self.base_url))
            .query(&[("url", watch_url.as_str()), ("format", "json")])
            .send()
            .await
            .map_err(|e| VideoResolutionError::Unreachable(e.to_string()))?;

        let status = response.status();
        match status {
            s if s.is_success() => {}
            StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::NOT_FOUND => {
                return Err(VideoResolutionError::Rejected(format!(
                    "video {video_id} returned {status}"
                )));
            }
            _ => {
                return Err(VideoResolutionError::Unreachable(format!(
                    "oEmbed returned {status}"
                )));
            }
        }

        let oembed: OEmbedResponse = response
            .json()
            .await
            .map_err(|e| VideoResolutionError::Unreachable(format!("bad oEmbed response: {e}")))?;

        Ok(VideoInfo {
            title: oembed.title,
            video_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_resolves_title_and_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oembed"))
            .and(query_param(
                "url",
                "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            ))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "title": "Never Gonna Give You Up",
                "author_name": "Rick Astley",
                "thumbnail_url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = OEmbedVideoResolver::with_base_url(Client::new(), server.uri());
        let info = resolver
            .resolve("https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap();

        assert_eq!(
            info,
            VideoInfo {
                title: "Never Gonna Give You Up".to_string(),
                video_id: "dQw4w9WgXcQ".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_link_never_hits_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let resolver = OEmbedVideoResolver::with_base_url(Client::new(), server.uri());
        let err = resolver.resolve("https://example.com/video").await.unwrap_err();

        assert!(matches!(err, VideoResolutionError::InvalidLink(_)));
    }

    #[tokio::test]
    async fn test_platform_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oembed"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let resolver = OEmbedVideoResolver::with_base_url(Client::new(), server.uri());
        let err = resolver
            .resolve("https://www.youtube.com/watch?v=AAAAAAAAAAA")
            .await
            .unwrap_err();

        assert!(matches!(err, VideoResolutionError::Rejected(_)));
    }
}
