//! The link → transcript → article → blog post pipeline.
//!
//! A run moves through `parse`, `resolve`, `transcript`, `generate` and
//! `persist` strictly in order. The first failure ends the run and nothing is
//! stored unless every stage succeeded.

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::domain::{BlogPost, NewBlogPost};
use crate::error::{PipelineError, Stage};
use crate::ports::{ArticleGenerator, BlogPostRepository, TranscriptFetcher, VideoResolver};

/// Body of a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub link: String,
}

impl GenerationRequest {
    /// Parse a raw JSON body. Anything other than an object with a string
    /// `link` is rejected; other keys are ignored.
    pub fn parse(body: &[u8]) -> Result<Self, PipelineError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(error = %e, "Generation request body is not JSON");
            PipelineError::InvalidRequestBody
        })?;

        match value.get("link").and_then(Value::as_str) {
            Some(link) => Ok(Self {
                link: link.to_string(),
            }),
            None => {
                tracing::debug!("Generation request body has no string `link`");
                Err(PipelineError::InvalidRequestBody)
            }
        }
    }
}

/// Orchestrates video resolution, transcript retrieval, generation and storage.
#[derive(Clone)]
pub struct GenerationPipeline {
    resolver: Arc<dyn VideoResolver>,
    transcripts: Arc<dyn TranscriptFetcher>,
    generator: Arc<dyn ArticleGenerator>,
    posts: Arc<dyn BlogPostRepository>,
}

impl GenerationPipeline {
    pub fn new(
        resolver: Arc<dyn VideoResolver>,
        transcripts: Arc<dyn TranscriptFetcher>,
        generator: Arc<dyn ArticleGenerator>,
        posts: Arc<dyn BlogPostRepository>,
    ) -> Self {
        Self {
            resolver,
            transcripts,
            generator,
            posts,
        }
    }

    /// Run every stage starting from the raw request body.
    pub async fn run(&self, owner: Uuid, body: &[u8]) -> Result<BlogPost, PipelineError> {
        let request = GenerationRequest::parse(body)?;
        self.generate_for(owner, request.link).await
    }

    /// Run the stages after parsing for an already-validated link.
    pub async fn generate_for(&self, owner: Uuid, link: String) -> Result<BlogPost, PipelineError> {
        let result = self.execute(owner, link).await;
        if let Err(e) = &result {
            tracing::warn!(%owner, stage = %e.stage(), error = %e, "Generation pipeline failed");
        }
        result
    }

    async fn execute(&self, owner: Uuid, link: String) -> Result<BlogPost, PipelineError> {
        tracing::info!(%owner, stage = %Stage::Resolve, link = %link, "Resolving video");
        let video = self.resolver.resolve(&link).await?;

        tracing::info!(%owner, stage = %Stage::Transcript, video_id = %video.video_id, "Fetching transcript");
        let transcript = self.transcripts.fetch(&video.video_id).await?;

        tracing::info!(
            %owner,
            stage = %Stage::Generate,
            video_id = %video.video_id,
            transcript_chars = transcript.chars().count(),
            "Generating article"
        );
        let content = self.generator.generate(&transcript).await?;

        tracing::info!(%owner, stage = %Stage::Persist, video_id = %video.video_id, "Saving blog post");
        let post = self
            .posts
            .create(NewBlogPost::new(owner, video.title, link, content))
            .await
            .map_err(PipelineError::Persistence)?;

        tracing::info!(%owner, post_id = post.id, "Blog post generated");
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::RepoError;
    use crate::ports::{
        BaseRepository, GenerationError, TranscriptUnavailableError, VideoInfo,
        VideoResolutionError,
    };

    struct StubResolver {
        fail: bool,
    }

    #[async_trait]
    impl VideoResolver for StubResolver {
        async fn resolve(&self, link: &str) -> Result<VideoInfo, VideoResolutionError> {
            if self.fail {
                return Err(VideoResolutionError::InvalidLink(link.to_string()));
            }
            Ok(VideoInfo {
                title: "Learning Rust".to_string(),
                video_id: "dQw4w9WgXcQ".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct StubTranscripts {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TranscriptFetcher for StubTranscripts {
        async fn fetch(&self, video_id: &str) -> Result<String, TranscriptUnavailableError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(TranscriptUnavailableError::NoCaptions(video_id.to_string()));
            }
            Ok(" hello world".to_string())
        }
    }

    #[derive(Default)]
    struct StubGenerator {
        fail: bool,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ArticleGenerator for StubGenerator {
        async fn generate(&self, transcript: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(transcript.to_string());
            if self.fail {
                return Err(GenerationError::EmptyResponse);
            }
            Ok("An article about Rust.".to_string())
        }
    }

    #[derive(Default)]
    struct StubPosts {
        fail: bool,
        stored: Mutex<Vec<BlogPost>>,
    }

    #[async_trait]
    impl BaseRepository<BlogPost, i32> for StubPosts {
        async fn find_by_id(&self, id: i32) -> Result<Option<BlogPost>, RepoError> {
            Ok(self.stored.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }
    }

    #[async_trait]
    impl BlogPostRepository for StubPosts {
        async fn find_by_owner(&self, user_id: Uuid) -> Result<Vec<BlogPost>, RepoError> {
            Ok(self
                .stored
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn create(&self, post: NewBlogPost) -> Result<BlogPost, RepoError> {
            if self.fail {
                return Err(RepoError::Query("disk full".to_string()));
            }
            let mut stored = self.stored.lock().unwrap();
            let post = post.with_id(stored.len() as i32 + 1);
            stored.push(post.clone());
            Ok(post)
        }
    }

    struct Fixture {
        transcripts: Arc<StubTranscripts>,
        generator: Arc<StubGenerator>,
        posts: Arc<StubPosts>,
        pipeline: GenerationPipeline,
    }

    fn fixture(
        resolver: StubResolver,
        transcripts: StubTranscripts,
        generator: StubGenerator,
        posts: StubPosts,
    ) -> Fixture {
        let transcripts = Arc::new(transcripts);
        let generator = Arc::new(generator);
        let posts = Arc::new(posts);
        let pipeline = GenerationPipeline::new(
            Arc::new(resolver),
            transcripts.clone(),
            generator.clone(),
            posts.clone(),
        );
        Fixture {
            transcripts,
            generator,
            posts,
            pipeline,
        }
    }

    fn happy() -> Fixture {
        fixture(
            StubResolver { fail: false },
            StubTranscripts::default(),
            StubGenerator::default(),
            StubPosts::default(),
        )
    }

    #[tokio::test]
    async fn test_successful_run_persists_one_post() {
        let f = happy();
        let owner = Uuid::new_v4();
        let body = br#"{"link": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"}"#;

        let post = f.pipeline.run(owner, body).await.unwrap();

        assert_eq!(post.user_id, owner);
        assert_eq!(post.youtube_title, "Learning Rust");
        assert_eq!(post.youtube_link, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(post.generated_content, "An article about Rust.");
        assert_eq!(f.posts.stored.lock().unwrap().len(), 1);
        assert_eq!(*f.generator.prompts.lock().unwrap(), vec![" hello world".to_string()]);
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_rejected_before_any_stage() {
        let f = happy();

        let bodies: [&[u8]; 5] = [
            b"not json",
            br#"{"url": "https://youtu.be/dQw4w9WgXcQ"}"#,
            br#"{"link": 42}"#,
            br#""https://youtu.be/dQw4w9WgXcQ""#,
            br#"["https://youtu.be/dQw4w9WgXcQ"]"#,
        ];

        for body in bodies {
            let err = f.pipeline.run(Uuid::new_v4(), body).await.unwrap_err();
            assert!(matches!(err, PipelineError::InvalidRequestBody));
            assert_eq!(err.stage(), Stage::Parse);
        }

        assert_eq!(f.transcripts.calls.load(Ordering::SeqCst), 0);
        assert!(f.posts.stored.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolution_failure_stops_pipeline() {
        let f = fixture(
            StubResolver { fail: true },
            StubTranscripts::default(),
            StubGenerator::default(),
            StubPosts::default(),
        );

        let err = f
            .pipeline
            .generate_for(Uuid::new_v4(), "nonsense".to_string())
            .await
            .unwrap_err();

        assert_eq!(err.stage(), Stage::Resolve);
        assert_eq!(f.transcripts.calls.load(Ordering::SeqCst), 0);
        assert!(f.posts.stored.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transcript_failure_skips_generation() {
        let f = fixture(
            StubResolver { fail: false },
            StubTranscripts {
                fail: true,
                ..Default::default()
            },
            StubGenerator::default(),
            StubPosts::default(),
        );

        let err = f
            .pipeline
            .generate_for(Uuid::new_v4(), "https://youtu.be/dQw4w9WgXcQ".to_string())
            .await
            .unwrap_err();

        assert_eq!(err.stage(), Stage::Transcript);
        assert!(f.generator.prompts.lock().unwrap().is_empty());
        assert!(f.posts.stored.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generation_failure_persists_nothing() {
        let f = fixture(
            StubResolver { fail: false },
            StubTranscripts::default(),
            StubGenerator {
                fail: true,
                ..Default::default()
            },
            StubPosts::default(),
        );

        let err = f
            .pipeline
            .generate_for(Uuid::new_v4(), "https://youtu.be/dQw4w9WgXcQ".to_string())
            .await
            .unwrap_err();

        assert_eq!(err.stage(), Stage::Generate);
        assert!(f.posts.stored.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_persist_stage() {
        let f = fixture(
            StubResolver { fail: false },
            StubTranscripts::default(),
            StubGenerator::default(),
            StubPosts {
                fail: true,
                ..Default::default()
            },
        );

        let err = f
            .pipeline
            .generate_for(Uuid::new_v4(), "https://youtu.be/dQw4w9WgXcQ".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Persistence(RepoError::Query(_))));
        assert_eq!(err.stage(), Stage::Persist);
    }
}
