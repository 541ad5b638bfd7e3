//! Article generation port and prompt template.

use async_trait::async_trait;

/// Upper bound on the model's output, passed as generation config.
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

/// Length asked for in the prompt. The model is not held to it.
pub const SUMMARY_WORD_LIMIT: u32 = 300;

/// Build the summarisation prompt with the transcript embedded verbatim.
pub fn build_prompt(transcript: &str) -> String {
    format!(
        "Based on the following transcript from a YouTube video, write a summary blog article \
         using no more than {SUMMARY_WORD_LIMIT} words explaining what the video is about \
         (avoid using any formatting character):\n\n{transcript}\n\nArticle:"
    )
}

/// Produces article prose from a transcript.
#[async_trait]
pub trait ArticleGenerator: Send + Sync {
    async fn generate(&self, transcript: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Article generation failed: API credential {0} is not set")]
    MissingCredential(String),

    #[error("Article generation failed: request error: {0}")]
    Request(String),

    #[error("Article generation failed: model returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Article generation failed: model returned no text")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_transcript_verbatim() {
        let prompt = build_prompt(" so today we talk about rust");

        assert!(prompt.starts_with(
            "Based on the following transcript from a YouTube video, write a summary blog article using no more than 300 words"
        ));
        assert!(prompt.contains("(avoid using any formatting character):\n\n so today we talk about rust\n\nArticle:"));
        assert!(prompt.ends_with("Article:"));
    }
}
