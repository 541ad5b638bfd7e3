//! Hosted language model adapters.

mod gemini;

pub use gemini::{GeminiArticleGenerator, GeminiConfig};
