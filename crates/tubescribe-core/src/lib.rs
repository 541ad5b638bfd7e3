//! # TubeScribe Core
//!
//! The domain layer of TubeScribe.
//! Entities, ports and the two workflows (article generation and accounts)
//! live here with zero infrastructure dependencies.

pub mod accounts;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod ports;

pub use accounts::AccountService;
pub use error::{AccountError, PipelineError, RepoError, Stage};
pub use pipeline::{GenerationPipeline, GenerationRequest};
