//! Domain-level error types.

use std::fmt;

use thiserror::Error;

use crate::ports::{GenerationError, TranscriptUnavailableError, VideoResolutionError};

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// The step of the generation pipeline a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Resolve,
    Transcript,
    Generate,
    Persist,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Parse => "parse",
            Stage::Resolve => "resolve",
            Stage::Transcript => "transcript",
            Stage::Generate => "generate",
            Stage::Persist => "persist",
        };
        f.write_str(name)
    }
}

/// Terminal failure of a generation run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid data sent")]
    InvalidRequestBody,

    #[error(transparent)]
    VideoResolution(#[from] VideoResolutionError),

    #[error(transparent)]
    TranscriptUnavailable(#[from] TranscriptUnavailableError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Failed to persist blog post: {0}")]
    Persistence(#[source] RepoError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::InvalidRequestBody => Stage::Parse,
            PipelineError::VideoResolution(_) => Stage::Resolve,
            PipelineError::TranscriptUnavailable(_) => Stage::Transcript,
            PipelineError::Generation(_) => Stage::Generate,
            PipelineError::Persistence(_) => Stage::Persist,
        }
    }
}

/// Failures of the login and signup workflows.
///
/// The `Display` text is shown to the user as-is, so it never carries
/// store details.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid username or password")]
    Authentication,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Error creating account")]
    AccountCreation { reason: String },

    #[error("Something went wrong, please try again")]
    Internal(String),
}
