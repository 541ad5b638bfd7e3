//! Error handling - maps domain failures onto HTTP responses.
//!
//! Generation failures keep the flat `{"error": ...}` body of the
//! `/generate` endpoint; everything else is RFC 7807.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use tubescribe_core::{PipelineError, RepoError};
use tubescribe_shared::{ErrorResponse, JsonError};

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// A `/generate` run that stopped at some stage.
    Generation(PipelineError),
    /// `/generate` without a session.
    GenerationUnauthorized,
    /// No route matched the request path.
    NotFound(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Generation(e) => write!(f, "Generation failed at {}: {}", e.stage(), e),
            AppError::GenerationUnauthorized => write!(f, "Unauthorized"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Generation(e) => match e {
                PipelineError::InvalidRequestBody => StatusCode::BAD_REQUEST,
                PipelineError::VideoResolution(_) | PipelineError::TranscriptUnavailable(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                PipelineError::Generation(_) => StatusCode::BAD_GATEWAY,
                PipelineError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::GenerationUnauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            AppError::Generation(e) => {
                let message = match e {
                    PipelineError::InvalidRequestBody
                    | PipelineError::VideoResolution(_)
                    | PipelineError::TranscriptUnavailable(_) => e.to_string(),
                    PipelineError::Generation(_) => {
                        tracing::error!(error = %e, "Article generation failed");
                        "Article generation failed".to_string()
                    }
                    PipelineError::Persistence(_) => {
                        tracing::error!(error = %e, "Could not store generated article");
                        "Could not save article".to_string()
                    }
                };
                HttpResponse::build(status).json(JsonError::new(message))
            }
            AppError::GenerationUnauthorized => {
                HttpResponse::build(status).json(JsonError::new("Authentication required"))
            }
            AppError::NotFound(detail) => {
                HttpResponse::build(status).json(ErrorResponse::not_found(detail))
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                HttpResponse::build(status).json(ErrorResponse::internal_error())
            }
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        AppError::Generation(err)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) | RepoError::Constraint(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
