//! Authentication and session ports.

use uuid::Uuid;

/// Identity carried by a session token.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub user_id: Uuid,
    pub username: String,
    pub exp: i64,
}

/// Issues and checks the signed tokens stored in the session cookie.
pub trait TokenService: Send + Sync {
    /// Generate a session token for a user.
    fn generate_token(&self, user_id: Uuid, username: &str) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<SessionClaims, AuthError>;

    /// Lifetime of issued tokens, in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Session expired")]
    TokenExpired,

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("No session")]
    MissingSession,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
