//! Data Transfer Objects - request/response types for the web surface.

use serde::{Deserialize, Serialize};

/// Successful `POST /generate` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub content: String,
}

/// Login form body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Signup form body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupForm {
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
    #[serde(rename = "repeatPassword")]
    pub repeat_password: String,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}
