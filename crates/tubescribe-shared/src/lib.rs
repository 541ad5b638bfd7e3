//! # TubeScribe Shared
//!
//! Request/response types shared by the server and any client of its JSON
//! and form endpoints.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, JsonError};
