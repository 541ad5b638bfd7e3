//! Blog post and user storage.

mod memory;

#[cfg(feature = "postgres")]
mod connections;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use memory::{InMemoryBlogPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use connections::{DatabaseConfig, connect};
#[cfg(feature = "postgres")]
pub use postgres_repo::{PostgresBlogPostRepository, PostgresUserRepository};
