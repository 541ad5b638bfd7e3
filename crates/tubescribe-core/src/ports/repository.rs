use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogPost, NewBlogPost, User};
use crate::error::RepoError;

/// Lookup shared by every repository.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;
}

/// User accounts.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Insert a new account. A taken username is a `RepoError::Constraint`.
    async fn create(&self, user: User) -> Result<User, RepoError>;
}

/// Generated articles. Insert-only: there is no update or delete.
#[async_trait]
pub trait BlogPostRepository: BaseRepository<BlogPost, i32> {
    /// All posts owned by `user_id`, newest first.
    async fn find_by_owner(&self, user_id: Uuid) -> Result<Vec<BlogPost>, RepoError>;

    async fn create(&self, post: NewBlogPost) -> Result<BlogPost, RepoError>;
}
