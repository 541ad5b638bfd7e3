//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use tubescribe_core::domain::{BlogPost, NewBlogPost, User};
use tubescribe_core::error::RepoError;
use tubescribe_core::ports::{BlogPostRepository, UserRepository};

use super::entity::blog_post::{self, Entity as BlogPostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, insert_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL blog post repository.
pub type PostgresBlogPostRepository = PostgresBaseRepository<BlogPostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(user)
            .insert(&self.db)
            .await
            .map_err(insert_error)?;

        Ok(model.into())
    }
}

#[async_trait]
impl BlogPostRepository for PostgresBlogPostRepository {
    async fn find_by_owner(&self, user_id: Uuid) -> Result<Vec<BlogPost>, RepoError> {
        let result = BlogPostEntity::find()
            .filter(blog_post::Column::UserId.eq(user_id))
            .order_by_desc(blog_post::Column::CreatedAt)
            .order_by_desc(blog_post::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn create(&self, post: NewBlogPost) -> Result<BlogPost, RepoError> {
        let model = blog_post::ActiveModel::from(post)
            .insert(&self.db)
            .await
            .map_err(insert_error)?;

        tracing::debug!(post_id = model.id, "Blog post inserted");
        Ok(model.into())
    }
}
