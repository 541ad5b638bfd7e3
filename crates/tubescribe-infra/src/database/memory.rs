//! In-memory repositories - used when no database is configured and in tests.
//!
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use tubescribe_core::domain::{BlogPost, NewBlogPost, User};
use tubescribe_core::error::RepoError;
use tubescribe_core::ports::{BaseRepository, BlogPostRepository, UserRepository};

/// Users keyed by id, with usernames kept unique.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        if store.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        store.insert(user.id, user.clone());
        Ok(user)
    }
}

struct PostTable {
    next_id: i32,
    rows: Vec<BlogPost>,
}

/// Blog posts in insertion order with a sequence for ids.
pub struct InMemoryBlogPostRepository {
    table: RwLock<PostTable>,
}

impl InMemoryBlogPostRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(PostTable {
                next_id: 1,
                rows: Vec::new(),
            }),
        }
    }

    /// Number of stored posts.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryBlogPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<BlogPost, i32> for InMemoryBlogPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<BlogPost>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|p| p.id == id).cloned())
    }
}

#[async_trait]
impl BlogPostRepository for InMemoryBlogPostRepository {
    async fn find_by_owner(&self, user_id: Uuid) -> Result<Vec<BlogPost>, RepoError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .rev()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, post: NewBlogPost) -> Result<BlogPost, RepoError> {
        let mut table = self.table.write().await;

        let post = post.with_id(table.next_id);
        table.next_id += 1;
        table.rows.push(post.clone());

        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_usernames_are_unique() {
        let repo = InMemoryUserRepository::new();
        repo.create(User::new("ann".into(), "a@x.io".into(), "h".into()))
            .await
            .unwrap();

        let err = repo
            .create(User::new("ann".into(), "b@x.io".into(), "h".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
        assert!(repo.find_by_username("ann").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_posts_get_sequential_ids_and_list_newest_first() {
        let repo = InMemoryBlogPostRepository::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        let first = repo
            .create(NewBlogPost::new(owner, "one".into(), "l1".into(), "c1".into()))
            .await
            .unwrap();
        repo.create(NewBlogPost::new(other, "two".into(), "l2".into(), "c2".into()))
            .await
            .unwrap();
        let third = repo
            .create(NewBlogPost::new(owner, "three".into(), "l3".into(), "c3".into()))
            .await
            .unwrap();

        assert_eq!((first.id, third.id), (1, 3));

        let listed = repo.find_by_owner(owner).await.unwrap();
        let titles: Vec<_> = listed.iter().map(|p| p.youtube_title.as_str()).collect();
        assert_eq!(titles, vec!["three", "one"]);
        assert_eq!(repo.find_by_id(2).await.unwrap().unwrap().user_id, other);
        assert!(repo.find_by_id(99).await.unwrap().is_none());
    }
}
