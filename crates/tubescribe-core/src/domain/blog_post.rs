use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated article, stored once and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    /// Assigned by the store on insert.
    pub id: i32,
    pub user_id: Uuid,
    pub youtube_title: String,
    pub youtube_link: String,
    pub generated_content: String,
    pub created_at: DateTime<Utc>,
}

impl BlogPost {
    /// Whether `user_id` is the account this post was created for.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// A blog post that has not been persisted yet, so it has no id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBlogPost {
    pub user_id: Uuid,
    pub youtube_title: String,
    pub youtube_link: String,
    pub generated_content: String,
    pub created_at: DateTime<Utc>,
}

impl NewBlogPost {
    pub fn new(
        user_id: Uuid,
        youtube_title: String,
        youtube_link: String,
        generated_content: String,
    ) -> Self {
        Self {
            user_id,
            youtube_title,
            youtube_link,
            generated_content,
            created_at: Utc::now(),
        }
    }

    /// Attach the store-assigned id.
    pub fn with_id(self, id: i32) -> BlogPost {
        BlogPost {
            id,
            user_id: self.user_id,
            youtube_title: self.youtube_title,
            youtube_link: self.youtube_link,
            generated_content: self.generated_content,
            created_at: self.created_at,
        }
    }
}
