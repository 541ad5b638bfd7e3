//! Blog post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Uuid,
    pub youtube_title: String,
    pub youtube_link: String,
    #[sea_orm(column_type = "Text")]
    pub generated_content: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for tubescribe_core::domain::BlogPost {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            youtube_title: model.youtube_title,
            youtube_link: model.youtube_link,
            generated_content: model.generated_content,
            created_at: model.created_at.into(),
        }
    }
}

/// The id is left for the database sequence to assign.
impl From<tubescribe_core::domain::NewBlogPost> for ActiveModel {
    fn from(post: tubescribe_core::domain::NewBlogPost) -> Self {
        Self {
            id: NotSet,
            user_id: Set(post.user_id),
            youtube_title: Set(post.youtube_title),
            youtube_link: Set(post.youtube_link),
            generated_content: Set(post.generated_content),
            created_at: Set(post.created_at.into()),
        }
    }
}
