//! Domain entities - the core business objects.

mod blog_post;
mod user;

pub use blog_post::{BlogPost, NewBlogPost};
pub use user::User;
