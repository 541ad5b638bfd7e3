//! Submission page, article generation and the blog pages.

use actix_web::{HttpResponse, http::header, web};

use tubescribe_core::ports::BaseRepository;
use tubescribe_shared::JsonError;
use tubescribe_shared::dto::GenerateResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::{OptionalSession, Session};
use crate::state::AppState;
use crate::views;

/// GET /
pub async fn index(session: Session) -> HttpResponse {
    views::index(&session.username)
}

/// POST /generate
///
/// Body: `{"link": "<youtube url>"}`. Responds `{"content": "..."}` once the
/// article is stored.
pub async fn generate(
    state: web::Data<AppState>,
    session: OptionalSession,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let session = session.0.ok_or(AppError::GenerationUnauthorized)?;

    let post = state.pipeline.run(session.user_id, &body).await?;

    Ok(HttpResponse::Ok().json(GenerateResponse {
        content: post.generated_content,
    }))
}

/// Any method other than POST on /generate.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(JsonError::new("Invalid request method"))
}

/// GET /blogs
pub async fn blog_list(state: web::Data<AppState>, session: Session) -> AppResult<HttpResponse> {
    let posts = state.posts.find_by_owner(session.user_id).await?;
    Ok(views::all_blogs(&session.username, &posts))
}

/// GET /blogs/{id}
///
/// Posts that do not exist or belong to someone else redirect home, as do
/// ids that are not post ids at all.
pub async fn blog_detail(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let Ok(id) = path.parse::<i32>() else {
        tracing::debug!(raw_id = %path.as_str(), "Blog post id is not a number");
        return Ok(redirect_home());
    };

    match state.posts.find_by_id(id).await? {
        Some(post) if post.is_owned_by(session.user_id) => {
            Ok(views::blog_details(&session.username, &post))
        }
        Some(_) => {
            tracing::warn!(user_id = %session.user_id, post_id = id, "Denied access to foreign blog post");
            Ok(redirect_home())
        }
        None => Ok(redirect_home()),
    }
}

fn redirect_home() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish()
}
