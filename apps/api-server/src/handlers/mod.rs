//! HTTP handlers and route configuration.

mod accounts;
mod blog;
mod health;


use actix_web::{HttpRequest, HttpResponse, web};

use crate::middleware::error::{AppError, AppResult};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(blog::index))
        .service(
            web::resource("/generate")
                .route(web::post().to(blog::generate))
                .default_service(web::to(blog::method_not_allowed)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(accounts::login_page))
                .route(web::post().to(accounts::login)),
        )
        .service(
            web::resource("/signup")
                .route(web::get().to(accounts::signup_page))
                .route(web::post().to(accounts::signup)),
        )
        .service(
            web::resource("/logout")
                .route(web::get().to(accounts::logout))
                .route(web::post().to(accounts::logout)),
        )
        .route("/blogs", web::get().to(blog::blog_list))
        .route("/blogs/{id}", web::get().to(blog::blog_detail))
        .service(web::scope("/api").route("/health", web::get().to(health::health_check)))
        .default_service(web::to(not_found));
}

/// Fallback for paths no route matches.
async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(format!("No route for {}", req.path())))
}
