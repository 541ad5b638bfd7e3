//! Cookie-backed session extractor.
//!
//! Handlers receive the current user as a [`Session`] value instead of
//! reading ambient request state.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use std::fmt;
use std::future::{Ready, ready};
use uuid::Uuid;

use tubescribe_core::ports::{AuthError, SessionClaims};

use crate::state::AppState;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "tubescribe_session";

/// Where unauthenticated page requests are sent.
pub const LOGIN_PATH: &str = "/login";

/// The authenticated user behind a request.
///
/// ```ignore
/// async fn protected_page(session: Session) -> impl Responder {
///     format!("Hello, {}!", session.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub username: String,
}

impl From<SessionClaims> for Session {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// Missing or unusable session. Pages answer it with a login redirect.
#[derive(Debug)]
pub struct SessionRequired(pub AuthError);

impl fmt::Display for SessionRequired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for SessionRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        tracing::debug!(reason = %self.0, "Redirecting to login");
        HttpResponse::Found()
            .insert_header((header::LOCATION, LOGIN_PATH))
            .finish()
    }
}

fn session_from_request(req: &HttpRequest) -> Result<Session, AuthError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AuthError::InvalidToken("Server configuration error".to_string())
    })?;

    let cookie = req.cookie(SESSION_COOKIE).ok_or(AuthError::MissingSession)?;

    state
        .tokens
        .validate_token(cookie.value())
        .map(Session::from)
}

impl FromRequest for Session {
    type Error = SessionRequired;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(session_from_request(req).map_err(SessionRequired))
    }
}

/// Session extractor that never fails, for endpoints that answer anonymous
/// requests themselves.
pub struct OptionalSession(pub Option<Session>);

impl FromRequest for OptionalSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalSession(session_from_request(req).ok())))
    }
}

/// Cookie that starts a session.
pub fn session_cookie(token: String, max_age_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(max_age_seconds))
        .finish()
}

/// Cookie that ends the session in the browser.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}
