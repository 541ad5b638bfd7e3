//! Login, signup and logout.

use actix_web::{HttpResponse, http::header, web};

use tubescribe_core::AccountError;
use tubescribe_core::domain::User;
use tubescribe_shared::dto::{LoginForm, SignupForm};

use crate::middleware::session::{removal_cookie, session_cookie};
use crate::state::AppState;
use crate::views;

fn redirect_home() -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.insert_header((header::LOCATION, "/"));
    builder
}

/// Issue the session cookie for `user` and go to the submission page.
fn start_session(state: &AppState, user: &User) -> Result<HttpResponse, AccountError> {
    let token = state
        .tokens
        .generate_token(user.id, &user.username)
        .map_err(|e| AccountError::Internal(e.to_string()))?;

    let cookie = session_cookie(
        token,
        state.tokens.expiration_seconds(),
        state.secure_cookies,
    );

    Ok(redirect_home().cookie(cookie).finish())
}

/// GET /login
pub async fn login_page() -> HttpResponse {
    views::login(None)
}

/// POST /login
pub async fn login(state: web::Data<AppState>, form: web::Form<LoginForm>) -> HttpResponse {
    let form = form.into_inner();

    let result = state
        .accounts
        .login(&form.username, &form.password)
        .await
        .and_then(|user| start_session(&state, &user));

    match result {
        Ok(response) => response,
        Err(e) => {
            if let AccountError::Internal(detail) = &e {
                tracing::error!(%detail, "Login failed");
            }
            views::login(Some(&e.to_string()))
        }
    }
}

/// GET /signup
pub async fn signup_page() -> HttpResponse {
    views::signup(None)
}

/// POST /signup
pub async fn signup(state: web::Data<AppState>, form: web::Form<SignupForm>) -> HttpResponse {
    let form = form.into_inner();

    let result = state
        .accounts
        .signup(
            &form.username,
            &form.email,
            &form.password,
            &form.repeat_password,
        )
        .await
        .and_then(|user| start_session(&state, &user));

    match result {
        Ok(response) => response,
        Err(e) => {
            if let AccountError::Internal(detail) = &e {
                tracing::error!(%detail, "Signup failed");
            }
            views::signup(Some(&e.to_string()))
        }
    }
}

/// GET|POST /logout
pub async fn logout() -> HttpResponse {
    redirect_home().cookie(removal_cookie()).finish()
}
