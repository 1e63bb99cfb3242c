//! Authentication handlers for login, register, and logout.

use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

use super::middleware::{OptionalAuth, SESSION_COOKIE_NAME};
use crate::api::{LoginRequest, RegisterRequest};
use crate::domain::{ChatMessage, User};
use crate::session::{ClientSession, Notice};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub username: String,
    pub version: &'static str,
}

#[derive(Template)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub name: String,
    pub username: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub username: String,
    pub password: String,
}

fn login_error(error: impl Into<String>, username: &str) -> Response {
    let template = LoginTemplate {
        error: Some(error.into()),
        username: username.to_string(),
        version: env!("CARGO_PKG_VERSION"),
    };
    Html(template.render().unwrap_or_default()).into_response()
}

fn register_error(error: impl Into<String>, form: &RegisterForm) -> Response {
    let template = RegisterTemplate {
        error: Some(error.into()),
        name: form.name.clone(),
        username: form.username.clone(),
    };
    Html(template.render().unwrap_or_default()).into_response()
}

/// Session cookie for a freshly created client session
fn session_cookie(session_id: String, expiry_hours: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, session_id))
        .path("/")
        .http_only(true)
        .secure(false) // Set to true in production with HTTPS
        .max_age(time::Duration::hours(expiry_hours))
        .build()
}

/// Open a client session for `user` and send the browser to the chat.
fn start_session(
    state: &AppState,
    jar: CookieJar,
    user: User,
    history: Vec<ChatMessage>,
    notice: Notice,
) -> Response {
    let mut session = ClientSession::new(user, history);
    session.notice = Some(notice);
    let session_id = state.sessions.create(session);
    let cookie = session_cookie(session_id, state.sessions.expiry_hours());

    (jar.add(cookie), Redirect::to("/")).into_response()
}

/// GET /login - Show login page
pub async fn login_page(OptionalAuth(auth): OptionalAuth) -> Response {
    if auth.is_some() {
        return Redirect::to("/").into_response();
    }
    let template = LoginTemplate {
        error: None,
        username: String::new(),
        version: env!("CARGO_PKG_VERSION"),
    };
    Html(template.render().unwrap_or_default()).into_response()
}

/// POST /login - Check credentials with the remote API
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return login_error("Enter username and password", username);
    }

    let request = LoginRequest {
        username: username.to_string(),
        password: form.password.clone(),
    };

    let user = match state.api.login(&request).await {
        Ok(user) => user,
        Err(e) => {
            tracing::info!("Login failed for {}: {}", username, e);
            return login_error(e.user_message(), username);
        }
    };

    // History failures are not fatal; the chat just starts empty
    let history = match state.api.history(&user.id).await {
        Ok(history) => history,
        Err(e) => {
            tracing::warn!("Failed to load history for {}: {}", user.id, e);
            Vec::new()
        }
    };

    tracing::info!("User {} signed in with {} history entries", user.id, history.len());
    start_session(&state, jar, user, history, Notice::success("Login successful!"))
}

/// GET /register - Show registration page
pub async fn register_page(OptionalAuth(auth): OptionalAuth) -> Response {
    if auth.is_some() {
        return Redirect::to("/").into_response();
    }
    let template = RegisterTemplate {
        error: None,
        name: String::new(),
        username: String::new(),
    };
    Html(template.render().unwrap_or_default()).into_response()
}

/// POST /register - Create an account with the remote API and sign in
pub async fn register_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.name.trim().is_empty() || form.username.trim().is_empty() || form.password.is_empty() {
        return register_error("Name, username and password are required", &form);
    }

    let request = RegisterRequest {
        name: form.name.trim().to_string(),
        username: form.username.trim().to_string(),
        password: form.password.clone(),
    };

    match state.api.register(&request).await {
        Ok(user) => {
            tracing::info!("Registered user {} ({})", user.username, user.id);
            start_session(&state, jar, user, Vec::new(), Notice::success("Account created!"))
        }
        Err(e) => {
            tracing::info!("Registration failed for {}: {}", request.username, e);
            register_error(e.user_message(), &form)
        }
    }
}

/// POST /logout - Drop the client session
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(session_cookie) = jar.get(SESSION_COOKIE_NAME) {
        state.sessions.remove(session_cookie.value());
    }

    // Remove session cookie
    let session_cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .max_age(time::Duration::seconds(0))
        .build();

    (jar.remove(session_cookie), Redirect::to("/login"))
}
