//! Session extractors.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::domain::User;
use crate::state::AppState;

pub const SESSION_COOKIE_NAME: &str = "ml_session";

/// Signed-in request context.
/// Add this as a handler parameter to require a live client session.
/// Redirects to /login if there is none.
#[derive(Clone)]
pub struct AuthContext {
    pub session_id: String,
    pub user: User,
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| Redirect::to("/login").into_response())?;

        let session_id = jar
            .get(SESSION_COOKIE_NAME)
            .map(|c| c.value().to_string())
            .ok_or_else(|| Redirect::to("/login").into_response())?;

        let user = state
            .sessions
            .update(&session_id, |session| session.user.clone())
            .ok_or_else(|| {
                tracing::debug!("Unknown or expired session, redirecting to login");
                Redirect::to("/login").into_response()
            })?;

        Ok(AuthContext { session_id, user })
    }
}

/// Optional session extractor.
/// Returns Some(AuthContext) if signed in, None otherwise.
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthContext::from_request_parts(parts, state).await {
            Ok(auth) => Ok(OptionalAuth(Some(auth))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}
