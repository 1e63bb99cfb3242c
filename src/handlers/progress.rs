use askama::Template;
use axum::{
  extract::State,
  response::{Html, IntoResponse, Redirect, Response},
};

use crate::auth::AuthContext;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "progress.html")]
pub struct ProgressTemplate {
  pub user_name: String,
  pub total_sessions: u32,
  pub mastered_cards: u32,
  pub member_since: String,
}

/// GET /progress - Learning stats from the remote progress service
pub async fn progress(State(state): State<AppState>, auth: AuthContext) -> Response {
  let user = match state.api.progress(&auth.user.id).await {
    Ok(user) => user,
    Err(e) => {
      tracing::warn!("Failed to load progress for {}: {}", auth.user.id, e);
      return Redirect::to("/").into_response();
    }
  };

  // Keep the cached profile in step with the service's counters
  state.sessions.update(&auth.session_id, |session| {
    session.user = user.clone();
  });

  let template = ProgressTemplate {
    user_name: user.name.clone(),
    total_sessions: user.total_sessions,
    mastered_cards: user.mastered_cards,
    member_since: user
      .member_since()
      .map(|d| d.format("%Y-%m-%d").to_string())
      .unwrap_or_else(|| "-".to_string()),
  };

  Html(template.render().unwrap_or_default()).into_response()
}
