//! Mode selection, content generation and chat display handlers.

use axum::{
  extract::State,
  response::{IntoResponse, Redirect},
  Form,
};
use serde::Deserialize;

use super::notice_and_return;
use crate::api::GenerateRequest;
use crate::auth::AuthContext;
use crate::domain::StudyMode;
use crate::session::Notice;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ModeForm {
  pub mode: String,
}

#[derive(Deserialize)]
pub struct GenerateForm {
  pub topic: String,
}

/// POST /mode - Select the study mode for the next generation
pub async fn select_mode(
  State(state): State<AppState>,
  auth: AuthContext,
  Form(form): Form<ModeForm>,
) -> impl IntoResponse {
  match StudyMode::from_str(&form.mode) {
    Some(mode) => {
      state.sessions.update(&auth.session_id, |session| {
        session.selected_mode = Some(mode);
      });
      Redirect::to("/")
    }
    None => {
      tracing::debug!("Rejected unknown study mode {:?}", form.mode);
      notice_and_return(&state, &auth, Notice::error("Unknown learning mode"))
    }
  }
}

/// POST /generate - Ask the remote API for study content on a topic
pub async fn generate(
  State(state): State<AppState>,
  auth: AuthContext,
  Form(form): Form<GenerateForm>,
) -> impl IntoResponse {
  let selected_mode = state
    .sessions
    .update(&auth.session_id, |session| session.selected_mode)
    .flatten();

  let Some(mode) = selected_mode else {
    return notice_and_return(&state, &auth, Notice::error("Please select a learning mode first!"));
  };

  let topic = form.topic.trim();
  if topic.is_empty() {
    return notice_and_return(&state, &auth, Notice::error("Please enter a topic!"));
  }

  let request = GenerateRequest {
    user_id: auth.user.id.clone(),
    topic: topic.to_string(),
    mode,
  };

  match state.api.generate(&request).await {
    Ok(message) => {
      tracing::info!("Generated {} on {:?} for {}", mode.as_str(), topic, auth.user.id);
      state.sessions.update(&auth.session_id, |session| {
        session.history.push(message);
        session.user.total_sessions += 1;
      });
      Redirect::to("/")
    }
    Err(e) => {
      tracing::warn!("Content generation failed for {}: {}", auth.user.id, e);
      notice_and_return(
        &state,
        &auth,
        Notice::error("Error generating content. Please try again."),
      )
    }
  }
}

/// POST /chat/clear - Hide the current chat; history is kept
pub async fn clear_chat(State(state): State<AppState>, auth: AuthContext) -> impl IntoResponse {
  state.sessions.update(&auth.session_id, |session| session.clear_display());
  Redirect::to("/")
}

/// GET /history - Show the whole history again
pub async fn view_history(State(state): State<AppState>, auth: AuthContext) -> impl IntoResponse {
  state.sessions.update(&auth.session_id, |session| session.show_history());
  Redirect::to("/")
}
