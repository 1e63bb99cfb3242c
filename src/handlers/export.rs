use axum::{
  extract::State,
  http::header,
  response::{IntoResponse, Response},
};
use chrono::{Local, Utc};

use super::notice_and_return;
use crate::auth::AuthContext;
use crate::content::{export_filename, render_document, EXPORT_CONTENT_TYPE};
use crate::session::Notice;
use crate::state::AppState;

/// GET /export - Download the session history as a document
pub async fn export_history(State(state): State<AppState>, auth: AuthContext) -> Response {
  let snapshot = state.sessions.update(&auth.session_id, |session| {
    if session.history.is_empty() {
      return None;
    }
    session.notice = Some(Notice::success("Chat exported successfully! 📤"));
    Some((session.user.name.clone(), session.history.clone()))
  });

  let Some((user_name, history)) = snapshot.flatten() else {
    return notice_and_return(&state, &auth, Notice::error("No content to export!")).into_response();
  };

  let document = render_document(&user_name, Local::now().date_naive(), &history);
  let disposition = format!("attachment; filename=\"{}\"", export_filename(Utc::now()));
  tracing::info!("Exported {} messages for {}", history.len(), auth.user.id);

  (
    [
      (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
      (header::CONTENT_DISPOSITION, disposition),
    ],
    document,
  )
    .into_response()
}
