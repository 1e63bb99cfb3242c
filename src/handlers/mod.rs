pub mod chat;
pub mod export;
pub mod flashcards;
pub mod progress;


use askama::Template;
use axum::{
  extract::State,
  response::{Html, IntoResponse, Redirect, Response},
  routing::{get, post},
  Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::auth::{self, AuthContext};
use crate::content::format_content;
use crate::domain::{ChatMessage, StudyMode};
use crate::session::{ClientSession, Notice, Welcome};
use crate::state::AppState;

pub use chat::{clear_chat, generate, select_mode, view_history};
pub use export::export_history;
pub use flashcards::{
  close_review, flip_card, mark_mastered, next_card, previous_card, review_page, start_review,
};
pub use progress::progress;

/// Directory served under /static
pub const STATIC_DIR: &str = "static";

/// Build the application router.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/", get(index))
    .route("/login", get(auth::login_page).post(auth::login_submit))
    .route("/register", get(auth::register_page).post(auth::register_submit))
    .route("/logout", post(auth::logout))
    .route("/mode", post(select_mode))
    .route("/generate", post(generate))
    .route("/chat/clear", post(clear_chat))
    .route("/history", get(view_history))
    .route("/progress", get(progress))
    .route("/flashcards", get(review_page))
    .route("/flashcards/start", post(start_review))
    .route("/flashcards/flip", post(flip_card))
    .route("/flashcards/next", post(next_card))
    .route("/flashcards/previous", post(previous_card))
    .route("/flashcards/mastered", post(mark_mastered))
    .route("/flashcards/close", post(close_review))
    .route("/export", get(export_history))
    .nest_service("/static", ServeDir::new(STATIC_DIR))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

pub struct ModeButton {
  pub value: &'static str,
  pub title: &'static str,
  pub emoji: &'static str,
  pub active: bool,
}

pub struct MessageView {
  /// Index into the session history
  pub index: usize,
  pub emoji: &'static str,
  pub mode_label: String,
  pub topic: String,
  /// Pre-escaped HTML from `format_content`
  pub body_html: String,
  pub reviewable: bool,
}

impl MessageView {
  fn new(index: usize, message: &ChatMessage) -> Self {
    Self {
      index,
      emoji: message.study_mode().map(|m| m.emoji()).unwrap_or(""),
      mode_label: message.mode_label(),
      topic: message.topic.clone(),
      body_html: format_content(&message.content),
      reviewable: message.is_flashcards(),
    }
  }
}

#[derive(Template)]
#[template(path = "chat.html")]
pub struct ChatTemplate {
  pub user_name: String,
  pub modes: Vec<ModeButton>,
  pub messages: Vec<MessageView>,
  pub welcome: Option<Welcome>,
  pub notice: Option<Notice>,
}

impl ChatTemplate {
  fn from_session(session: &ClientSession, notice: Option<Notice>) -> Self {
    let modes = StudyMode::ALL
      .iter()
      .map(|mode| ModeButton {
        value: mode.as_str(),
        title: mode.title(),
        emoji: mode.emoji(),
        active: session.selected_mode == Some(*mode),
      })
      .collect();

    let messages: Vec<MessageView> = session
      .visible_messages()
      .map(|(index, message)| MessageView::new(index, message))
      .collect();

    let welcome = if messages.is_empty() {
      Some(session.welcome)
    } else {
      None
    };

    Self {
      user_name: session.user.name.clone(),
      modes,
      messages,
      welcome,
      notice,
    }
  }
}

/// GET / - Chat view
pub async fn index(State(state): State<AppState>, auth: AuthContext) -> Response {
  let template = state.sessions.update(&auth.session_id, |session| {
    let notice = session.take_notice();
    ChatTemplate::from_session(session, notice)
  });

  match template {
    Some(template) => Html(template.render().unwrap_or_default()).into_response(),
    None => Redirect::to("/login").into_response(),
  }
}

/// Queue a notice for the next page and send the browser back to the chat
pub(crate) fn notice_and_return(state: &AppState, auth: &AuthContext, notice: Notice) -> Redirect {
  state.sessions.update(&auth.session_id, |session| {
    session.notice = Some(notice);
  });
  Redirect::to("/")
}
