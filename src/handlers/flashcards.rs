//! Flashcard review overlay handlers.

use askama::Template;
use axum::{
  extract::State,
  response::{Html, IntoResponse, Redirect, Response},
  Form,
};
use serde::Deserialize;

use crate::auth::AuthContext;
use crate::domain::ReviewSession;
use crate::services;
use crate::session::Notice;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "review.html")]
pub struct ReviewTemplate {
  pub topic: String,
  pub label: &'static str,
  pub text: String,
  pub revealed: bool,
  pub counter: String,
  pub has_previous: bool,
  pub has_next: bool,
  pub notice: Option<Notice>,
}

impl ReviewTemplate {
  fn new(review: &ReviewSession, topic: &str, notice: Option<Notice>) -> Self {
    let view = review.current_card();
    Self {
      topic: topic.to_string(),
      label: view.face_label(),
      text: view.face_text().to_string(),
      revealed: view.revealed,
      counter: view.counter(),
      has_previous: view.has_previous(),
      has_next: view.has_next(),
      notice,
    }
  }
}

#[derive(Deserialize)]
pub struct StartReviewForm {
  /// History index of the flashcard message; latest message if absent
  pub message: Option<usize>,
}

/// POST /flashcards/start - Parse a flashcard message and open the overlay
pub async fn start_review(
  State(state): State<AppState>,
  auth: AuthContext,
  Form(form): Form<StartReviewForm>,
) -> impl IntoResponse {
  let started = state.sessions.update(&auth.session_id, |session| {
    let message = match form.message {
      Some(index) => session.history.get(index),
      None => session.history.last(),
    };

    let Some(message) = message.filter(|m| m.is_flashcards()) else {
      session.notice = Some(Notice::error("No flashcards found in recent messages!"));
      return false;
    };

    match ReviewSession::from_content(&message.content) {
      Ok(review) => {
        tracing::debug!("Starting review of {} cards on {:?}", review.total(), message.topic);
        session.review = Some(review);
        session.review_topic = message.topic.clone();
        true
      }
      Err(e) => {
        tracing::info!("Flashcard message on {:?} had no cards: {}", message.topic, e);
        session.notice = Some(Notice::error(e.user_message()));
        false
      }
    }
  });

  if started == Some(true) {
    Redirect::to("/flashcards")
  } else {
    Redirect::to("/")
  }
}

/// GET /flashcards - Review overlay for the active session
pub async fn review_page(State(state): State<AppState>, auth: AuthContext) -> Response {
  let template = state
    .sessions
    .update(&auth.session_id, |session| {
      let review = session.review.as_ref()?;
      Some(ReviewTemplate::new(
        review,
        &session.review_topic,
        session.notice.take(),
      ))
    })
    .flatten();

  match template {
    Some(template) => Html(template.render().unwrap_or_default()).into_response(),
    None => Redirect::to("/").into_response(),
  }
}

/// Apply a transition to the active review and return to the overlay
fn with_review(state: &AppState, auth: &AuthContext, f: impl FnOnce(&mut ReviewSession)) -> Redirect {
  let active = state
    .sessions
    .update(&auth.session_id, |session| match session.review.as_mut() {
      Some(review) => {
        f(review);
        true
      }
      None => false,
    })
    .unwrap_or(false);

  if active {
    Redirect::to("/flashcards")
  } else {
    Redirect::to("/")
  }
}

/// POST /flashcards/flip
pub async fn flip_card(State(state): State<AppState>, auth: AuthContext) -> impl IntoResponse {
  with_review(&state, &auth, |review| review.flip())
}

/// POST /flashcards/next
pub async fn next_card(State(state): State<AppState>, auth: AuthContext) -> impl IntoResponse {
  with_review(&state, &auth, |review| {
    review.next();
  })
}

/// POST /flashcards/previous
pub async fn previous_card(State(state): State<AppState>, auth: AuthContext) -> impl IntoResponse {
  with_review(&state, &auth, |review| {
    review.previous();
  })
}

/// POST /flashcards/mastered - Report the current card as mastered
pub async fn mark_mastered(State(state): State<AppState>, auth: AuthContext) -> impl IntoResponse {
  let report = state
    .sessions
    .update(&auth.session_id, |session| {
      session.review.as_ref().map(|r| r.mark_mastered(&auth.user.id))
    })
    .flatten();

  let Some(report) = report else {
    return Redirect::to("/");
  };

  // The review continues whether or not the service accepted the report
  if services::progress::report_mastery(state.api.as_ref(), &report).await {
    state.sessions.update(&auth.session_id, |session| {
      session.user.mastered_cards += report.cards_reviewed;
      session.notice = Some(Notice::success("Card marked as mastered! 🎉"));
    });
  }

  Redirect::to("/flashcards")
}

/// POST /flashcards/close - Discard the review session
pub async fn close_review(State(state): State<AppState>, auth: AuthContext) -> impl IntoResponse {
  state.sessions.update(&auth.session_id, |session| {
    session.review = None;
    session.review_topic.clear();
  });
  Redirect::to("/")
}
