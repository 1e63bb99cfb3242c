//! In-memory client session storage.
//!
//! Each browser gets a [`ClientSession`] keyed by the session ID in its
//! cookie. Sessions auto-expire after a configurable duration of inactivity.

use crate::config;
use crate::domain::{ChatMessage, ReviewSession, StudyMode, User};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One-shot message shown on the next rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub text: String,
  /// CSS modifier: "success", "error" or "info"
  pub kind: &'static str,
}

impl Notice {
  pub fn success(text: impl Into<String>) -> Self {
    Self { text: text.into(), kind: "success" }
  }

  pub fn error(text: impl Into<String>) -> Self {
    Self { text: text.into(), kind: "error" }
  }

  pub fn info(text: impl Into<String>) -> Self {
    Self { text: text.into(), kind: "info" }
  }
}

/// Panel shown when the chat has no visible messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Welcome {
  Greeting,
  Cleared,
  NoHistory,
}

impl Welcome {
  pub fn title(&self) -> &'static str {
    match self {
      Self::Greeting => "Welcome to Sensei Vaathi! 👋",
      Self::Cleared => "Chat Cleared",
      Self::NoHistory => "No History Yet",
    }
  }

  pub fn body(&self) -> &'static str {
    match self {
      Self::Greeting => "Choose a learning mode from the sidebar and enter a topic to get started.",
      Self::Cleared => "Enter a new topic to continue learning!",
      Self::NoHistory => "Start learning to build your history!",
    }
  }
}

/// Everything the client tracks for one signed-in browser.
#[derive(Debug, Clone)]
pub struct ClientSession {
  pub user: User,
  pub selected_mode: Option<StudyMode>,
  pub history: Vec<ChatMessage>,
  /// Messages before this index are hidden from the chat view
  pub display_from: usize,
  pub welcome: Welcome,
  /// Active flashcard review, dropped when the overlay closes
  pub review: Option<ReviewSession>,
  /// Topic of the message under review
  pub review_topic: String,
  pub notice: Option<Notice>,
}

impl ClientSession {
  pub fn new(user: User, history: Vec<ChatMessage>) -> Self {
    Self {
      user,
      selected_mode: None,
      history,
      display_from: 0,
      welcome: Welcome::Greeting,
      review: None,
      review_topic: String::new(),
      notice: None,
    }
  }

  /// Messages currently shown in the chat, with their history index
  pub fn visible_messages(&self) -> impl Iterator<Item = (usize, &ChatMessage)> {
    self.history.iter().enumerate().skip(self.display_from)
  }

  /// Hide everything shown so far; history itself is preserved
  pub fn clear_display(&mut self) {
    self.display_from = self.history.len();
    self.welcome = Welcome::Cleared;
  }

  /// Show the full history again
  pub fn show_history(&mut self) {
    self.display_from = 0;
    self.welcome = Welcome::NoHistory;
  }

  pub fn take_notice(&mut self) -> Option<Notice> {
    self.notice.take()
  }
}

/// Session entry with last access time for expiration
struct SessionEntry {
  session: ClientSession,
  last_access: DateTime<Utc>,
}

/// Shared session store, cloned into every handler through `AppState`
#[derive(Clone)]
pub struct SessionStore {
  sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
  expiry: Duration,
}

impl SessionStore {
  pub fn new(expiry_hours: i64) -> Self {
    Self {
      sessions: Arc::new(Mutex::new(HashMap::new())),
      expiry: Duration::hours(expiry_hours),
    }
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, SessionEntry>> {
    // A panic while holding the lock leaves plain data behind; keep serving it
    self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  /// Store a new session and return its ID
  pub fn create(&self, session: ClientSession) -> String {
    let session_id = generate_session_id();
    let mut sessions = self.lock();
    sessions.insert(
      session_id.clone(),
      SessionEntry {
        session,
        last_access: Utc::now(),
      },
    );
    session_id
  }

  /// Snapshot of a live session
  pub fn get(&self, session_id: &str) -> Option<ClientSession> {
    self.update(session_id, |session| session.clone())
  }

  /// Mutate a live session in place.
  ///
  /// Returns None if the session does not exist or has expired. The closure
  /// runs under the store lock, so it must not block.
  pub fn update<R>(&self, session_id: &str, f: impl FnOnce(&mut ClientSession) -> R) -> Option<R> {
    let mut sessions = self.lock();
    let now = Utc::now();

    // Clean up expired sessions occasionally (~10% chance)
    if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
      self.cleanup_expired(&mut sessions, now);
    }

    let entry = sessions.get_mut(session_id)?;
    if entry.last_access + self.expiry <= now {
      sessions.remove(session_id);
      return None;
    }

    entry.last_access = now;
    Some(f(&mut entry.session))
  }

  pub fn expiry_hours(&self) -> i64 {
    self.expiry.num_hours()
  }

  pub fn remove(&self, session_id: &str) {
    self.lock().remove(session_id);
  }

  pub fn len(&self) -> usize {
    self.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn cleanup_expired(&self, sessions: &mut HashMap<String, SessionEntry>, now: DateTime<Utc>) {
    let before = sessions.len();
    sessions.retain(|_, entry| entry.last_access + self.expiry > now);
    let removed = before - sessions.len();
    if removed > 0 {
      tracing::debug!("Expired {} client sessions", removed);
    }
  }
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
  use rand::Rng;
  let mut rng = rand::rng();
  (0..32)
    .map(|_| {
      let idx = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}
