use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of study content the assistant generates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyMode {
  Lesson,
  Flashcards,
  Quiz,
  Notes,
}

impl StudyMode {
  pub const ALL: [StudyMode; 4] = [Self::Lesson, Self::Flashcards, Self::Quiz, Self::Notes];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Lesson => "lesson",
      Self::Flashcards => "flashcards",
      Self::Quiz => "quiz",
      Self::Notes => "notes",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "lesson" => Some(Self::Lesson),
      "flashcards" => Some(Self::Flashcards),
      "quiz" => Some(Self::Quiz),
      "notes" => Some(Self::Notes),
      _ => None,
    }
  }

  pub fn emoji(&self) -> &'static str {
    match self {
      Self::Lesson => "🧩",
      Self::Flashcards => "🧠",
      Self::Quiz => "🧮",
      Self::Notes => "📝",
    }
  }

  /// Sidebar button caption
  pub fn title(&self) -> &'static str {
    match self {
      Self::Lesson => "Micro Lesson",
      Self::Flashcards => "Flashcards",
      Self::Quiz => "Quiz",
      Self::Notes => "Study Notes",
    }
  }
}

/// A generated message as stored by the remote history service.
///
/// `mode` stays a plain string so history entries written by other clients
/// still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
  #[serde(default = "default_role")]
  pub role: String,
  pub content: String,
  pub mode: String,
  pub topic: String,
  /// Epoch milliseconds
  #[serde(default)]
  pub timestamp: i64,
}

fn default_role() -> String {
  "assistant".to_string()
}

impl ChatMessage {
  pub fn study_mode(&self) -> Option<StudyMode> {
    StudyMode::from_str(&self.mode)
  }

  pub fn is_flashcards(&self) -> bool {
    self.study_mode() == Some(StudyMode::Flashcards)
  }

  /// Upper-cased mode label, e.g. "FLASHCARDS"
  pub fn mode_label(&self) -> String {
    self.mode.to_uppercase()
  }

  pub fn created_at(&self) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(self.timestamp)
  }
}
