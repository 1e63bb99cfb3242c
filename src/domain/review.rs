use serde::Serialize;

use super::flashcard::{self, Flashcard};

/// Errors starting a review session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
  /// Parsing produced no complete question/answer pairs
  NoCards,
}

impl std::fmt::Display for ReviewError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ReviewError::NoCards => write!(f, "no flashcards to review"),
    }
  }
}

impl ReviewError {
  pub fn user_message(&self) -> &'static str {
    match self {
      ReviewError::NoCards => "Could not parse flashcards from content!",
    }
  }
}

impl std::error::Error for ReviewError {}

/// Request sent to the progress service when a card is marked as mastered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryReport {
  pub user_id: String,
  pub cards_reviewed: u32,
}

/// Projection of the current card for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView<'a> {
  pub card: &'a Flashcard,
  pub revealed: bool,
  /// 1-based position in the deck
  pub position: usize,
  pub total: usize,
}

impl CardView<'_> {
  /// Text of the visible face
  pub fn face_text(&self) -> &str {
    if self.revealed {
      self.card.answer()
    } else {
      self.card.question()
    }
  }

  pub fn face_label(&self) -> &'static str {
    if self.revealed { "Answer" } else { "Question" }
  }

  /// Position indicator, e.g. "2 / 5"
  pub fn counter(&self) -> String {
    format!("{} / {}", self.position, self.total)
  }

  pub fn has_previous(&self) -> bool {
    self.position > 1
  }

  pub fn has_next(&self) -> bool {
    self.position < self.total
  }
}

/// Review state over a non-empty deck.
///
/// `index` always points at a card, and `revealed` is cleared whenever
/// `index` moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSession {
  cards: Vec<Flashcard>,
  index: usize,
  revealed: bool,
}

impl ReviewSession {
  pub fn start(cards: Vec<Flashcard>) -> Result<Self, ReviewError> {
    if cards.is_empty() {
      return Err(ReviewError::NoCards);
    }
    Ok(Self {
      cards,
      index: 0,
      revealed: false,
    })
  }

  /// Parse generated content and start reviewing it.
  pub fn from_content(content: &str) -> Result<Self, ReviewError> {
    Self::start(flashcard::parse(content))
  }

  pub fn flip(&mut self) {
    self.revealed = !self.revealed;
  }

  /// Advance one card. Returns false at the last card.
  pub fn next(&mut self) -> bool {
    if self.index + 1 < self.cards.len() {
      self.index += 1;
      self.revealed = false;
      true
    } else {
      false
    }
  }

  /// Go back one card. Returns false at the first card.
  pub fn previous(&mut self) -> bool {
    if self.index > 0 {
      self.index -= 1;
      self.revealed = false;
      true
    } else {
      false
    }
  }

  pub fn current_card(&self) -> CardView<'_> {
    CardView {
      card: &self.cards[self.index],
      revealed: self.revealed,
      position: self.index + 1,
      total: self.cards.len(),
    }
  }

  /// Build the mastery report for the current card.
  ///
  /// Each call is an independent single-card increment; the session itself
  /// does not track which cards were mastered.
  pub fn mark_mastered(&self, user_id: &str) -> MasteryReport {
    MasteryReport {
      user_id: user_id.to_string(),
      cards_reviewed: 1,
    }
  }

  pub fn index(&self) -> usize {
    self.index
  }

  pub fn is_revealed(&self) -> bool {
    self.revealed
  }

  pub fn total(&self) -> usize {
    self.cards.len()
  }

  pub fn cards(&self) -> &[Flashcard] {
    &self.cards
  }
}
