//! Flashcard extraction from generated study content.
//!
//! Generated flashcard messages follow a loose `Q:` / `A:` convention:
//!
//! ```text
//! **Q:** Capital of France?
//! **A:** Paris
//!
//! Q: Largest planet?
//! A: Jupiter, a gas giant
//! with dozens of moons
//! ```
//!
//! Lines that continue a question or answer are joined with a single space.
//! A question that never receives an answer is dropped.

use serde::{Deserialize, Serialize};

/// A question/answer pair, reviewed in the order it was parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
  question: String,
  answer: String,
}

impl Flashcard {
  pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
    Self {
      question: question.into(),
      answer: answer.into(),
    }
  }

  pub fn question(&self) -> &str {
    &self.question
  }

  pub fn answer(&self) -> &str {
    &self.answer
  }
}

/// Which half of a card a marker opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
  Question,
  Answer,
}

/// Recognized marker forms, wrapped variants first so `**Q:**` is not
/// mistaken for a bare `Q:` match.
const MARKERS: [(&str, Field); 4] = [
  ("**Q:**", Field::Question),
  ("Q:", Field::Question),
  ("**A:**", Field::Answer),
  ("A:", Field::Answer),
];

/// Split a trimmed line into its marker and the remaining text.
fn split_marker(line: &str) -> Option<(Field, &str)> {
  MARKERS.iter().find_map(|(marker, field)| {
    line
      .strip_prefix(marker)
      .map(|rest| (*field, rest.trim()))
  })
}

fn append(target: &mut String, text: &str) {
  if !target.is_empty() {
    target.push(' ');
  }
  target.push_str(text);
}

/// Accumulates the card currently being read.
#[derive(Default)]
struct PendingCard {
  question: String,
  answer: String,
  active: Option<Field>,
}

impl PendingCard {
  fn is_complete(&self) -> bool {
    !self.question.is_empty() && !self.answer.is_empty()
  }

  /// Take the pending card if both halves are present, resetting state.
  fn take_complete(&mut self) -> Option<Flashcard> {
    let pending = std::mem::take(self);
    if pending.is_complete() {
      Some(Flashcard::new(pending.question, pending.answer))
    } else {
      None
    }
  }
}

/// Parse generated text into flashcards.
///
/// Never fails: text without well-formed pairs yields an empty list.
pub fn parse(text: &str) -> Vec<Flashcard> {
  let mut cards = Vec::new();
  let mut pending = PendingCard::default();

  for raw in text.lines() {
    let line = raw.trim();
    if line.is_empty() {
      continue;
    }

    match split_marker(line) {
      Some((Field::Question, rest)) => {
        if let Some(card) = pending.take_complete() {
          cards.push(card);
        }
        pending.question = rest.to_string();
        pending.active = Some(Field::Question);
      }
      Some((Field::Answer, rest)) => {
        pending.answer = rest.to_string();
        pending.active = Some(Field::Answer);
      }
      None => match pending.active {
        Some(Field::Answer) => append(&mut pending.answer, line),
        Some(Field::Question) => append(&mut pending.question, line),
        None => {}
      },
    }
  }

  if let Some(card) = pending.take_complete() {
    cards.push(card);
  }

  cards
}
