//! Export of chat history as a downloadable document.
//!
//! Word opens plain text served as `application/msword`, so the document is
//! a text rendering of the history rather than a real `.doc` container.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::ChatMessage;

pub const EXPORT_CONTENT_TYPE: &str = "application/msword";

const DOCUMENT_TITLE: &str = "Sensei Vaathi - Learning Session";
const RULE_WIDTH: usize = 50;

/// Download filename, e.g. `sensei-vaathi-1700000000000.doc`
pub fn export_filename(at: DateTime<Utc>) -> String {
  format!("sensei-vaathi-{}.doc", at.timestamp_millis())
}

/// Render the history document for `user_name`, dated `date`.
pub fn render_document(user_name: &str, date: NaiveDate, history: &[ChatMessage]) -> String {
  let mut doc = String::new();
  doc.push_str(DOCUMENT_TITLE);
  doc.push('\n');
  doc.push_str(&format!("User: {}\n", user_name));
  doc.push_str(&format!("Date: {}\n", date.format("%Y-%m-%d")));
  doc.push_str(&format!("\n{}\n\n", "=".repeat(RULE_WIDTH)));

  for (idx, msg) in history.iter().enumerate() {
    doc.push_str(&format!("{}. {} - {}\n", idx + 1, msg.mode_label(), msg.topic));
    doc.push_str(&"-".repeat(RULE_WIDTH));
    doc.push('\n');
    doc.push_str(&strip_tags(&msg.content));
    doc.push_str("\n\n");
  }

  doc
}

/// Remove `<...>` tags; an unterminated `<` is kept as text.
fn strip_tags(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut rest = text;

  while let Some(open) = rest.find('<') {
    let Some(close) = rest[open..].find('>') else {
      break;
    };
    out.push_str(&rest[..open]);
    rest = &rest[open + close + 1..];
  }

  out.push_str(rest);
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn message(mode: &str, topic: &str, content: &str) -> ChatMessage {
    ChatMessage {
      role: "assistant".to_string(),
      content: content.to_string(),
      mode: mode.to_string(),
      topic: topic.to_string(),
      timestamp: 0,
    }
  }

  #[test]
  fn test_document_layout() {
    let history = vec![
      message("lesson", "Ownership", "Values have one owner."),
      message("flashcards", "Borrowing", "Q: &T?\nA: Shared borrow"),
    ];
    let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    let doc = render_document("Asha", date, &history);

    let expected = format!(
      "Sensei Vaathi - Learning Session\nUser: Asha\nDate: 2024-03-09\n\n{eq}\n\n\
       1. LESSON - Ownership\n{dash}\nValues have one owner.\n\n\
       2. FLASHCARDS - Borrowing\n{dash}\nQ: &T?\nA: Shared borrow\n\n",
      eq = "=".repeat(50),
      dash = "-".repeat(50),
    );
    assert_eq!(doc, expected);
  }

  #[test]
  fn test_tags_stripped() {
    assert_eq!(strip_tags("<p>Hi <b>there</b></p>"), "Hi there");
    assert_eq!(strip_tags("a < b"), "a < b");
    assert_eq!(strip_tags("x <y> z"), "x  z");
  }

  #[test]
  fn test_filename_uses_millis() {
    let at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
    assert_eq!(export_filename(at), "sensei-vaathi-1700000000123.doc");
  }
}
