use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Account profile and progress counters as returned by the remote API.
///
/// The remote service echoes the stored password back; it is never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: String,
  pub name: String,
  pub username: String,
  #[serde(default)]
  pub total_sessions: u32,
  #[serde(default)]
  pub mastered_cards: u32,
  /// Epoch milliseconds
  #[serde(default)]
  pub created_at: i64,
}

impl User {
  pub fn member_since(&self) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(self.created_at).map(|dt| dt.date_naive())
  }
}
