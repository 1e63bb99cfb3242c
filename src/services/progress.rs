//! Progress reporting to the remote API.

use crate::api::LearnApi;
use crate::domain::MasteryReport;

/// Send a mastery report. Failures are logged and swallowed: marking a card
/// must never interrupt the review.
///
/// Returns true if the service accepted the report.
pub async fn report_mastery(api: &dyn LearnApi, report: &MasteryReport) -> bool {
  match api.report_mastery(report).await {
    Ok(()) => {
      tracing::debug!(
        "Reported {} mastered card(s) for {}",
        report.cards_reviewed,
        report.user_id
      );
      true
    }
    Err(e) => {
      tracing::warn!("Failed to report mastery for {}: {}", report.user_id, e);
      false
    }
  }
}
