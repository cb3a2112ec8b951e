//! Default verdict texts and message templates.

/// Verdict for an approved submission.
pub const APPROVED: &str = "The work has been reviewed: the reviewer liked everything. Hooray!";

/// Verdict for a submission under review.
pub const REVIEWING: &str = "The work has been taken for review by the reviewer.";

/// Verdict for a submission returned with comments.
pub const REJECTED: &str = "The work has been reviewed: the reviewer has comments.";

/// Build the status-change notification for a homework.
pub fn status_changed(homework_name: &str, verdict: &str) -> String {
    format!("Review status changed for \"{homework_name}\". {verdict}")
}

/// Build the chat report for a failed cycle.
pub fn cycle_failure(error: &str) -> String {
    format!("Bot failure: {error}")
}
