//! Turning a homework record into a notification.

use serde_json::Value;

use crate::base::{
    config::Config,
    types::{HomeworkRecord, HomeworkStatus, PollError},
    verdicts,
};

/// Verdict texts for each known status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdicts {
    pub approved: String,
    pub reviewing: String,
    pub rejected: String,
}

impl Default for Verdicts {
    fn default() -> Self {
        Self {
            approved: verdicts::APPROVED.to_string(),
            reviewing: verdicts::REVIEWING.to_string(),
            rejected: verdicts::REJECTED.to_string(),
        }
    }
}

impl Verdicts {
    pub fn from_config(config: &Config) -> Self {
        Self {
            approved: config.verdict_approved.clone(),
            reviewing: config.verdict_reviewing.clone(),
            rejected: config.verdict_rejected.clone(),
        }
    }

    pub fn get(&self, status: HomeworkStatus) -> &str {
        match status {
            HomeworkStatus::Approved => &self.approved,
            HomeworkStatus::Reviewing => &self.reviewing,
            HomeworkStatus::Rejected => &self.rejected,
        }
    }
}

/// Parse a raw homework entry.
///
/// Both `homework_name` and `status` must be present as strings, and the
/// status must be one of the known codes.
pub fn parse_homework(homework: &Value) -> Result<HomeworkRecord, PollError> {
    let name = required_str(homework, "homework_name")?;
    let status = required_str(homework, "status")?.parse::<HomeworkStatus>()?;

    Ok(HomeworkRecord { name: name.to_string(), status })
}

/// Produce the status-change notification for a homework entry.
pub fn parse_status(homework: &Value, table: &Verdicts) -> Result<String, PollError> {
    let record = parse_homework(homework)?;

    Ok(verdicts::status_changed(&record.name, table.get(record.status)))
}

fn required_str<'a>(homework: &'a Value, key: &str) -> Result<&'a str, PollError> {
    homework.get(key).and_then(Value::as_str).ok_or_else(|| PollError::MissingField(key.to_string()))
}

// Tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_approved_message() {
        let message = parse_status(&json!({ "homework_name": "proj1", "status": "approved" }), &Verdicts::default()).unwrap();

        assert!(message.contains("proj1"));
        assert!(message.contains(verdicts::APPROVED));
        assert_eq!(message, format!("Review status changed for \"proj1\". {}", verdicts::APPROVED));
    }

    #[test]
    fn test_each_status_maps_to_its_verdict() {
        let table = Verdicts {
            approved: "yes".into(),
            reviewing: "wait".into(),
            rejected: "no".into(),
        };

        for (status, verdict) in [("approved", "yes"), ("reviewing", "wait"), ("rejected", "no")] {
            let message = parse_status(&json!({ "homework_name": "hw", "status": status }), &table).unwrap();
            assert!(message.ends_with(verdict), "{status} should map to {verdict}");
        }
    }

    #[test]
    fn test_unknown_status() {
        let err = parse_status(&json!({ "homework_name": "proj1", "status": "unknown_status" }), &Verdicts::default()).unwrap_err();

        assert_eq!(err, PollError::UnknownStatus("unknown_status".into()));
    }

    #[test]
    fn test_missing_fields() {
        let err = parse_status(&json!({ "status": "approved" }), &Verdicts::default()).unwrap_err();
        assert_eq!(err, PollError::MissingField("homework_name".into()));

        let err = parse_status(&json!({ "homework_name": "proj1" }), &Verdicts::default()).unwrap_err();
        assert_eq!(err, PollError::MissingField("status".into()));

        let err = parse_status(&json!("proj1"), &Verdicts::default()).unwrap_err();
        assert_eq!(err, PollError::MissingField("homework_name".into()));
    }

    #[test]
    fn test_parse_homework() {
        let record = parse_homework(&json!({ "homework_name": "proj3", "status": "rejected", "reviewer_comment": "fix tests" })).unwrap();

        assert_eq!(record, HomeworkRecord { name: "proj3".into(), status: HomeworkStatus::Rejected });
    }
}
