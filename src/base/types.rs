use std::str::FromStr;

use serde_json::Value;

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// Errors raised while polling the homework endpoint and forwarding updates.
///
/// Per-cycle errors travel through the crate-wide [`Res`] as `anyhow` values;
/// the driver recovers the kind with [`PollError::classify`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PollError {
    /// One or more required configuration values are absent.
    #[error("missing required configuration: {}", .0.join(", "))]
    ConfigMissing(Vec<String>),
    /// A configuration value is present but unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The endpoint could not be reached, or answered with a non-200 status.
    #[error("endpoint request failed: {0}")]
    Transport(String),
    /// The response body does not have the expected shape.
    #[error("malformed API response: {0}")]
    MalformedResponse(String),
    /// A homework record lacks a required key.
    #[error("homework record is missing the `{0}` key")]
    MissingField(String),
    /// A homework record carries a status outside the known table.
    #[error("undocumented homework status `{0}`")]
    UnknownStatus(String),
    /// The chat message could not be delivered.
    #[error("failed to deliver message: {0}")]
    Delivery(String),
}

impl PollError {
    /// Recover the typed kind from a crate-wide error, if it carries one.
    pub fn classify(err: &Err) -> Option<&PollError> {
        err.downcast_ref::<PollError>()
    }

    /// Whether this error should be reported to the chat.
    ///
    /// Delivery failures are not, since the chat is the thing that just failed.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, PollError::Delivery(_))
    }
}

/// Review status of a homework submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl FromStr for HomeworkStatus {
    type Err = PollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(PollError::UnknownStatus(other.to_string())),
        }
    }
}

/// A single homework entry, parsed fresh from each response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub name: String,
    pub status: HomeworkStatus,
}

/// A validated response body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Homework entries, most recent first.
    pub homeworks: Vec<Value>,
    /// Server time to use as `from_date` on the next poll.
    pub current_date: i64,
}

/// State carried by the driver loop between cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// The `from_date` of the next poll, in unix seconds.
    pub last_timestamp: i64,
    /// The last error text reported to the chat.
    pub last_error: Option<String>,
}

impl PollState {
    pub fn new(last_timestamp: i64) -> Self {
        Self { last_timestamp, last_error: None }
    }
}

/// What a completed polling cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The response carried no homework updates.
    NoUpdates,
    /// A status notification was delivered.
    Notified { message: String },
    /// A status notification was produced but could not be delivered.
    DeliveryFailed { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_str() {
        assert_eq!("approved".parse::<HomeworkStatus>().unwrap(), HomeworkStatus::Approved);
        assert_eq!("reviewing".parse::<HomeworkStatus>().unwrap(), HomeworkStatus::Reviewing);
        assert_eq!("rejected".parse::<HomeworkStatus>().unwrap(), HomeworkStatus::Rejected);

        let err = "Approved".parse::<HomeworkStatus>().unwrap_err();
        assert_eq!(err, PollError::UnknownStatus("Approved".to_string()));
    }

    #[test]
    fn test_classify_recovers_kind() {
        let err: Err = PollError::Transport("timed out".into()).into();

        assert_eq!(PollError::classify(&err), Some(&PollError::Transport("timed out".into())));
        assert!(PollError::classify(&anyhow::anyhow!("plain")).is_none());
    }

    #[test]
    fn test_config_missing_lists_every_key() {
        let err = PollError::ConfigMissing(vec!["PRACTICUM_TOKEN".into(), "TELEGRAM_CHAT_ID".into()]);

        assert_eq!(err.to_string(), "missing required configuration: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID");
        assert!(!PollError::Delivery("x".into()).is_reportable());
        assert!(PollError::UnknownStatus("x".into()).is_reportable());
    }
}
