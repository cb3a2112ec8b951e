//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc, time::Duration};

use serde::Deserialize;

use crate::base::verdicts;

use super::types::{PollError, Res};

/// Default homework status endpoint.
fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

/// Default polling interval, in seconds.
fn default_retry_interval_secs() -> u64 {
    600
}

/// Per-cycle errors are reported to the chat unless disabled.
fn default_report_errors() -> bool {
    true
}

fn default_verdict_approved() -> String {
    verdicts::APPROVED.to_string()
}

fn default_verdict_reviewing() -> String {
    verdicts::REVIEWING.to_string()
}

fn default_verdict_rejected() -> String {
    verdicts::REJECTED.to_string()
}

/// Configuration for the homework-bot application.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// Homework API token (`PRACTICUM_TOKEN`).
    #[serde(default)]
    pub practicum_token: String,
    /// Telegram bot token (`TELEGRAM_TOKEN`).
    #[serde(default)]
    pub telegram_token: String,
    /// Telegram chat to notify (`TELEGRAM_CHAT_ID`), either a numeric id or an `@channel` name.
    #[serde(default)]
    pub telegram_chat_id: String,
    /// Homework status endpoint (`ENDPOINT`).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Seconds to wait between polling cycles (`RETRY_INTERVAL_SECS`).
    #[serde(default = "default_retry_interval_secs")]
    pub retry_interval_secs: u64,
    /// Whether failed cycles are reported to the chat (`REPORT_ERRORS`).
    #[serde(default = "default_report_errors")]
    pub report_errors: bool,
    /// Verdict text for approved work (`VERDICT_APPROVED`).
    #[serde(default = "default_verdict_approved")]
    pub verdict_approved: String,
    /// Verdict text for work under review (`VERDICT_REVIEWING`).
    #[serde(default = "default_verdict_reviewing")]
    pub verdict_reviewing: String,
    /// Verdict text for work returned with comments (`VERDICT_REJECTED`).
    #[serde(default = "default_verdict_rejected")]
    pub verdict_rejected: String,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            practicum_token: String::new(),
            telegram_token: String::new(),
            telegram_chat_id: String::new(),
            endpoint: default_endpoint(),
            retry_interval_secs: default_retry_interval_secs(),
            report_errors: default_report_errors(),
            verdict_approved: default_verdict_approved(),
            verdict_reviewing: default_verdict_reviewing(),
            verdict_rejected: default_verdict_rejected(),
        }
    }
}

impl ConfigInner {
    /// Environment names of the required values that are absent or empty.
    pub fn missing_credentials(&self) -> Vec<String> {
        [
            ("PRACTICUM_TOKEN", &self.practicum_token),
            ("TELEGRAM_TOKEN", &self.telegram_token),
            ("TELEGRAM_CHAT_ID", &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name.to_string())
        .collect()
    }

    /// Whether a chat message can still be sent although the upstream token is missing.
    pub fn can_notify(&self) -> bool {
        !self.telegram_token.trim().is_empty() && !self.telegram_chat_id.trim().is_empty()
    }

    /// Check required values and limits, producing a usable [`Config`].
    pub fn validate(self) -> Res<Config> {
        let missing = self.missing_credentials();
        if !missing.is_empty() {
            return Err(PollError::ConfigMissing(missing).into());
        }

        if self.retry_interval_secs < 1 {
            return Err(PollError::InvalidConfig("retry interval must be at least one second.".into()).into());
        }

        if reqwest::Url::parse(&self.endpoint).is_err() {
            return Err(PollError::InvalidConfig(format!("endpoint `{}` is not a valid URL.", self.endpoint)).into());
        }

        Ok(Config { inner: Arc::new(self) })
    }

    /// The interval between polling cycles.
    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_secs)
    }
}

impl Config {
    /// Read configuration without validating it.
    ///
    /// Environment values override the file. Callers validate through
    /// `homework_bot::check_startup_config`, which also reports missing credentials.
    pub fn read(env: config::Environment, explicit_path: Option<&std::path::Path>) -> Res<ConfigInner> {
        let mut cfg = config::Config::builder();

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        cfg = cfg.add_source(env);

        Ok(cfg.build()?.try_deserialize()?)
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> config::Environment {
        let mut map = config::Map::new();
        for (key, value) in pairs {
            map.insert(key.to_string(), value.to_string());
        }

        config::Environment::default().source(Some(map))
    }

    fn full_env() -> Vec<(&'static str, &'static str)> {
        vec![("PRACTICUM_TOKEN", "practicum"), ("TELEGRAM_TOKEN", "telegram"), ("TELEGRAM_CHAT_ID", "12345")]
    }

    #[test]
    fn test_load_with_all_credentials() {
        let config = Config::read(env(&full_env()), None).unwrap().validate().unwrap();

        assert_eq!(config.practicum_token, "practicum");
        assert_eq!(config.telegram_token, "telegram");
        assert_eq!(config.telegram_chat_id, "12345");
        assert_eq!(config.endpoint, default_endpoint());
        assert_eq!(config.retry_interval(), Duration::from_secs(600));
        assert!(config.report_errors);
        assert_eq!(config.verdict_approved, verdicts::APPROVED);
    }

    #[test]
    fn test_each_missing_credential_is_fatal() {
        for skipped in ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"] {
            let pairs: Vec<_> = full_env().into_iter().filter(|(k, _)| *k != skipped).collect();

            let err = Config::read(env(&pairs), None).unwrap().validate().unwrap_err();

            assert_eq!(PollError::classify(&err), Some(&PollError::ConfigMissing(vec![skipped.to_string()])));
        }
    }

    #[test]
    fn test_all_missing_credentials_reported_together() {
        let inner = Config::read(env(&[("TELEGRAM_TOKEN", "  ")]), None).unwrap();

        assert_eq!(inner.missing_credentials(), vec!["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"]);
        assert!(!inner.can_notify());
    }

    #[test]
    fn test_can_notify_without_upstream_token() {
        let inner = Config::read(env(&[("TELEGRAM_TOKEN", "telegram"), ("TELEGRAM_CHAT_ID", "1")]), None).unwrap();

        assert_eq!(inner.missing_credentials(), vec!["PRACTICUM_TOKEN"]);
        assert!(inner.can_notify());
    }

    #[test]
    fn test_overrides_and_limits() {
        let mut pairs = full_env();
        pairs.push(("RETRY_INTERVAL_SECS", "30"));
        pairs.push(("REPORT_ERRORS", "false"));
        pairs.push(("VERDICT_APPROVED", "Nice."));

        let config = Config::read(env(&pairs), None).unwrap().validate().unwrap();

        assert_eq!(config.retry_interval(), Duration::from_secs(30));
        assert!(!config.report_errors);
        assert_eq!(config.verdict_approved, "Nice.");

        let mut pairs = full_env();
        pairs.push(("RETRY_INTERVAL_SECS", "0"));

        let err = Config::read(env(&pairs), None).unwrap().validate().unwrap_err();
        assert!(matches!(PollError::classify(&err), Some(PollError::InvalidConfig(_))));
    }

    #[test]
    fn test_default_matches_serde_defaults() {
        let defaults = ConfigInner::default();
        let read = Config::read(env(&[]), None).unwrap();

        assert_eq!(defaults.endpoint, read.endpoint);
        assert_eq!(defaults.retry_interval_secs, read.retry_interval_secs);
        assert_eq!(defaults.report_errors, read.report_errors);
        assert_eq!(defaults.verdict_approved, read.verdict_approved);
        assert_eq!(defaults.verdict_reviewing, read.verdict_reviewing);
        assert_eq!(defaults.verdict_rejected, read.verdict_rejected);
        assert_eq!(defaults.retry_interval(), Duration::from_secs(600));
        assert!(defaults.report_errors);
    }

    #[test]
    fn test_defaults_with_credentials_validate() {
        let config = ConfigInner {
            practicum_token: "practicum".into(),
            telegram_token: "telegram".into(),
            telegram_chat_id: "1".into(),
            ..Default::default()
        }
        .validate()
        .unwrap();

        assert_eq!(config.endpoint, default_endpoint());
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let mut pairs = full_env();
        pairs.push(("ENDPOINT", "not a url"));

        let err = Config::read(env(&pairs), None).unwrap().validate().unwrap_err();
        assert!(matches!(PollError::classify(&err), Some(PollError::InvalidConfig(_))));
    }
}
