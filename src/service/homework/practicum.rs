//! Practicum homework status API integration.
//!
//! Issues a single authenticated `GET` per poll and hands back the JSON body.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{StatusCode, header::AUTHORIZATION};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::base::{
    config::Config,
    types::{PollError, Res},
};

use super::{GenericHomeworkClient, HomeworkClient};

/// Keys that mark a server-side fault in a non-200 body.
const SERVER_FAULT_KEYS: [&str; 2] = ["error", "code"];

// Extra methods on `HomeworkClient` applied by the practicum implementation.

impl HomeworkClient {
    /// Creates a new Practicum homework client.
    pub fn practicum(config: &Config) -> Res<Self> {
        let client = PracticumHomeworkClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Structs.

/// Practicum client implementation.
#[derive(Clone)]
struct PracticumHomeworkClient {
    client: reqwest::Client,
    endpoint: String,
    authorization: String,
}

impl PracticumHomeworkClient {
    /// Create a new Practicum client.
    #[instrument(name = "PracticumHomeworkClient::new", skip_all)]
    fn new(config: &Config) -> Res<Self> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            authorization: format!("OAuth {}", config.practicum_token),
        })
    }
}

#[async_trait]
impl GenericHomeworkClient for PracticumHomeworkClient {
    #[instrument(skip(self))]
    async fn get_homework_statuses(&self, from_date: i64) -> Res<Value> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, &self.authorization)
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| PollError::Transport(format!("endpoint `{}` is unreachable: {}", self.endpoint, e)))?;

        let status = response.status();
        debug!("Endpoint answered with {}", status);

        if status != StatusCode::OK {
            let body = response.json::<Value>().await.ok();
            return Err(PollError::Transport(describe_failure(&self.endpoint, status, body.as_ref())).into());
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| PollError::MalformedResponse(format!("body is not valid JSON: {e}")))?;

        Ok(body)
    }
}

// Helpers.

/// Describe a non-200 answer, preferring the server's own fault description.
fn describe_failure(endpoint: &str, status: StatusCode, body: Option<&Value>) -> String {
    let faults: Vec<String> = body
        .and_then(Value::as_object)
        .map(|object| {
            SERVER_FAULT_KEYS
                .iter()
                .filter_map(|key| object.get(*key).map(|value| format!("{key}: {}", render(value))))
                .collect()
        })
        .unwrap_or_default();

    if faults.is_empty() {
        format!("endpoint `{endpoint}` is unavailable (status {status})")
    } else {
        format!("server fault ({}) (status {status})", faults.join(", "))
    }
}

/// Render a JSON value without quoting plain strings.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// Tests.
