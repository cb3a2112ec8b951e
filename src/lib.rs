//! Library root for `homework-bot`.
//!
//! Homework-bot is a small polling agent that:
//! - Queries the homework review API on a fixed interval
//! - Checks the shape of each response
//! - Sends the verdict for the most recent submission to a Telegram chat
//!
//! Each external dependency (the homework API, the chat, the clock) sits behind
//! a trait, so the polling cycle can be driven with mocks.

pub mod base;
pub mod polling;
pub mod prelude;
pub mod runtime;
pub mod service;

use base::{
    config::{Config, ConfigInner},
    types::{PollError, Res, Void},
};
use service::notify::NotifyClient;
use tracing::{error, info, warn};

/// Public async entry for the binary crate.
///
/// Creates the runtime context with the homework and chat clients, then either
/// runs a single cycle (`once`) or polls until interrupted.
pub async fn start(config: Config, once: bool) -> Void {
    info!("Starting homework-bot ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    if once {
        let outcome = runtime.once().await?;
        info!("Cycle finished: {:?}", outcome);
        return Ok(());
    }

    // Start the runtime.
    runtime.start().await
}

/// Load configuration from the environment and an optional file, refusing to start without credentials.
pub async fn load_config(explicit_path: Option<&std::path::Path>) -> Res<Config> {
    let inner = Config::read(config::Environment::default(), explicit_path)?;

    check_startup_config(inner, |inner| NotifyClient::telegram(&inner.telegram_token, &inner.telegram_chat_id)).await
}

/// Validate startup configuration.
///
/// When only the homework token is missing, the chat is still reachable, so a
/// best-effort message naming the missing value is sent before failing.
pub async fn check_startup_config<F>(inner: ConfigInner, notify: F) -> Res<Config>
where
    F: FnOnce(&ConfigInner) -> NotifyClient,
{
    let missing = inner.missing_credentials();

    if !missing.is_empty() {
        let err = PollError::ConfigMissing(missing);
        error!("{}", err);

        if inner.can_notify() {
            let notify = notify(&inner);
            if let Err(send_err) = notify.send_message(&err.to_string()).await {
                warn!("Failed to report missing configuration: {:#}", send_err);
            }
        }

        return Err(err.into());
    }

    inner.validate()
}
