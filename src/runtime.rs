//! Runtime services and shared state for the homework-bot.

use tracing::{info, instrument};

use crate::{
    base::{
        config::Config,
        types::{CycleOutcome, PollError, Res, Void},
    },
    polling::cycle::Poller,
    service::{clock::Clock, homework::HomeworkClient, notify::NotifyClient},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the homework client, notification client, clock, and configuration.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The homework status client instance.
    pub homework: HomeworkClient,
    /// The notification client instance.
    pub notify: NotifyClient,
    /// The clock driving the polling loop.
    pub clock: Clock,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        // Initialize the homework client.
        let homework = HomeworkClient::practicum(&config)?;

        // Initialize the telegram client.
        let notify = NotifyClient::telegram(&config.telegram_token, &config.telegram_chat_id);

        Ok(Self {
            config,
            homework,
            notify,
            clock: Clock::system(),
        })
    }

    /// Build a poller over this runtime's services, starting from the current time.
    pub fn poller(&self) -> Poller {
        Poller::new(self.config.clone(), self.homework.clone(), self.notify.clone(), self.clock.clone())
    }

    /// Poll until interrupted.
    pub async fn start(&self) -> Void {
        let mut poller = self.poller();

        info!("Polling {} every {:?} ...", self.config.endpoint, self.config.retry_interval());

        tokio::select! {
            result = poller.run() => result,
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("Received Ctrl-C, shutting down.");
                Ok(())
            }
        }
    }

    /// Run a single polling cycle.
    ///
    /// With no later cycle to redeliver it, an undelivered status update is an error here.
    pub async fn once(&self) -> Res<CycleOutcome> {
        match self.poller().cycle().await? {
            CycleOutcome::DeliveryFailed { message } => Err(PollError::Delivery(format!("status update was not delivered: {message}")).into()),
            outcome => Ok(outcome),
        }
    }
}
