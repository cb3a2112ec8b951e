use crate::{
    base::{types::PollState, verdicts},
    polling::{
        response::check_response,
        status::{Verdicts, parse_status},
    },
    prelude::*,
    service::{clock::Clock, homework::HomeworkClient, notify::NotifyClient},
};

/// Smallest and largest unix times the endpoint accepts as `from_date`.
const VALID_TIMESTAMPS: std::ops::RangeInclusive<i64> = 1_000_000_000..=9_999_999_999;

/// Drives the fetch, validate, notify, sleep cycle.
///
/// Owns the [`PollState`]; nothing else reads or writes it.
pub struct Poller {
    config: Config,
    homework: HomeworkClient,
    notify: NotifyClient,
    clock: Clock,
    verdicts: Verdicts,
    state: PollState,
}

impl Poller {
    /// Create a poller whose first `from_date` is the clock's current time.
    pub fn new(config: Config, homework: HomeworkClient, notify: NotifyClient, clock: Clock) -> Self {
        let verdicts = Verdicts::from_config(&config);
        let state = PollState::new(clock.now());

        Self {
            config,
            homework,
            notify,
            clock,
            verdicts,
            state,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Poll forever, sleeping for the configured interval after every cycle.
    pub async fn run(&mut self) -> Void {
        loop {
            let _ = self.cycle().await;
            self.clock.sleep(self.config.retry_interval()).await;
        }
    }

    /// Run a fixed number of cycles, each followed by the interval sleep.
    pub async fn run_for(&mut self, cycles: usize) {
        for _ in 0..cycles {
            let _ = self.cycle().await;
            self.clock.sleep(self.config.retry_interval()).await;
        }
    }

    /// Run one cycle, logging and reporting any failure.
    ///
    /// The error is handed back for callers that care (e.g., `--once`); the
    /// loop itself ignores it.
    #[instrument(skip(self), fields(from_date = self.state.last_timestamp))]
    pub async fn cycle(&mut self) -> Res<CycleOutcome> {
        let result = self.poll().await;

        match &result {
            Ok(outcome) => {
                debug!("Cycle finished: {:?}", outcome);
                if !matches!(outcome, CycleOutcome::DeliveryFailed { .. }) {
                    self.state.last_error = None;
                }
            }
            Err(err) => self.report_failure(err).await,
        }

        result
    }

    /// Fetch, validate, and notify, advancing the timestamp on success.
    async fn poll(&mut self) -> Res<CycleOutcome> {
        let from_date = sanitize_timestamp(self.state.last_timestamp, self.clock.now());

        let body = self.homework.get_homework_statuses(from_date).await?;
        debug!("Endpoint returned {}", body);

        let response = check_response(&body)?;

        let outcome = match response.homeworks.first() {
            None => {
                debug!("No new homework statuses.");
                CycleOutcome::NoUpdates
            }
            Some(homework) => {
                let message = parse_status(homework, &self.verdicts)?;
                info!("Sending status update: {}", message);

                if let Err(err) = self.notify.send_message(&message).await {
                    error!("Failed to deliver status update: {:#}", err);
                    return Ok(CycleOutcome::DeliveryFailed { message });
                }

                CycleOutcome::Notified { message }
            }
        };

        self.state.last_timestamp = response.current_date;

        Ok(outcome)
    }

    /// Log a failed cycle and, if enabled, report it to the chat once.
    async fn report_failure(&mut self, err: &Err) {
        error!("Polling cycle failed: {:#}", err);

        if !self.config.report_errors {
            return;
        }

        if let Some(kind) = PollError::classify(err)
            && !kind.is_reportable()
        {
            return;
        }

        let message = verdicts::cycle_failure(&err.to_string());

        if self.state.last_error.as_deref() == Some(message.as_str()) {
            debug!("Skipping report of a repeated error.");
            return;
        }

        match self.notify.send_message(&message).await {
            Ok(()) => self.state.last_error = Some(message),
            Err(send_err) => warn!("Failed to report error to chat: {:#}", send_err),
        }
    }
}

/// Use `timestamp` if it looks like a unix time in seconds, otherwise `now`.
fn sanitize_timestamp(timestamp: i64, now: i64) -> i64 {
    if VALID_TIMESTAMPS.contains(&timestamp) {
        timestamp
    } else {
        warn!("Timestamp {} is not a valid unix time, polling from {} instead.", timestamp, now);
        now
    }
}

// Tests.
