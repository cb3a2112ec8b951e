pub mod telegram;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::Void;

// Traits.

/// Generic "notify" trait that messaging clients must implement.
///
/// The destination chat is part of the client's configuration, so callers
/// only supply the text.
#[async_trait]
pub trait GenericNotifyClient: Send + Sync + 'static {
    /// Send a text message to the configured chat.
    ///
    /// Fails with a delivery error on any network or API failure.
    async fn send_message(&self, text: &str) -> Void;
}

// Structs.

/// Notification client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct NotifyClient {
    inner: Arc<dyn GenericNotifyClient>,
}

impl Deref for NotifyClient {
    type Target = dyn GenericNotifyClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl NotifyClient {
    pub fn new(inner: Arc<dyn GenericNotifyClient>) -> Self {
        Self { inner }
    }
}
