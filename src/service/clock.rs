//! Time source for the polling loop.
//!
//! The driver never reads the wall clock or sleeps directly; it goes through
//! [`Clock`] so cycle timing can be driven by tests without real waiting.

use std::{ops::Deref, sync::Arc, time::Duration};

use async_trait::async_trait;

// Traits.

/// Generic clock trait.
#[async_trait]
pub trait GenericClock: Send + Sync + 'static {
    /// Current time, in unix seconds.
    fn now(&self) -> i64;

    /// Suspend for the given duration.
    async fn sleep(&self, duration: Duration);
}

// Structs.

/// Clock for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Clock {
    inner: Arc<dyn GenericClock>,
}

impl Deref for Clock {
    type Target = dyn GenericClock;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl Clock {
    pub fn new(inner: Arc<dyn GenericClock>) -> Self {
        Self { inner }
    }

    /// Creates a clock backed by the system time and the tokio timer.
    pub fn system() -> Self {
        Self { inner: Arc::new(SystemClock) }
    }
}

/// Wall-clock implementation.
struct SystemClock;

#[async_trait]
impl GenericClock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

// Tests.
