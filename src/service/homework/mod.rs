pub mod practicum;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;

use crate::base::types::Res;

// Traits.

/// Generic homework status client trait that clients must implement.
///
/// Implementations return the parsed JSON body of a successful response as-is;
/// checking its shape is left to the caller.
#[async_trait]
pub trait GenericHomeworkClient: Send + Sync + 'static {
    /// Fetch homework statuses updated since `from_date` (unix seconds).
    ///
    /// Fails with a transport error when the endpoint is unreachable or
    /// answers with anything other than `200 OK`.
    async fn get_homework_statuses(&self, from_date: i64) -> Res<Value>;
}

// Structs.

/// Homework status client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct HomeworkClient {
    inner: Arc<dyn GenericHomeworkClient>,
}

impl Deref for HomeworkClient {
    type Target = dyn GenericHomeworkClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl HomeworkClient {
    pub fn new(inner: Arc<dyn GenericHomeworkClient>) -> Self {
        Self { inner }
    }
}
