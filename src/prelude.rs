pub use crate::base::{
    config::Config,
    types::{CycleOutcome, Err, PollError, Res, Void},
};
pub use anyhow::anyhow;
pub use tracing::{debug, error, info, instrument, warn};
