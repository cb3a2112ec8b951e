//! The polling cycle for homework-bot.
//!
//! This module provides the pieces of one fetch, validate, notify, sleep iteration:
//! - Checking the shape of the endpoint response
//! - Turning the most recent homework entry into a notification
//! - Driving the cycle and carrying the timestamp between iterations

pub mod cycle;
pub mod response;
pub mod status;
