//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for the services used by the homework-bot:
//! - Homework status services (e.g., the Practicum API)
//! - Notification services (e.g., Telegram)
//! - The clock driving the polling loop
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod clock;
pub mod homework;
pub mod notify;
