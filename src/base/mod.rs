//! Core components, types, and utilities for the homework-bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Verdict texts and message templates.
//! - Common types, error kinds, and result handling.

pub mod config;
pub mod types;
pub mod verdicts;
