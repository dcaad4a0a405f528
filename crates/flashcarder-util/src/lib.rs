//! Shared utilities for flashcarder.
//!
//! This crate provides common utilities used across the flashcarder workspace:
//! - ULID-based identifier generation for decks and cards
//! - Logging setup with tracing
//! - Platform data, config and log directories

pub mod id;
pub mod log;
pub mod path;

pub use id::{IdPrefix, Identifier};
pub use log::{LogConfig, LogLevel};
