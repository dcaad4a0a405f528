//! Translation lookups for flashcarder.
//!
//! The add-card flow can fill in a missing card side by translating the
//! side the user did enter. Lookups go to a MyMemory-compatible HTTP API
//! behind the [`TranslationClient`] trait.

pub mod autofill;
pub mod client;
pub mod error;

pub use autofill::fill_missing_side;
pub use client::{MyMemoryClient, TranslateRequest, TranslationClient, ENGLISH};
pub use error::TranslateError;
