//! Core logic for flashcarder.
//!
//! This crate holds everything between the storage layer and the
//! presentation layer:
//! - Data model (cards, decks, language categories)
//! - The review queue and the study session state machine
//! - The study engine, which owns sessions and persists them
//! - The deck store, which owns decks and language categories
//! - Configuration loading
//! - The [`App`] container wiring the pieces together

pub mod app;
pub mod browse;
pub mod config;
pub mod deck_store;
pub mod draft;
pub mod engine;
pub mod error;
pub mod flush;
pub mod language;
pub mod model;
pub mod notice;
pub mod queue;
pub mod study;

pub use app::App;
pub use browse::Browser;
pub use config::Config;
pub use deck_store::{CardRemoval, DeckStore};
pub use draft::CardDraft;
pub use engine::{StudyEngine, StudyProgress};
pub use error::{CoreError, CoreResult, DeckError, StudyError, ValidationError};
pub use language::SupportedLanguage;
pub use model::{Card, CardStatus, Deck, LanguageCategory};
pub use notice::{Notice, NoticeKind, Notices};
pub use queue::ReviewQueue;
pub use study::{Round, StudyEvent, StudySession, StudyState, Transition};
