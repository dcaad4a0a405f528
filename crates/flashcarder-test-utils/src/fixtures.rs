//! Test fixtures: pre-seeded storage and temporary data directories.

use flashcarder_core::model::{Deck, LanguageCategory};
use flashcarder_core::study::StudySession;
use flashcarder_storage::json::JsonStorage;
use flashcarder_storage::memory::MemoryStorage;
use flashcarder_storage::{keys, Storage};
use std::collections::BTreeMap;
use std::sync::Arc;
use tempfile::TempDir;

/// In-memory storage seeded with decks, languages and sessions.
///
/// Languages default to one category per distinct deck language.
///
/// # Example
///
/// ```rust,ignore
/// let storage = SeededStorage::new()
///     .with_decks(vec![DeckBuilder::new("d1").cards(["A"]).build()])
///     .build()
///     .await;
/// ```
#[derive(Default)]
pub struct SeededStorage {
    decks: Vec<Deck>,
    languages: Option<Vec<LanguageCategory>>,
    sessions: BTreeMap<String, StudySession>,
}

impl SeededStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decks(mut self, decks: Vec<Deck>) -> Self {
        self.decks = decks;
        self
    }

    pub fn with_languages(mut self, languages: Vec<LanguageCategory>) -> Self {
        self.languages = Some(languages);
        self
    }

    pub fn with_session(mut self, session: StudySession) -> Self {
        self.sessions.insert(session.deck_id().to_string(), session);
        self
    }

    pub async fn build(self) -> Arc<MemoryStorage> {
        let languages = self.languages.unwrap_or_else(|| {
            let mut languages: Vec<LanguageCategory> = Vec::new();
            for deck in &self.decks {
                if !languages.iter().any(|l| l.code == deck.language) {
                    languages.push(LanguageCategory::new(
                        deck.language.clone(),
                        deck.display_name.clone(),
                    ));
                }
            }
            languages
        });

        let storage = MemoryStorage::new();
        storage
            .write(keys::DECKS, &self.decks)
            .await
            .expect("Failed to seed decks");
        storage
            .write(keys::LANGUAGES, &languages)
            .await
            .expect("Failed to seed languages");
        if !self.sessions.is_empty() {
            storage
                .write(keys::STUDY_SESSIONS, &self.sessions)
                .await
                .expect("Failed to seed sessions");
        }
        Arc::new(storage)
    }
}

/// A temporary data directory backed by [`JsonStorage`].
///
/// The directory is removed when this value is dropped.
pub struct TempDataDir {
    temp_dir: TempDir,
}

impl TempDataDir {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.temp_dir.path()
    }

    /// A fresh storage handle over the directory, as a restarted process
    /// would open it.
    pub fn storage(&self) -> Arc<JsonStorage> {
        Arc::new(JsonStorage::new(self.temp_dir.path()))
    }
}

impl Default for TempDataDir {
    fn default() -> Self {
        Self::new()
    }
}
