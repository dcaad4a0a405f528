//! The deck store: canonical decks and language categories.
//!
//! Every mutation builds a complete new list and hands it to
//! [`DeckStore::replace_all`] (or [`DeckStore::replace_languages`]), so
//! readers only ever see a whole list, old or new.

use crate::draft::CardDraft;
use crate::error::{CoreError, CoreResult, DeckError, ValidationError};
use crate::flush::Flusher;
use crate::language::{self, StoredLanguage};
use crate::model::{Card, Deck, LanguageCategory};
use crate::notice::Notices;
use flashcarder_storage::{keys, Storage};
use flashcarder_util::Identifier;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of deleting a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRemoval {
    pub card: Card,
    /// The deck has no cards left; the caller should leave its screen.
    pub deck_now_empty: bool,
}

/// Owns decks and language categories.
pub struct DeckStore {
    decks: Vec<Deck>,
    languages: Vec<LanguageCategory>,
    deck_flusher: Flusher<Vec<Deck>>,
    language_flusher: Flusher<Vec<LanguageCategory>>,
    decks_loaded: bool,
}

impl DeckStore {
    /// Load decks and languages, migrating older data formats.
    pub async fn open<S>(storage: Arc<S>, notices: Notices) -> Self
    where
        S: Storage + 'static,
    {
        let (stored_decks, decks_loaded) = match storage.read::<Vec<Deck>>(keys::DECKS).await {
            Ok(decks) => (decks.unwrap_or_default(), true),
            Err(e) => {
                warn!(error = %e, "Could not read decks, starting with none");
                (Vec::new(), false)
            }
        };
        let stored_languages: Vec<StoredLanguage> =
            storage.get_or(keys::LANGUAGES, Vec::new()).await;

        let mut decks = stored_decks.clone();
        let mut decks_changed = assign_missing_ids(&mut decks);
        decks_changed |= language::fill_display_names(&mut decks);

        let (mut languages, mut languages_changed) = language::migrate_languages(stored_languages);
        languages_changed |= language::merge_deck_languages(&mut languages, &decks);

        debug!(
            decks = decks.len(),
            languages = languages.len(),
            "Loaded deck store"
        );

        let deck_flusher =
            Flusher::spawn(storage.clone(), keys::DECKS, Some(stored_decks), notices.clone());
        let language_flusher = Flusher::spawn(
            storage,
            keys::LANGUAGES,
            (!languages_changed).then(|| languages.clone()),
            notices,
        );

        let store = Self {
            decks,
            languages,
            deck_flusher,
            language_flusher,
            decks_loaded,
        };
        if decks_changed {
            info!("Migrated stored decks");
            store.deck_flusher.schedule(store.decks.clone());
        }
        if languages_changed {
            info!("Migrated stored languages");
            store.language_flusher.schedule(store.languages.clone());
        }
        store
    }

    /// Whether the stored deck list was read. After a failed read the
    /// store starts empty and this is `false`.
    pub fn decks_loaded(&self) -> bool {
        self.decks_loaded
    }

    pub fn get_all(&self) -> &[Deck] {
        &self.decks
    }

    pub fn find_by_id(&self, deck_id: &str) -> Option<&Deck> {
        self.decks.iter().find(|d| d.id == deck_id)
    }

    /// Like [`find_by_id`](Self::find_by_id), with a lookup error.
    pub fn deck(&self, deck_id: &str) -> CoreResult<&Deck> {
        Ok(self.find_by_id(deck_id).ok_or_else(|| DeckError::NotFound {
            id: deck_id.to_string(),
        })?)
    }

    pub fn languages(&self) -> &[LanguageCategory] {
        &self.languages
    }

    pub fn language(&self, code: &str) -> Option<&LanguageCategory> {
        self.languages.iter().find(|l| l.code == code)
    }

    /// Replace every deck and persist.
    pub fn replace_all(&mut self, decks: Vec<Deck>) {
        self.decks = decks;
        self.deck_flusher.schedule(self.decks.clone());
    }

    /// Replace every language category and persist.
    pub fn replace_languages(&mut self, languages: Vec<LanguageCategory>) {
        self.languages = languages;
        self.language_flusher.schedule(self.languages.clone());
    }

    /// Create an empty deck under a language category.
    pub fn add_deck(&mut self, title: &str, language_code: &str) -> CoreResult<Deck> {
        let title = required(title, "title")?;
        let category = self
            .language(language_code)
            .ok_or_else(|| DeckError::LanguageNotFound {
                code: language_code.to_string(),
            })?;

        let deck = Deck {
            id: Identifier::deck(),
            title,
            language: category.code.clone(),
            display_name: category.display_name.clone(),
            cards: Vec::new(),
        };
        info!(deck_id = %deck.id, title = %deck.title, "Adding deck");

        let mut decks = self.decks.clone();
        decks.push(deck.clone());
        self.replace_all(decks);
        Ok(deck)
    }

    pub fn rename_deck(&mut self, deck_id: &str, title: &str) -> CoreResult<()> {
        let title = required(title, "title")?;
        self.update_deck(deck_id, |deck| {
            deck.title = title;
            Ok(())
        })
    }

    /// Remove a deck and all its cards.
    pub fn delete_deck(&mut self, deck_id: &str) -> CoreResult<Deck> {
        let index = self.index_of(deck_id)?;
        let mut decks = self.decks.clone();
        let removed = decks.remove(index);
        info!(deck_id, cards = removed.cards.len(), "Deleting deck");
        self.replace_all(decks);
        Ok(removed)
    }

    /// Append a card built from `draft`.
    pub fn add_card(&mut self, deck_id: &str, draft: CardDraft) -> CoreResult<Card> {
        let card = draft.into_card(Identifier::card())?;
        self.update_deck(deck_id, |deck| {
            deck.cards.push(card.clone());
            Ok(())
        })?;
        debug!(deck_id, card_id = %card.id, "Added card");
        Ok(card)
    }

    /// Overwrite a card's content, keeping its id and position.
    pub fn edit_card(&mut self, deck_id: &str, card_id: &str, draft: CardDraft) -> CoreResult<Card> {
        let card = draft.into_card(card_id)?;
        self.update_deck(deck_id, |deck| {
            let slot = deck
                .cards
                .iter_mut()
                .find(|c| c.id == card_id)
                .ok_or_else(|| card_not_found(deck_id, card_id))?;
            *slot = card.clone();
            Ok(())
        })?;
        debug!(deck_id, card_id, "Edited card");
        Ok(card)
    }

    pub fn delete_card(&mut self, deck_id: &str, card_id: &str) -> CoreResult<CardRemoval> {
        let mut removal = None;
        self.update_deck(deck_id, |deck| {
            let index = deck
                .cards
                .iter()
                .position(|c| c.id == card_id)
                .ok_or_else(|| card_not_found(deck_id, card_id))?;
            let card = deck.cards.remove(index);
            removal = Some(CardRemoval {
                card,
                deck_now_empty: deck.cards.is_empty(),
            });
            Ok(())
        })?;
        debug!(deck_id, card_id, "Deleted card");
        removal.ok_or_else(|| card_not_found(deck_id, card_id))
    }

    /// Add a language category.
    pub fn add_language(&mut self, code: &str, display_name: &str) -> CoreResult<LanguageCategory> {
        let code = required(code, "language code")?;
        let display_name = required(display_name, "display name")?;
        if let Some(existing) = self.language(&code) {
            return Err(DeckError::LanguageExists {
                code,
                display_name: existing.display_name.clone(),
            }
            .into());
        }

        let category = LanguageCategory::new(code, display_name);
        info!(code = %category.code, "Adding language");
        let mut languages = self.languages.clone();
        languages.push(category.clone());
        self.replace_languages(languages);
        Ok(category)
    }

    /// Change a category's code and display name. Decks under the old
    /// code follow.
    pub fn edit_language(
        &mut self,
        code: &str,
        new_code: &str,
        display_name: &str,
    ) -> CoreResult<LanguageCategory> {
        let new_code = required(new_code, "language code")?;
        let display_name = required(display_name, "display name")?;
        let index = self
            .languages
            .iter()
            .position(|l| l.code == code)
            .ok_or_else(|| DeckError::LanguageNotFound {
                code: code.to_string(),
            })?;
        if new_code != code {
            if let Some(existing) = self.language(&new_code) {
                return Err(DeckError::LanguageExists {
                    code: new_code,
                    display_name: existing.display_name.clone(),
                }
                .into());
            }
        }

        let category = LanguageCategory::new(new_code, display_name);
        info!(from = code, to = %category.code, "Editing language");

        let mut languages = self.languages.clone();
        languages[index] = category.clone();
        let decks = self
            .decks
            .iter()
            .cloned()
            .map(|mut deck| {
                if deck.language == code {
                    deck.language = category.code.clone();
                    deck.display_name = category.display_name.clone();
                }
                deck
            })
            .collect();

        self.replace_languages(languages);
        self.replace_all(decks);
        Ok(category)
    }

    /// Delete a category and every deck under it. Returns the removed
    /// deck ids.
    pub fn delete_language(&mut self, code: &str) -> CoreResult<Vec<String>> {
        if self.language(code).is_none() {
            return Err(DeckError::LanguageNotFound {
                code: code.to_string(),
            }
            .into());
        }

        let (removed, kept): (Vec<Deck>, Vec<Deck>) =
            self.decks.iter().cloned().partition(|d| d.language == code);
        let languages = self
            .languages
            .iter()
            .filter(|l| l.code != code)
            .cloned()
            .collect();
        info!(code, decks = removed.len(), "Deleting language");

        self.replace_languages(languages);
        self.replace_all(kept);
        Ok(removed.into_iter().map(|d| d.id).collect())
    }

    /// Every category with the number of decks under it.
    pub fn deck_counts(&self) -> Vec<(&LanguageCategory, usize)> {
        self.languages
            .iter()
            .map(|l| (l, language::deck_count(&self.decks, &l.code)))
            .collect()
    }

    pub fn decks_for_language(&self, code: &str) -> Vec<&Deck> {
        self.decks.iter().filter(|d| d.language == code).collect()
    }

    /// Wait for pending deck and language writes.
    pub async fn flush(&self) {
        self.deck_flusher.flush().await;
        self.language_flusher.flush().await;
    }

    fn index_of(&self, deck_id: &str) -> CoreResult<usize> {
        Ok(self
            .decks
            .iter()
            .position(|d| d.id == deck_id)
            .ok_or_else(|| DeckError::NotFound {
                id: deck_id.to_string(),
            })?)
    }

    /// Apply `f` to a copy of one deck, then replace the whole list.
    fn update_deck<F>(&mut self, deck_id: &str, f: F) -> CoreResult<()>
    where
        F: FnOnce(&mut Deck) -> CoreResult<()>,
    {
        let index = self.index_of(deck_id)?;
        let mut decks = self.decks.clone();
        f(&mut decks[index])?;
        self.replace_all(decks);
        Ok(())
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(value.to_string())
}

fn card_not_found(deck_id: &str, card_id: &str) -> CoreError {
    DeckError::CardNotFound {
        deck_id: deck_id.to_string(),
        card_id: card_id.to_string(),
    }
    .into()
}

/// Give legacy decks an id. Returns whether any deck changed.
fn assign_missing_ids(decks: &mut [Deck]) -> bool {
    let mut changed = false;
    for deck in decks.iter_mut().filter(|d| d.id.is_empty()) {
        deck.id = Identifier::deck();
        changed = true;
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashcarder_storage::memory::MemoryStorage;
    use serde_json::json;

    async fn open() -> (Arc<MemoryStorage>, DeckStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = DeckStore::open(storage.clone(), Notices::new()).await;
        (storage, store)
    }

    async fn stored_decks(storage: &MemoryStorage) -> Vec<Deck> {
        storage.read(keys::DECKS).await.unwrap().unwrap_or_default()
    }

    #[tokio::test]
    async fn add_deck_requires_language() {
        let (_, mut store) = open().await;
        let err = store.add_deck("Animals", "de-DE").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Deck(DeckError::LanguageNotFound { .. })
        ));

        store.add_language("de-DE", "German").unwrap();
        let deck = store.add_deck("  Animals ", "de-DE").unwrap();
        assert_eq!(deck.title, "Animals");
        assert_eq!(deck.display_name, "German");
        assert!(deck.id.starts_with("dck_"));
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let (_, mut store) = open().await;
        store.add_language("de-DE", "German").unwrap();
        assert!(matches!(
            store.add_deck("   ", "de-DE"),
            Err(CoreError::Validation(ValidationError::EmptyField { field: "title" }))
        ));
        assert!(store.get_all().is_empty());
    }

    #[tokio::test]
    async fn card_lifecycle_is_persisted() {
        let (storage, mut store) = open().await;
        store.add_language("de-DE", "German").unwrap();
        let deck = store.add_deck("Animals", "de-DE").unwrap();

        let card = store
            .add_card(&deck.id, CardDraft::new("Hund", "dog"))
            .unwrap();
        let edited = store
            .edit_card(&deck.id, &card.id, CardDraft::new("Katze", "cat"))
            .unwrap();
        assert_eq!(edited.id, card.id);
        store.flush().await;

        let decks = stored_decks(&storage).await;
        assert_eq!(decks[0].cards, vec![edited]);

        let removal = store.delete_card(&deck.id, &card.id).unwrap();
        assert!(removal.deck_now_empty);
        assert!(store.find_by_id(&deck.id).unwrap().cards.is_empty());
    }

    #[tokio::test]
    async fn invalid_card_leaves_deck_untouched() {
        let (_, mut store) = open().await;
        store.add_language("de-DE", "German").unwrap();
        let deck = store.add_deck("Animals", "de-DE").unwrap();
        assert!(store.add_card(&deck.id, CardDraft::new("Hund", " ")).is_err());
        assert!(store.find_by_id(&deck.id).unwrap().cards.is_empty());
    }

    #[tokio::test]
    async fn missing_card_is_reported() {
        let (_, mut store) = open().await;
        store.add_language("de-DE", "German").unwrap();
        let deck = store.add_deck("Animals", "de-DE").unwrap();
        assert!(matches!(
            store.delete_card(&deck.id, "nope"),
            Err(CoreError::Deck(DeckError::CardNotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn edit_language_moves_decks() {
        let (_, mut store) = open().await;
        store.add_language("de-DE", "German").unwrap();
        store.add_language("fr-FR", "French").unwrap();
        let deck = store.add_deck("Animals", "de-DE").unwrap();

        assert!(store.edit_language("de-DE", "fr-FR", "Mixed").is_err());
        store.edit_language("de-DE", "it-IT", "Italian words").unwrap();

        let moved = store.find_by_id(&deck.id).unwrap();
        assert_eq!(moved.language, "it-IT");
        assert_eq!(moved.display_name, "Italian words");
        assert!(store.language("de-DE").is_none());
    }

    #[tokio::test]
    async fn delete_language_cascades_to_decks() {
        let (_, mut store) = open().await;
        store.add_language("de-DE", "German").unwrap();
        store.add_language("fr-FR", "French").unwrap();
        let german = store.add_deck("Animals", "de-DE").unwrap();
        let french = store.add_deck("Food", "fr-FR").unwrap();

        let removed = store.delete_language("de-DE").unwrap();
        assert_eq!(removed, vec![german.id]);
        assert_eq!(store.get_all().len(), 1);
        assert_eq!(store.get_all()[0].id, french.id);
        assert_eq!(store.deck_counts().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_language_is_rejected() {
        let (_, mut store) = open().await;
        store.add_language("de-DE", "German").unwrap();
        let err = store.add_language("de-DE", "Deutsch").unwrap_err();
        assert_eq!(
            err.to_string(),
            "deck error: language already exists: de-DE (German)"
        );
    }

    #[tokio::test]
    async fn legacy_data_is_migrated_and_written_back() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .write(
                keys::DECKS,
                &json!([{"name": "Old", "language": "es-ES", "cards": []}]),
            )
            .await
            .unwrap();
        storage
            .write(keys::LANGUAGES, &json!(["fr-FR"]))
            .await
            .unwrap();

        let store = DeckStore::open(storage.clone(), Notices::new()).await;
        store.flush().await;

        let deck = &store.get_all()[0];
        assert!(!deck.id.is_empty());
        assert_eq!(deck.display_name, "Spanish");
        assert_eq!(
            store.languages(),
            &[
                LanguageCategory::new("fr-FR", "French"),
                LanguageCategory::new("es-ES", "Spanish"),
            ]
        );

        let languages: Vec<LanguageCategory> =
            storage.read(keys::LANGUAGES).await.unwrap().unwrap();
        assert_eq!(languages.len(), 2);
        assert_eq!(stored_decks(&storage).await[0].id, deck.id);
    }

    #[tokio::test]
    async fn unreadable_decks_are_reported_and_left_alone() {
        let storage = Arc::new(MemoryStorage::new());
        storage.insert_raw(keys::DECKS, "{truncated").unwrap();

        let store = DeckStore::open(storage.clone(), Notices::new()).await;
        store.flush().await;

        assert!(!store.decks_loaded());
        assert!(store.get_all().is_empty());
        assert_eq!(
            storage.raw(keys::DECKS).unwrap().as_deref(),
            Some("{truncated")
        );

        let (_, fresh) = open().await;
        assert!(fresh.decks_loaded());
    }
}
