//! The application container.
//!
//! [`App`] owns the deck store, the study engine and the notice channel,
//! and is the only place that knows how changes to one cascade into the
//! other. Presentation code holds an `App` and calls into it.

use crate::deck_store::{CardRemoval, DeckStore};
use crate::draft::CardDraft;
use crate::engine::{StudyEngine, StudyProgress};
use crate::error::CoreResult;
use crate::model::{Card, Deck, LanguageCategory};
use crate::notice::Notices;
use crate::study::{StudySession, StudyState, Transition};
use flashcarder_storage::Storage;
use std::sync::Arc;

pub struct App {
    decks: DeckStore,
    engine: StudyEngine,
    notices: Notices,
}

impl App {
    /// Load all state from `storage`.
    pub async fn open<S: Storage + 'static>(storage: Arc<S>) -> Self {
        Self::open_with_notices(storage, Notices::new()).await
    }

    /// Like [`open`](Self::open), publishing into an existing channel so
    /// notices raised while loading are not missed.
    pub async fn open_with_notices<S: Storage + 'static>(storage: Arc<S>, notices: Notices) -> Self {
        let decks = DeckStore::open(storage.clone(), notices.clone()).await;
        let known_decks = decks.decks_loaded().then(|| decks.get_all());
        let engine = StudyEngine::open(storage, notices.clone(), known_decks).await;
        Self {
            decks,
            engine,
            notices,
        }
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn decks(&self) -> &DeckStore {
        &self.decks
    }

    pub fn engine(&self) -> &StudyEngine {
        &self.engine
    }

    pub fn deck(&self, deck_id: &str) -> CoreResult<&Deck> {
        self.decks.deck(deck_id)
    }

    // Decks and cards

    pub fn add_deck(&mut self, title: &str, language_code: &str) -> CoreResult<Deck> {
        self.decks.add_deck(title, language_code)
    }

    pub fn rename_deck(&mut self, deck_id: &str, title: &str) -> CoreResult<()> {
        self.decks.rename_deck(deck_id, title)
    }

    /// Delete a deck along with its study session.
    pub fn delete_deck(&mut self, deck_id: &str) -> CoreResult<Deck> {
        let deck = self.decks.delete_deck(deck_id)?;
        self.engine.exit_study(deck_id);
        Ok(deck)
    }

    pub fn add_card(&mut self, deck_id: &str, draft: CardDraft) -> CoreResult<Card> {
        self.decks.add_card(deck_id, draft)
    }

    /// Edit a card. A running session picks the change up on the next
    /// [`focus`](Self::focus).
    pub fn edit_card(&mut self, deck_id: &str, card_id: &str, draft: CardDraft) -> CoreResult<Card> {
        self.decks.edit_card(deck_id, card_id, draft)
    }

    /// Delete a card and drop it from the deck's study queue.
    pub fn delete_card(&mut self, deck_id: &str, card_id: &str) -> CoreResult<CardRemoval> {
        let removal = self.decks.delete_card(deck_id, card_id)?;
        self.engine.remove_card(deck_id, card_id);
        Ok(removal)
    }

    // Language categories

    pub fn add_language(&mut self, code: &str, display_name: &str) -> CoreResult<LanguageCategory> {
        self.decks.add_language(code, display_name)
    }

    pub fn edit_language(
        &mut self,
        code: &str,
        new_code: &str,
        display_name: &str,
    ) -> CoreResult<LanguageCategory> {
        self.decks.edit_language(code, new_code, display_name)
    }

    /// Delete a category, its decks and their sessions.
    pub fn delete_language(&mut self, code: &str) -> CoreResult<Vec<String>> {
        let removed = self.decks.delete_language(code)?;
        for deck_id in &removed {
            self.engine.exit_study(deck_id);
        }
        Ok(removed)
    }

    // Study

    pub fn start_study(&mut self, deck_id: &str) -> CoreResult<&StudySession> {
        let deck = self.decks.deck(deck_id)?;
        Ok(self.engine.start_study(deck)?)
    }

    pub fn study_state(&self, deck_id: &str) -> StudyState {
        self.engine.state(deck_id)
    }

    pub fn session(&self, deck_id: &str) -> Option<&StudySession> {
        self.engine.session(deck_id)
    }

    pub fn mark_correct(&mut self, deck_id: &str, card_id: &str) -> CoreResult<Transition> {
        Ok(self.engine.mark_correct(deck_id, card_id)?)
    }

    pub fn mark_incorrect(&mut self, deck_id: &str, card_id: &str) -> CoreResult<Transition> {
        Ok(self.engine.mark_incorrect(deck_id, card_id)?)
    }

    pub fn next_card(&mut self, deck_id: &str) -> CoreResult<Transition> {
        Ok(self.engine.next_card(deck_id)?)
    }

    pub fn previous_card(&mut self, deck_id: &str) -> CoreResult<Transition> {
        Ok(self.engine.previous_card(deck_id)?)
    }

    pub fn advance_round(&mut self, deck_id: &str) -> CoreResult<Transition> {
        let deck = self.decks.deck(deck_id)?;
        Ok(self.engine.advance_round(deck)?)
    }

    pub fn exit_study(&mut self, deck_id: &str) -> bool {
        self.engine.exit_study(deck_id)
    }

    /// The deck's screen came back into view: reconcile its session with
    /// the deck's current cards.
    pub fn focus(&mut self, deck_id: &str) -> Transition {
        let deck = self.decks.find_by_id(deck_id);
        self.engine.reconcile(deck_id, deck)
    }

    pub fn progress(&self, deck_id: &str) -> CoreResult<StudyProgress> {
        Ok(self.engine.progress(self.decks.deck(deck_id)?))
    }

    /// Wait for every pending write.
    pub async fn flush(&self) {
        self.decks.flush().await;
        self.engine.flush().await;
    }
}
