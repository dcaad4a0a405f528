//! The study session engine.
//!
//! Owns at most one [`StudySession`] per deck, drives them through
//! [`StudyEvent`]s and persists the whole session map under
//! [`keys::STUDY_SESSIONS`] after every change. Transitions are
//! synchronous; writes happen in the background (see [`Flusher`]).

use crate::error::StudyError;
use crate::flush::Flusher;
use crate::model::{Card, Deck};
use crate::notice::{Notice, NoticeKind, Notices};
use crate::study::{StudyEvent, StudySession, StudyState, Transition};
use flashcarder_storage::{keys, Storage};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

type SessionMap = BTreeMap<String, StudySession>;

/// A point-in-time view of a deck's study progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyProgress {
    pub state: String,
    pub remaining: usize,
    pub current_index: usize,
    pub cards_reviewed: u32,
    pub correct: usize,
    pub incorrect: usize,
    pub deck_size: usize,
}

/// Owns and persists study sessions.
pub struct StudyEngine {
    sessions: SessionMap,
    flusher: Flusher<SessionMap>,
    notices: Notices,
}

impl StudyEngine {
    /// Load stored sessions, dropping any whose deck is not in `decks`.
    ///
    /// `None` means the deck list could not be read. Every stored session
    /// is kept then; missing decks are caught later by
    /// [`reconcile`](Self::reconcile).
    pub async fn open<S>(storage: Arc<S>, notices: Notices, decks: Option<&[Deck]>) -> Self
    where
        S: Storage + 'static,
    {
        let stored: SessionMap = storage.get_or(keys::STUDY_SESSIONS, SessionMap::new()).await;
        debug!(count = stored.len(), "Loaded study sessions");

        let flusher = Flusher::spawn(
            storage,
            keys::STUDY_SESSIONS,
            Some(stored.clone()),
            notices.clone(),
        );
        let mut engine = Self {
            sessions: stored,
            flusher,
            notices,
        };

        let Some(decks) = decks else {
            warn!("Deck list unavailable, keeping stored sessions as they are");
            return engine;
        };
        let live: HashSet<&str> = decks.iter().map(|d| d.id.as_str()).collect();
        let orphans: Vec<String> = engine
            .sessions
            .iter()
            .filter(|(key, session)| {
                !live.contains(key.as_str()) || session.deck_id() != key.as_str()
            })
            .map(|(key, _)| key.clone())
            .collect();
        if !orphans.is_empty() {
            engine.discard_decks(orphans.iter().map(String::as_str));
        }
        engine
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn session(&self, deck_id: &str) -> Option<&StudySession> {
        self.sessions.get(deck_id)
    }

    pub fn state(&self, deck_id: &str) -> StudyState {
        self.session(deck_id)
            .map(StudySession::state)
            .unwrap_or(StudyState::Inactive)
    }

    pub fn current_card(&self, deck_id: &str) -> Option<&Card> {
        self.session(deck_id).and_then(StudySession::current_card)
    }

    /// Start studying a deck, resuming its stored session if there is one.
    ///
    /// A finished session is replaced by a fresh one.
    pub fn start_study(&mut self, deck: &Deck) -> Result<&StudySession, StudyError> {
        if deck.cards.is_empty() {
            if self.sessions.remove(&deck.id).is_some() {
                self.persist();
            }
            return Err(StudyError::EmptyDeck {
                deck_id: deck.id.clone(),
            });
        }

        let resumable = self
            .sessions
            .get(&deck.id)
            .is_some_and(|s| s.state() != StudyState::RoundTwoComplete);
        if resumable {
            info!(deck_id = %deck.id, "Resuming study session");
        } else {
            info!(deck_id = %deck.id, cards = deck.cards.len(), "Starting study session");
            self.sessions
                .insert(deck.id.clone(), StudySession::start(deck)?);
        }
        self.persist();
        self.session(&deck.id).ok_or_else(|| StudyError::NotStudying {
            deck_id: deck.id.clone(),
        })
    }

    pub fn mark_correct(&mut self, deck_id: &str, card_id: &str) -> Result<Transition, StudyError> {
        self.apply(deck_id, StudyEvent::MarkCorrect(card_id))
    }

    pub fn mark_incorrect(
        &mut self,
        deck_id: &str,
        card_id: &str,
    ) -> Result<Transition, StudyError> {
        self.apply(deck_id, StudyEvent::MarkIncorrect(card_id))
    }

    pub fn next_card(&mut self, deck_id: &str) -> Result<Transition, StudyError> {
        self.apply(deck_id, StudyEvent::Next)
    }

    pub fn previous_card(&mut self, deck_id: &str) -> Result<Transition, StudyError> {
        self.apply(deck_id, StudyEvent::Previous)
    }

    /// Begin round two from the deck's current cards.
    pub fn advance_round(&mut self, deck: &Deck) -> Result<Transition, StudyError> {
        self.apply(&deck.id, StudyEvent::AdvanceRound(deck))
    }

    /// Bring a session in line with the deck's current contents.
    ///
    /// `None` means the deck is gone, and the session is discarded.
    pub fn reconcile(&mut self, deck_id: &str, deck: Option<&Deck>) -> Transition {
        let Some(deck) = deck else {
            return if self.discard(deck_id) {
                Transition::Changed
            } else {
                Transition::Unchanged
            };
        };
        if !self.sessions.contains_key(deck_id) {
            return Transition::Unchanged;
        }
        match self.apply(deck_id, StudyEvent::Reconcile(deck)) {
            Ok(transition) => transition,
            Err(e) => {
                warn!(deck_id, error = %e, "Reconcile skipped");
                Transition::Unchanged
            }
        }
    }

    /// Drop a deleted card from the deck's queue, if studying.
    pub fn remove_card(&mut self, deck_id: &str, card_id: &str) -> Transition {
        let transition = self
            .sessions
            .get_mut(deck_id)
            .map(|s| s.remove_card(card_id))
            .unwrap_or(Transition::Unchanged);
        if transition.changed() {
            debug!(deck_id, card_id, "Removed deleted card from queue");
            self.persist();
        }
        transition
    }

    /// End study mode for a deck. Returns whether a session existed.
    pub fn exit_study(&mut self, deck_id: &str) -> bool {
        let removed = self.sessions.remove(deck_id).is_some();
        if removed {
            info!(deck_id, "Exited study mode");
            self.persist();
        }
        removed
    }

    /// Drop sessions for decks that no longer exist.
    pub fn discard_decks<'a>(&mut self, deck_ids: impl IntoIterator<Item = &'a str>) {
        let mut changed = false;
        for deck_id in deck_ids {
            if self.sessions.remove(deck_id).is_some() {
                warn!(deck_id, "Discarding study session for missing deck");
                self.notices.publish(Notice::new(
                    NoticeKind::SessionDiscarded {
                        deck_id: deck_id.to_string(),
                    },
                    format!("study session for deck {deck_id} was discarded"),
                ));
                changed = true;
            }
        }
        if changed {
            self.persist();
        }
    }

    pub fn progress(&self, deck: &Deck) -> StudyProgress {
        match self.session(&deck.id) {
            Some(session) => StudyProgress {
                state: session.state().to_string(),
                remaining: session.queue().len(),
                current_index: session.queue().cursor(),
                cards_reviewed: session.cards_reviewed(),
                correct: session.correct_count(),
                incorrect: session.incorrect_count(),
                deck_size: deck.cards.len(),
            },
            None => StudyProgress {
                state: StudyState::Inactive.to_string(),
                remaining: 0,
                current_index: 0,
                cards_reviewed: 0,
                correct: 0,
                incorrect: 0,
                deck_size: deck.cards.len(),
            },
        }
    }

    /// Wait for pending session writes.
    pub async fn flush(&self) {
        self.flusher.flush().await;
    }

    fn discard(&mut self, deck_id: &str) -> bool {
        let existed = self.sessions.contains_key(deck_id);
        self.discard_decks([deck_id]);
        existed
    }

    fn apply(&mut self, deck_id: &str, event: StudyEvent<'_>) -> Result<Transition, StudyError> {
        let session = self
            .sessions
            .get_mut(deck_id)
            .ok_or_else(|| StudyError::NotStudying {
                deck_id: deck_id.to_string(),
            })?;
        let before = session.state();
        let transition = session.apply(event)?;
        let after = session.state();

        if before != after {
            info!(deck_id, from = %before, to = %after, "Study state changed");
        }
        if transition.changed() {
            self.persist();
        }
        Ok(transition)
    }

    /// Schedule a write of every session that is still in progress.
    fn persist(&self) {
        let snapshot: SessionMap = self
            .sessions
            .iter()
            .filter(|(_, s)| s.state() != StudyState::RoundTwoComplete)
            .map(|(id, s)| (id.clone(), s.clone()))
            .collect();
        self.flusher.schedule(snapshot);
    }
}
