//! The study session state machine.
//!
//! A session walks a deck twice: round one shows the native-language side
//! first, round two shows the English side first. Each round drains a
//! [`ReviewQueue`]: a correct answer removes the card, an incorrect one
//! sends it to the back of the queue. All changes go through
//! [`StudySession::apply`].

use crate::error::StudyError;
use crate::model::{Card, CardStatus, Deck};
use crate::queue::ReviewQueue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Which pass through the deck a session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    One,
    Two,
}

/// Where a deck's study flow stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyState {
    /// No session for the deck.
    Inactive,
    RoundOneActive,
    RoundOneComplete,
    RoundTwoActive,
    /// Terminal; only left through exit.
    RoundTwoComplete,
}

impl StudyState {
    pub fn is_active(&self) -> bool {
        matches!(self, StudyState::RoundOneActive | StudyState::RoundTwoActive)
    }

    pub fn is_complete(&self) -> bool {
        matches!(
            self,
            StudyState::RoundOneComplete | StudyState::RoundTwoComplete
        )
    }

    pub fn round(&self) -> Option<Round> {
        match self {
            StudyState::Inactive => None,
            StudyState::RoundOneActive | StudyState::RoundOneComplete => Some(Round::One),
            StudyState::RoundTwoActive | StudyState::RoundTwoComplete => Some(Round::Two),
        }
    }
}

impl fmt::Display for StudyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StudyState::Inactive => "not studying",
            StudyState::RoundOneActive => "reviewing round one",
            StudyState::RoundOneComplete => "round one complete",
            StudyState::RoundTwoActive => "reviewing round two",
            StudyState::RoundTwoComplete => "study complete",
        };
        f.write_str(text)
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy)]
pub enum StudyEvent<'a> {
    /// The card with this id was answered correctly.
    MarkCorrect(&'a str),
    /// The card with this id was answered incorrectly.
    MarkIncorrect(&'a str),
    /// Start round two from the deck's current cards.
    AdvanceRound(&'a Deck),
    /// Bring queued cards in line with the deck's current cards.
    Reconcile(&'a Deck),
    /// Show the next queued card.
    Next,
    /// Show the previous queued card.
    Previous,
}

impl StudyEvent<'_> {
    fn name(&self) -> &'static str {
        match self {
            StudyEvent::MarkCorrect(_) => "mark correct",
            StudyEvent::MarkIncorrect(_) => "mark incorrect",
            StudyEvent::AdvanceRound(_) => "advance round",
            StudyEvent::Reconcile(_) => "reconcile",
            StudyEvent::Next => "show next card",
            StudyEvent::Previous => "show previous card",
        }
    }
}

/// Whether an event changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed,
    Unchanged,
}

impl Transition {
    pub fn changed(&self) -> bool {
        matches!(self, Transition::Changed)
    }

    fn from_bool(changed: bool) -> Self {
        if changed {
            Transition::Changed
        } else {
            Transition::Unchanged
        }
    }
}

/// The resumable state of one deck's study pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SessionRecord", into = "SessionRecord")]
pub struct StudySession {
    deck_id: String,
    queue: ReviewQueue,
    statuses: BTreeMap<String, CardStatus>,
    round: Round,
    cards_reviewed: u32,
}

impl StudySession {
    /// Begin round one over the deck's cards, in deck order.
    pub fn start(deck: &Deck) -> Result<Self, StudyError> {
        if deck.cards.is_empty() {
            return Err(StudyError::EmptyDeck {
                deck_id: deck.id.clone(),
            });
        }
        Ok(Self {
            deck_id: deck.id.clone(),
            queue: ReviewQueue::new(deck.cards.iter().cloned()),
            statuses: BTreeMap::new(),
            round: Round::One,
            cards_reviewed: 0,
        })
    }

    pub fn deck_id(&self) -> &str {
        &self.deck_id
    }

    pub fn queue(&self) -> &ReviewQueue {
        &self.queue
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn is_second_round(&self) -> bool {
        self.round == Round::Two
    }

    pub fn cards_reviewed(&self) -> u32 {
        self.cards_reviewed
    }

    pub fn statuses(&self) -> &BTreeMap<String, CardStatus> {
        &self.statuses
    }

    pub fn state(&self) -> StudyState {
        match (self.round, self.queue.is_empty()) {
            (Round::One, false) => StudyState::RoundOneActive,
            (Round::One, true) => StudyState::RoundOneComplete,
            (Round::Two, false) => StudyState::RoundTwoActive,
            (Round::Two, true) => StudyState::RoundTwoComplete,
        }
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.queue.current()
    }

    /// The current card's sides in display order: round two shows the
    /// English side first.
    pub fn displayed_sides(&self) -> Option<(&str, &str)> {
        self.current_card().map(|card| match self.round {
            Round::One => (card.front.as_str(), card.back.as_str()),
            Round::Two => (card.back.as_str(), card.front.as_str()),
        })
    }

    pub fn correct_count(&self) -> usize {
        self.count(CardStatus::Correct)
    }

    pub fn incorrect_count(&self) -> usize {
        self.count(CardStatus::Incorrect)
    }

    fn count(&self, status: CardStatus) -> usize {
        self.statuses.values().filter(|s| **s == status).count()
    }

    /// Apply one event.
    ///
    /// Marking a card that is no longer queued is a no-op, so a replayed
    /// gesture cannot remove a card twice.
    pub fn apply(&mut self, event: StudyEvent<'_>) -> Result<Transition, StudyError> {
        let state = self.state();
        match event {
            StudyEvent::MarkCorrect(card_id) => {
                if self.queue.remove(card_id).is_none() {
                    return Ok(Transition::Unchanged);
                }
                self.statuses
                    .insert(card_id.to_string(), CardStatus::Correct);
                self.cards_reviewed += 1;
                Ok(Transition::Changed)
            }
            StudyEvent::MarkIncorrect(card_id) => {
                if !self.queue.move_to_tail(card_id) {
                    return Ok(Transition::Unchanged);
                }
                self.statuses
                    .insert(card_id.to_string(), CardStatus::Incorrect);
                Ok(Transition::Changed)
            }
            StudyEvent::AdvanceRound(deck) => {
                self.check_deck(deck)?;
                if state != StudyState::RoundOneComplete {
                    return Err(StudyError::InvalidTransition {
                        state,
                        event: event.name(),
                    });
                }
                if deck.cards.is_empty() {
                    return Err(StudyError::EmptyDeck {
                        deck_id: deck.id.clone(),
                    });
                }
                self.queue = ReviewQueue::new(deck.cards.iter().cloned());
                self.statuses.clear();
                self.round = Round::Two;
                self.cards_reviewed = 0;
                Ok(Transition::Changed)
            }
            StudyEvent::Reconcile(deck) => {
                self.check_deck(deck)?;
                Ok(Transition::from_bool(self.reconcile(deck)))
            }
            StudyEvent::Next | StudyEvent::Previous => {
                if self.queue.len() < 2 {
                    return Ok(Transition::Unchanged);
                }
                if matches!(event, StudyEvent::Next) {
                    self.queue.advance();
                } else {
                    self.queue.retreat();
                }
                Ok(Transition::Changed)
            }
        }
    }

    /// Drop a card from the queue after it was deleted from the deck.
    ///
    /// Its recorded status is kept.
    pub fn remove_card(&mut self, card_id: &str) -> Transition {
        Transition::from_bool(self.queue.remove(card_id).is_some())
    }

    fn reconcile(&mut self, deck: &Deck) -> bool {
        let current: HashMap<&str, &Card> =
            deck.cards.iter().map(|c| (c.id.as_str(), c)).collect();

        let deleted: Vec<String> = self
            .queue
            .cards()
            .iter()
            .filter(|c| !current.contains_key(c.id.as_str()))
            .map(|c| c.id.clone())
            .collect();

        let mut changed = false;
        for card_id in &deleted {
            changed |= self.queue.remove(card_id).is_some();
        }
        for card in current.values() {
            changed |= self.queue.refresh(card);
        }
        changed
    }

    fn check_deck(&self, deck: &Deck) -> Result<(), StudyError> {
        if deck.id != self.deck_id {
            return Err(StudyError::DeckMismatch {
                expected: self.deck_id.clone(),
                actual: deck.id.clone(),
            });
        }
        Ok(())
    }
}

/// Stored shape of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    deck_id: String,
    #[serde(default)]
    cards_to_review: Vec<Card>,
    #[serde(default)]
    card_statuses: BTreeMap<String, CardStatus>,
    #[serde(default)]
    is_second_round: bool,
    #[serde(default)]
    cards_reviewed: u32,
    #[serde(default)]
    current_card_index: usize,
}

impl From<SessionRecord> for StudySession {
    fn from(record: SessionRecord) -> Self {
        Self {
            deck_id: record.deck_id,
            queue: ReviewQueue::from_parts(record.cards_to_review, record.current_card_index),
            statuses: record.card_statuses,
            round: if record.is_second_round {
                Round::Two
            } else {
                Round::One
            },
            cards_reviewed: record.cards_reviewed,
        }
    }
}

impl From<StudySession> for SessionRecord {
    fn from(session: StudySession) -> Self {
        let is_second_round = session.is_second_round();
        let (cards_to_review, current_card_index) = session.queue.into_parts();
        Self {
            deck_id: session.deck_id,
            cards_to_review,
            card_statuses: session.statuses,
            is_second_round,
            cards_reviewed: session.cards_reviewed,
            current_card_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn deck(ids: &[&str]) -> Deck {
        Deck {
            id: "d1".into(),
            title: "Animals".into(),
            language: "de-DE".into(),
            display_name: "German".into(),
            cards: ids
                .iter()
                .map(|id| Card::new(*id, format!("front {id}"), format!("back {id}")))
                .collect(),
        }
    }

    fn queued(session: &StudySession) -> Vec<&str> {
        session
            .queue()
            .cards()
            .iter()
            .map(|c| c.id.as_str())
            .collect()
    }

    #[test]
    fn start_rejects_empty_deck() {
        let err = StudySession::start(&deck(&[])).unwrap_err();
        assert_eq!(
            err,
            StudyError::EmptyDeck {
                deck_id: "d1".into()
            }
        );
    }

    #[test]
    fn start_copies_deck_in_order() {
        let session = StudySession::start(&deck(&["a", "b", "c"])).unwrap();
        assert_eq!(queued(&session), vec!["a", "b", "c"]);
        assert_eq!(session.queue().cursor(), 0);
        assert_eq!(session.state(), StudyState::RoundOneActive);
        assert_eq!(session.cards_reviewed(), 0);
    }

    #[test]
    fn mark_correct_removes_and_counts() {
        let mut session = StudySession::start(&deck(&["a", "b", "c"])).unwrap();
        let t = session.apply(StudyEvent::MarkCorrect("a")).unwrap();
        assert!(t.changed());
        assert_eq!(queued(&session), vec!["b", "c"]);
        assert_eq!(session.cards_reviewed(), 1);
        assert_eq!(session.statuses().get("a"), Some(&CardStatus::Correct));
    }

    #[test]
    fn mark_incorrect_requeues_at_tail() {
        let mut session = StudySession::start(&deck(&["a", "b", "c"])).unwrap();
        session.apply(StudyEvent::MarkIncorrect("a")).unwrap();
        assert_eq!(queued(&session), vec!["b", "c", "a"]);
        assert_eq!(session.queue().cursor(), 0);
        assert_eq!(session.current_card().unwrap().id, "b");
        assert_eq!(session.statuses().get("a"), Some(&CardStatus::Incorrect));
        assert_eq!(session.cards_reviewed(), 0);
    }

    #[test]
    fn replayed_mark_is_noop() {
        let mut session = StudySession::start(&deck(&["a", "b"])).unwrap();
        session.apply(StudyEvent::MarkCorrect("a")).unwrap();
        let t = session.apply(StudyEvent::MarkCorrect("a")).unwrap();
        assert_eq!(t, Transition::Unchanged);
        let t = session.apply(StudyEvent::MarkIncorrect("a")).unwrap();
        assert_eq!(t, Transition::Unchanged);
        assert_eq!(session.cards_reviewed(), 1);
        assert_eq!(queued(&session), vec!["b"]);
    }

    #[test]
    fn queue_empties_only_when_every_card_is_correct() {
        let mut session = StudySession::start(&deck(&["a", "b", "c"])).unwrap();
        for _ in 0..10 {
            for id in ["a", "b", "c"] {
                session.apply(StudyEvent::MarkIncorrect(id)).unwrap();
            }
        }
        assert_eq!(session.queue().len(), 3);

        session.apply(StudyEvent::MarkCorrect("b")).unwrap();
        session.apply(StudyEvent::MarkCorrect("a")).unwrap();
        assert_eq!(session.state(), StudyState::RoundOneActive);
        session.apply(StudyEvent::MarkCorrect("c")).unwrap();
        assert_eq!(session.state(), StudyState::RoundOneComplete);
        assert_eq!(session.correct_count(), 3);
        assert_eq!(session.incorrect_count(), 0);
    }

    #[test]
    fn advance_round_resets_from_deck() {
        let d = deck(&["a", "b", "c"]);
        let mut session = StudySession::start(&d).unwrap();
        for id in ["a", "b", "c"] {
            session.apply(StudyEvent::MarkCorrect(id)).unwrap();
        }
        session.apply(StudyEvent::AdvanceRound(&d)).unwrap();
        assert_eq!(session.state(), StudyState::RoundTwoActive);
        assert_eq!(queued(&session), vec!["a", "b", "c"]);
        assert!(session.is_second_round());
        assert_eq!(session.cards_reviewed(), 0);
        assert!(session.statuses().is_empty());
    }

    #[test]
    fn advance_round_only_after_round_one() {
        let d = deck(&["a"]);
        let mut session = StudySession::start(&d).unwrap();
        let err = session.apply(StudyEvent::AdvanceRound(&d)).unwrap_err();
        assert!(matches!(
            err,
            StudyError::InvalidTransition {
                state: StudyState::RoundOneActive,
                ..
            }
        ));

        session.apply(StudyEvent::MarkCorrect("a")).unwrap();
        session.apply(StudyEvent::AdvanceRound(&d)).unwrap();
        session.apply(StudyEvent::MarkCorrect("a")).unwrap();
        assert_eq!(session.state(), StudyState::RoundTwoComplete);
        assert!(session.apply(StudyEvent::AdvanceRound(&d)).is_err());
    }

    #[test]
    fn round_two_swaps_displayed_sides() {
        let d = deck(&["a"]);
        let mut session = StudySession::start(&d).unwrap();
        assert_eq!(session.displayed_sides(), Some(("front a", "back a")));
        session.apply(StudyEvent::MarkCorrect("a")).unwrap();
        assert_eq!(session.displayed_sides(), None);
        session.apply(StudyEvent::AdvanceRound(&d)).unwrap();
        assert_eq!(session.displayed_sides(), Some(("back a", "front a")));
    }

    #[test]
    fn reconcile_refreshes_and_drops_deleted_cards() {
        let mut d = deck(&["a", "b", "c"]);
        let mut session = StudySession::start(&d).unwrap();
        session.apply(StudyEvent::MarkIncorrect("a")).unwrap();
        assert_eq!(queued(&session), vec!["b", "c", "a"]);

        d.cards.retain(|c| c.id != "b");
        d.cards[0].front = "edited".into();
        let t = session.apply(StudyEvent::Reconcile(&d)).unwrap();

        assert!(t.changed());
        assert_eq!(queued(&session), vec!["c", "a"]);
        assert_eq!(session.queue().cursor(), 0);
        assert_eq!(session.queue().cards()[1].front, "edited");
        assert_eq!(session.statuses().get("a"), Some(&CardStatus::Incorrect));

        let t = session.apply(StudyEvent::Reconcile(&d)).unwrap();
        assert_eq!(t, Transition::Unchanged);
    }

    #[test]
    fn reconcile_rejects_other_deck() {
        let mut session = StudySession::start(&deck(&["a"])).unwrap();
        let mut other = deck(&["a"]);
        other.id = "d2".into();
        assert!(matches!(
            session.apply(StudyEvent::Reconcile(&other)),
            Err(StudyError::DeckMismatch { .. })
        ));
    }

    #[test]
    fn next_and_previous_wrap() {
        let mut session = StudySession::start(&deck(&["a", "b"])).unwrap();
        session.apply(StudyEvent::Previous).unwrap();
        assert_eq!(session.current_card().unwrap().id, "b");
        session.apply(StudyEvent::Next).unwrap();
        assert_eq!(session.current_card().unwrap().id, "a");
    }

    #[test]
    fn serializes_to_stored_shape() {
        let mut session = StudySession::start(&deck(&["a", "b"])).unwrap();
        session.apply(StudyEvent::MarkIncorrect("a")).unwrap();
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["deckId"], json!("d1"));
        assert_eq!(value["cardsToReview"][0]["id"], json!("b"));
        assert_eq!(value["cardStatuses"], json!({"a": "incorrect"}));
        assert_eq!(value["isSecondRound"], json!(false));
        assert_eq!(value["cardsReviewed"], json!(0));
        assert_eq!(value["currentCardIndex"], json!(0));
    }

    #[test]
    fn stored_shape_roundtrips() {
        let d = deck(&["a", "b", "c"]);
        let mut session = StudySession::start(&d).unwrap();
        session.apply(StudyEvent::MarkCorrect("a")).unwrap();
        session.apply(StudyEvent::MarkIncorrect("b")).unwrap();
        session.apply(StudyEvent::Next).unwrap();

        let text = serde_json::to_string(&session).unwrap();
        let restored: StudySession = serde_json::from_str(&text).unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn damaged_record_is_repaired_on_load() {
        let restored: StudySession = serde_json::from_value(json!({
            "deckId": "d1",
            "cardsToReview": [
                {"id": "a", "front": "x", "back": "y"},
                {"id": "a", "front": "x", "back": "y"}
            ],
            "currentCardIndex": 5
        }))
        .unwrap();
        assert_eq!(restored.queue().len(), 1);
        assert_eq!(restored.queue().cursor(), 0);
        assert_eq!(restored.state(), StudyState::RoundOneActive);
    }
}
