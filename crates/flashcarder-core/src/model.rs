//! Data model shared by the deck store and the study engine.
//!
//! Field names serialize in camelCase so data written by earlier versions
//! of the app loads unchanged.

use serde::{Deserialize, Serialize};

/// A single front/back card.
///
/// `front` holds the native-language side and `back` the English side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub pronunciation: Option<String>,
    /// The card was entered English side first.
    #[serde(default)]
    pub is_english_first: bool,
}

impl Card {
    /// Create a card with no example or pronunciation.
    pub fn new(id: impl Into<String>, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            front: front.into(),
            back: back.into(),
            example: None,
            pronunciation: None,
            is_english_first: false,
        }
    }
}

/// A titled collection of cards under a language category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    /// Empty only for legacy records; filled in on load.
    #[serde(default)]
    pub id: String,
    #[serde(alias = "name")]
    pub title: String,
    /// Language category code, e.g. `de-DE`.
    #[serde(default)]
    pub language: String,
    /// Empty only for legacy records; filled in on load.
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Deck {
    /// Look up a card by id.
    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }
}

/// A language grouping for decks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageCategory {
    pub code: String,
    /// Empty only for legacy records; filled in on load.
    #[serde(default)]
    pub display_name: String,
}

impl LanguageCategory {
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
        }
    }
}

/// Outcome recorded for a card in the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    Correct,
    Incorrect,
}
