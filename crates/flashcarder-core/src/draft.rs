//! Card input as entered by the user, validated before it reaches the
//! deck store.

use crate::error::ValidationError;
use crate::model::Card;

/// The fields of the add/edit card form.
///
/// `front` is the first side entered. When `is_english_first` is set that
/// is the English side, and the stored card gets the sides swapped so
/// [`Card::front`] is always the native-language side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDraft {
    pub front: String,
    pub back: String,
    pub example: Option<String>,
    pub pronunciation: Option<String>,
    pub is_english_first: bool,
}

impl CardDraft {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            ..Default::default()
        }
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn with_pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.pronunciation = Some(pronunciation.into());
        self
    }

    pub fn english_first(mut self, english_first: bool) -> Self {
        self.is_english_first = english_first;
        self
    }

    /// Rebuild the form for an existing card, undoing the side swap.
    pub fn from_card(card: &Card) -> Self {
        let (front, back) = if card.is_english_first {
            (card.back.clone(), card.front.clone())
        } else {
            (card.front.clone(), card.back.clone())
        };
        Self {
            front,
            back,
            example: card.example.clone(),
            pronunciation: card.pronunciation.clone(),
            is_english_first: card.is_english_first,
        }
    }

    /// Check that both sides have text.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.front.trim().is_empty() || self.back.trim().is_empty() {
            return Err(ValidationError::IncompleteCard);
        }
        Ok(())
    }

    /// Validate and build the stored card.
    pub fn into_card(self, id: impl Into<String>) -> Result<Card, ValidationError> {
        self.validate()?;
        let front = self.front.trim().to_string();
        let back = self.back.trim().to_string();
        let (front, back) = if self.is_english_first {
            (back, front)
        } else {
            (front, back)
        };
        Ok(Card {
            id: id.into(),
            front,
            back,
            example: optional(self.example),
            pronunciation: optional(self.pronunciation),
            is_english_first: self.is_english_first,
        })
    }
}

/// Trim, mapping blank text to `None`.
fn optional(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
