//! Builder patterns for constructing test objects.

use flashcarder_core::model::{Card, Deck};

/// Builder for a single card.
///
/// # Example
///
/// ```rust
/// use flashcarder_test_utils::builders::CardBuilder;
///
/// let card = CardBuilder::new("c1").front("Hund").back("dog").build();
/// assert_eq!(card.back, "dog");
/// ```
pub struct CardBuilder {
    card: Card,
}

impl CardBuilder {
    /// Start a card whose sides default to `front <id>` / `back <id>`.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let card = Card::new(id.clone(), format!("front {id}"), format!("back {id}"));
        Self { card }
    }

    pub fn front(mut self, front: impl Into<String>) -> Self {
        self.card.front = front.into();
        self
    }

    pub fn back(mut self, back: impl Into<String>) -> Self {
        self.card.back = back.into();
        self
    }

    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.card.example = Some(example.into());
        self
    }

    pub fn pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.card.pronunciation = Some(pronunciation.into());
        self
    }

    pub fn english_first(mut self) -> Self {
        self.card.is_english_first = true;
        self
    }

    pub fn build(self) -> Card {
        self.card
    }
}

/// Builder for a deck.
///
/// Defaults to a German deck titled after its id with no cards.
pub struct DeckBuilder {
    deck: Deck,
}

impl DeckBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            deck: Deck {
                title: format!("Deck {id}"),
                id,
                language: "de-DE".to_string(),
                display_name: "German".to_string(),
                cards: Vec::new(),
            },
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.deck.title = title.into();
        self
    }

    pub fn language(mut self, code: impl Into<String>, display_name: impl Into<String>) -> Self {
        self.deck.language = code.into();
        self.deck.display_name = display_name.into();
        self
    }

    /// Add default cards with the given ids.
    pub fn cards<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deck
            .cards
            .extend(ids.into_iter().map(|id| CardBuilder::new(id).build()));
        self
    }

    pub fn card(mut self, card: Card) -> Self {
        self.deck.cards.push(card);
        self
    }

    pub fn build(self) -> Deck {
        self.deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_builder_defaults() {
        let deck = DeckBuilder::new("d1").cards(["A", "B"]).build();
        assert_eq!(deck.title, "Deck d1");
        assert_eq!(deck.language, "de-DE");
        assert_eq!(deck.cards.len(), 2);
        assert_eq!(deck.cards[1].front, "front B");
    }

    #[test]
    fn card_builder_overrides() {
        let card = CardBuilder::new("c")
            .front("Hund")
            .example("Der Hund bellt.")
            .english_first()
            .build();
        assert_eq!(card.front, "Hund");
        assert_eq!(card.back, "back c");
        assert!(card.is_english_first);
    }
}
