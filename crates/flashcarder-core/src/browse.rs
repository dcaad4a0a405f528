//! Browsing a deck outside study mode.

use crate::model::{Card, Deck};

/// A wrap-around cursor over a deck's cards.
///
/// Holds only a position; the deck is passed in on each call so edits are
/// always visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Browser {
    index: usize,
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(index: usize) -> Self {
        Self { index }
    }

    /// Position within the deck, clamped to its current size.
    pub fn index(&self, deck: &Deck) -> usize {
        match deck.cards.len() {
            0 => 0,
            len => self.index.min(len - 1),
        }
    }

    pub fn current<'a>(&self, deck: &'a Deck) -> Option<&'a Card> {
        deck.cards.get(self.index(deck))
    }

    pub fn next<'a>(&mut self, deck: &'a Deck) -> Option<&'a Card> {
        let len = deck.cards.len();
        if len > 0 {
            self.index = (self.index(deck) + 1) % len;
        }
        self.current(deck)
    }

    pub fn previous<'a>(&mut self, deck: &'a Deck) -> Option<&'a Card> {
        let len = deck.cards.len();
        if len > 0 {
            self.index = (self.index(deck) + len - 1) % len;
        }
        self.current(deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(n: usize) -> Deck {
        Deck {
            id: "d".into(),
            title: "t".into(),
            language: "de-DE".into(),
            display_name: "German".into(),
            cards: (0..n)
                .map(|i| Card::new(i.to_string(), "f", "b"))
                .collect(),
        }
    }

    #[test]
    fn wraps_both_ways() {
        let d = deck(3);
        let mut browser = Browser::new();
        assert_eq!(browser.previous(&d).unwrap().id, "2");
        assert_eq!(browser.next(&d).unwrap().id, "0");
        assert_eq!(browser.next(&d).unwrap().id, "1");
    }

    #[test]
    fn empty_deck_has_no_card() {
        let d = deck(0);
        let mut browser = Browser::new();
        assert!(browser.next(&d).is_none());
        assert!(browser.previous(&d).is_none());
    }

    #[test]
    fn clamps_after_deck_shrinks() {
        let browser = Browser::at(5);
        assert_eq!(browser.current(&deck(2)).unwrap().id, "1");
    }
}
