//! The ordered queue of cards left to review in a round.
//!
//! Cards are addressed by id, never by position: the display index and
//! the queue index drift apart as soon as a card is requeued, and card
//! content may be edited underneath the queue.
//!
//! The cursor always points at a valid card while the queue is non-empty
//! and is `0` when it is empty. Ids are unique.

use crate::model::Card;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewQueue {
    cards: Vec<Card>,
    cursor: usize,
}

impl ReviewQueue {
    /// Build a queue in the given order with the cursor on the first card.
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        Self::from_parts(cards, 0)
    }

    /// Rebuild a queue from persisted parts.
    ///
    /// Later duplicates of an id are dropped and an out-of-range cursor is
    /// clamped, so a damaged record still yields a usable queue.
    pub fn from_parts(cards: impl IntoIterator<Item = Card>, cursor: usize) -> Self {
        let mut seen = HashSet::new();
        let cards = cards
            .into_iter()
            .filter(|card| seen.insert(card.id.clone()))
            .collect();
        let mut queue = Self { cards, cursor };
        queue.clamp_cursor();
        queue
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The card under the cursor.
    pub fn current(&self) -> Option<&Card> {
        self.cards.get(self.cursor)
    }

    pub fn position(&self, card_id: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.id == card_id)
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.position(card_id).is_some()
    }

    /// Remove a card by id.
    ///
    /// The cursor keeps pointing at the same card when a card before it is
    /// removed. When the card under the cursor is removed the cursor stays
    /// put (now showing the following card), clamped to the last card.
    pub fn remove(&mut self, card_id: &str) -> Option<Card> {
        let pos = self.position(card_id)?;
        let card = self.cards.remove(pos);
        if pos < self.cursor {
            self.cursor -= 1;
        }
        self.clamp_cursor();
        Some(card)
    }

    /// Move a card to the tail of the queue.
    ///
    /// Relative order of the other cards is unchanged. If the cursor falls
    /// off the end once the card is taken out, it wraps to the front so the
    /// requeued card comes after everything still waiting.
    pub fn move_to_tail(&mut self, card_id: &str) -> bool {
        let Some(pos) = self.position(card_id) else {
            return false;
        };
        let card = self.cards.remove(pos);
        if pos < self.cursor {
            self.cursor -= 1;
        }
        if self.cursor >= self.cards.len() {
            self.cursor = 0;
        }
        self.cards.push(card);
        true
    }

    /// Pull the cursor back inside the queue.
    pub fn clamp_cursor(&mut self) {
        if self.cursor >= self.cards.len() {
            self.cursor = self.cards.len().saturating_sub(1);
        }
    }

    /// Step the cursor forward, wrapping at the end.
    pub fn advance(&mut self) {
        if !self.cards.is_empty() {
            self.cursor = (self.cursor + 1) % self.cards.len();
        }
    }

    /// Step the cursor back, wrapping at the front.
    pub fn retreat(&mut self) {
        if !self.cards.is_empty() {
            self.cursor = self
                .cursor
                .checked_sub(1)
                .unwrap_or(self.cards.len() - 1);
        }
    }

    /// Replace a queued card's content with a newer version of the same id.
    ///
    /// Returns `true` if the stored card changed.
    pub fn refresh(&mut self, card: &Card) -> bool {
        match self.cards.iter_mut().find(|c| c.id == card.id) {
            Some(queued) if queued != card => {
                *queued = card.clone();
                true
            }
            _ => false,
        }
    }

    pub fn into_parts(self) -> (Vec<Card>, usize) {
        (self.cards, self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> Card {
        Card::new(id, format!("front {id}"), format!("back {id}"))
    }

    fn queue(ids: &[&str]) -> ReviewQueue {
        ReviewQueue::new(ids.iter().map(|id| card(id)))
    }

    fn ids(queue: &ReviewQueue) -> Vec<&str> {
        queue.cards().iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn from_parts_drops_duplicates_and_clamps() {
        let q = ReviewQueue::from_parts(vec![card("a"), card("b"), card("a")], 7);
        assert_eq!(ids(&q), vec!["a", "b"]);
        assert_eq!(q.cursor(), 1);
    }

    #[test]
    fn empty_queue_cursor_is_zero() {
        let q = ReviewQueue::from_parts(Vec::new(), 3);
        assert_eq!(q.cursor(), 0);
        assert!(q.current().is_none());
    }

    #[test]
    fn remove_shrinks_by_one_each_time() {
        let mut q = queue(&["a", "b", "c", "d"]);
        for (expected_len, id) in [(3, "a"), (2, "c"), (1, "d"), (0, "b")] {
            assert!(q.remove(id).is_some());
            assert_eq!(q.len(), expected_len);
            assert!(!q.contains(id));
        }
        assert_eq!(q.cursor(), 0);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut q = queue(&["a", "b"]);
        assert!(q.remove("zzz").is_none());
        assert_eq!(ids(&q), vec!["a", "b"]);
    }

    #[test]
    fn remove_current_last_clamps() {
        let mut q = queue(&["a", "b", "c"]);
        q.advance();
        q.advance();
        assert_eq!(q.current().unwrap().id, "c");
        q.remove("c");
        assert_eq!(q.cursor(), 1);
        assert_eq!(q.current().unwrap().id, "b");
    }

    #[test]
    fn remove_before_cursor_keeps_current_card() {
        let mut q = queue(&["a", "b", "c", "d"]);
        q.advance();
        q.advance();
        q.remove("a");
        assert_eq!(q.current().unwrap().id, "c");
    }

    #[test]
    fn move_to_tail_keeps_length_and_order() {
        let mut q = queue(&["a", "b", "c", "d"]);
        assert!(q.move_to_tail("b"));
        assert_eq!(ids(&q), vec!["a", "c", "d", "b"]);
        assert_eq!(q.cursor(), 0);
    }

    #[test]
    fn move_current_to_tail_shows_next() {
        let mut q = queue(&["a", "b", "c"]);
        q.move_to_tail("a");
        assert_eq!(ids(&q), vec!["b", "c", "a"]);
        assert_eq!(q.current().unwrap().id, "b");
    }

    #[test]
    fn move_last_current_wraps_to_front() {
        let mut q = queue(&["a", "b", "c"]);
        q.retreat();
        assert_eq!(q.current().unwrap().id, "c");
        q.move_to_tail("c");
        assert_eq!(ids(&q), vec!["a", "b", "c"]);
        assert_eq!(q.cursor(), 0);
    }

    #[test]
    fn repeated_requeue_never_empties() {
        let mut q = queue(&["a", "b", "c"]);
        for _ in 0..30 {
            let id = q.current().unwrap().id.clone();
            q.move_to_tail(&id);
            assert_eq!(q.len(), 3);
        }
    }

    #[test]
    fn advance_and_retreat_wrap() {
        let mut q = queue(&["a", "b"]);
        q.retreat();
        assert_eq!(q.cursor(), 1);
        q.advance();
        assert_eq!(q.cursor(), 0);

        let mut empty = ReviewQueue::default();
        empty.advance();
        empty.retreat();
        assert_eq!(empty.cursor(), 0);
    }

    #[test]
    fn refresh_replaces_content_only_when_changed() {
        let mut q = queue(&["a", "b"]);
        let mut edited = card("b");
        assert!(!q.refresh(&edited));
        edited.front = "neu".into();
        assert!(q.refresh(&edited));
        assert_eq!(q.cards()[1].front, "neu");
        assert!(!q.refresh(&card("zzz")));
    }
}
