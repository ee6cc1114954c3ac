//! crates/tarot_core/src/session.rs
//!
//! The draw-session state machine: turns one shuffled deck into an ordered
//! three-card selection driven by discrete UI picks.

use crate::deck::Deck;
use crate::domain::CardDefinition;
use rand::Rng;
use std::collections::HashSet;

/// The number of cards drawn for one reading.
pub const SPREAD_SIZE: usize = 3;

/// Identifier of the UI slot the user clicked in the fanned-out spread.
/// Which slot was clicked is cosmetic; draw order alone decides position.
pub type SlotId = usize;

/// Where the session sits between "nothing drawn" and "spread complete".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPhase {
    Empty,
    Drawing,
    Complete,
}

/// Mutable state for one reading attempt.
///
/// Owns its deck exclusively. The first, second and third drawn cards map to
/// Past, Present and Future respectively, and that assignment never changes
/// once made.
#[derive(Debug)]
pub struct DrawSession {
    deck: Deck,
    cursor: usize,
    drawn: Vec<&'static CardDefinition>,
    selection_marks: HashSet<SlotId>,
}

impl DrawSession {
    /// Starts a session over a freshly shuffled deck using thread-local
    /// randomness.
    pub fn new() -> Self {
        Self::with_rng(&mut rand::thread_rng())
    }

    /// Starts a session with a caller-supplied random source.
    pub fn with_rng<R: Rng>(rng: &mut R) -> Self {
        Self {
            deck: Deck::shuffled(rng),
            cursor: 0,
            drawn: Vec::with_capacity(SPREAD_SIZE),
            selection_marks: HashSet::new(),
        }
    }

    pub fn phase(&self) -> DrawPhase {
        match self.drawn.len() {
            0 => DrawPhase::Empty,
            n if n < SPREAD_SIZE => DrawPhase::Drawing,
            _ => DrawPhase::Complete,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase() == DrawPhase::Complete
    }

    /// Handles one click on a spread slot.
    ///
    /// Returns the newly drawn card, or `None` when the click is ignored:
    /// either the spread is already complete or this slot was consumed
    /// before. Ignored clicks change nothing, so a double-click on the same
    /// slot is harmless.
    pub fn select_slot(&mut self, slot: SlotId) -> Option<&'static CardDefinition> {
        if self.is_complete() || self.selection_marks.contains(&slot) {
            return None;
        }

        assert_eq!(self.cursor, self.drawn.len(), "cursor desynchronized from drawn cards");
        assert!(self.cursor < self.deck.len(), "draw past the end of the deck");

        let card = self.deck.card_at(self.cursor);
        self.drawn.push(card);
        self.cursor += 1;
        self.selection_marks.insert(slot);
        Some(card)
    }

    /// The cards drawn so far, in draw (Past, Present, Future) order.
    pub fn drawn_cards(&self) -> &[&'static CardDefinition] {
        &self.drawn
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selection_marks(&self) -> &HashSet<SlotId> {
        &self.selection_marks
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Discards all state and reshuffles a brand-new deck, returning the
    /// session to `Empty`.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.deck = Deck::shuffled(rng);
        self.cursor = 0;
        self.drawn.clear();
        self.selection_marks.clear();
    }
}

impl Default for DrawSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(seed: u64) -> DrawSession {
        let mut rng = StdRng::seed_from_u64(seed);
        DrawSession::with_rng(&mut rng)
    }

    #[test]
    fn starts_empty() {
        let s = session(1);
        assert_eq!(s.phase(), DrawPhase::Empty);
        assert!(s.drawn_cards().is_empty());
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn three_picks_draw_three_distinct_cards_in_cursor_order() {
        let mut s = session(2);
        let expected: Vec<&str> = (0..3).map(|i| s.deck().card_at(i).id.as_str()).collect();

        assert!(s.select_slot(14).is_some());
        assert_eq!(s.phase(), DrawPhase::Drawing);
        assert!(s.select_slot(3).is_some());
        assert!(s.select_slot(29).is_some());
        assert_eq!(s.phase(), DrawPhase::Complete);

        let drawn: Vec<&str> = s.drawn_cards().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(drawn, expected, "cards come from strictly increasing cursor positions");

        let unique: std::collections::HashSet<&str> = drawn.iter().copied().collect();
        assert_eq!(unique.len(), 3, "no card repeats within a session");
        assert_eq!(s.cursor(), 3);
    }

    #[test]
    fn positional_order_follows_draw_order_not_slot_indices() {
        // High slot index first: the first pick is still the Past card.
        let mut s = session(3);
        let first = s.deck().card_at(0).id.clone();
        s.select_slot(39);
        s.select_slot(0);
        s.select_slot(7);
        assert_eq!(s.drawn_cards()[0].id, first);
    }

    #[test]
    fn reclicking_a_consumed_slot_is_a_no_op() {
        let mut s = session(4);
        assert!(s.select_slot(5).is_some());
        let drawn_before: Vec<&str> = s.drawn_cards().iter().map(|c| c.id.as_str()).collect();

        assert!(s.select_slot(5).is_none());
        let drawn_after: Vec<&str> = s.drawn_cards().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(drawn_before, drawn_after);
        assert_eq!(s.cursor(), 1);
        assert_eq!(s.selection_marks().len(), 1);
    }

    #[test]
    fn selections_after_complete_are_ignored() {
        let mut s = session(5);
        s.select_slot(1);
        s.select_slot(2);
        s.select_slot(3);
        assert!(s.is_complete());

        assert!(s.select_slot(4).is_none());
        assert_eq!(s.drawn_cards().len(), SPREAD_SIZE);
        assert_eq!(s.cursor(), SPREAD_SIZE);
        assert_eq!(s.selection_marks().len(), SPREAD_SIZE);
    }

    #[test]
    fn reset_reshuffles_a_fresh_deck_and_clears_state() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut s = DrawSession::with_rng(&mut rng);
        s.select_slot(1);
        s.select_slot(2);
        s.select_slot(3);

        let old_order: Vec<&str> = s.deck().cards().iter().map(|c| c.id.as_str()).collect();
        s.reset(&mut rng);

        assert_eq!(s.phase(), DrawPhase::Empty);
        assert!(s.drawn_cards().is_empty());
        assert!(s.selection_marks().is_empty());
        assert_eq!(s.cursor(), 0);

        let new_order: Vec<&str> = s.deck().cards().iter().map(|c| c.id.as_str()).collect();
        assert_ne!(old_order, new_order, "reset must produce a fresh shuffle");
    }
}
