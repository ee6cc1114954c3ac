//! crates/tarot_core/src/deck.rs
//!
//! The shuffle engine and the per-session deck: one full, unbiased
//! permutation of the 78-card catalog.

use crate::catalog::{self, CATALOG_SIZE};
use crate::domain::CardDefinition;
use rand::Rng;

/// Shuffles a slice in place with Fisher-Yates.
///
/// Walks from the last index down to 1, swapping each element with a
/// uniformly chosen one at or below it. Every permutation is equally likely
/// given a uniform `rng`; a comparator-based shuffle would not be.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// One shuffled ordering of the catalog, owned by a single draw session.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<&'static CardDefinition>,
}

impl Deck {
    /// Builds a freshly shuffled deck over the full catalog.
    pub fn shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut cards: Vec<&'static CardDefinition> = catalog::catalog().iter().collect();
        shuffle(&mut cards, rng);
        debug_assert_eq!(cards.len(), CATALOG_SIZE);
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card at a given cursor position.
    ///
    /// Panics if `index` is out of range; the draw session stops far short
    /// of the deck's end, so an overrun is a programming error.
    pub fn card_at(&self, index: usize) -> &'static CardDefinition {
        self.cards[index]
    }

    pub fn cards(&self) -> &[&'static CardDefinition] {
        &self.cards
    }
}
