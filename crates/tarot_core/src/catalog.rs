//! crates/tarot_core/src/catalog.rs
//!
//! The static 78-card catalog: loaded once from the embedded JSON asset,
//! never mutated, and shared read-only by every session.

use crate::domain::CardDefinition;
use std::sync::LazyLock;

/// The expected number of cards in a full tarot deck.
pub const CATALOG_SIZE: usize = 78;

static CARDS_JSON: &str = include_str!("../assets/cards.json");

static CATALOG: LazyLock<Vec<CardDefinition>> = LazyLock::new(|| {
    let cards: Vec<CardDefinition> =
        serde_json::from_str(CARDS_JSON).expect("embedded card catalog is not valid JSON");

    // The rest of the crate relies on these two facts; a corrupt asset is a
    // build defect, so fail at first access instead of limping along.
    assert_eq!(
        cards.len(),
        CATALOG_SIZE,
        "embedded card catalog must contain exactly {CATALOG_SIZE} cards"
    );
    let mut ids: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), CATALOG_SIZE, "card catalog ids must be unique");

    cards
});

/// Returns the full card catalog in its canonical (unshuffled) order.
pub fn catalog() -> &'static [CardDefinition] {
    &CATALOG
}

/// Looks up a single card by its stable id.
pub fn card_by_id(id: &str) -> Option<&'static CardDefinition> {
    CATALOG.iter().find(|c| c.id == id)
}
