//! services/api/src/web/protocol.rs
//!
//! The request and response payloads exchanged with the UI.

use serde::{Deserialize, Serialize};
use tarot_core::domain::{CardDefinition, Locale, Reading, UserProfile};
use tarot_core::ports::ReadingResult;
use tarot_core::session::{DrawPhase, DrawSession, SlotId};
use uuid::Uuid;

/// One click on a spread slot.
#[derive(Debug, Deserialize)]
pub struct SelectSlotPayload {
    pub slot: SlotId,
    #[serde(default)]
    pub locale: Locale,
}

/// A question submitted against a completed draw.
#[derive(Debug, Deserialize)]
pub struct ReadingPayload {
    pub question: String,
    #[serde(default)]
    pub locale: Locale,
    pub profile: Option<UserProfile>,
}

/// A drawn card as shown to the user once the spread is complete.
#[derive(Debug, Serialize)]
pub struct DrawnCardView {
    pub id: String,
    pub name: String,
    pub image: String,
}

impl DrawnCardView {
    fn new(card: &CardDefinition, locale: Locale) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.get(locale).to_string(),
            image: card.image.clone(),
        }
    }
}

/// The state of one draw session after any mutation.
#[derive(Debug, Serialize)]
pub struct DrawStateResponse {
    pub draw_id: Uuid,
    pub phase: &'static str,
    pub cards_drawn: usize,
    /// Populated only once the spread is complete; the deck order stays
    /// hidden until then.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawn_cards: Option<Vec<DrawnCardView>>,
}

impl DrawStateResponse {
    pub fn from_session(draw_id: Uuid, session: &DrawSession, locale: Locale) -> Self {
        let phase = match session.phase() {
            DrawPhase::Empty => "empty",
            DrawPhase::Drawing => "drawing",
            DrawPhase::Complete => "complete",
        };
        let drawn_cards = session.is_complete().then(|| {
            session
                .drawn_cards()
                .iter()
                .map(|card| DrawnCardView::new(card, locale))
                .collect()
        });
        Self {
            draw_id,
            phase,
            cards_drawn: session.drawn_cards().len(),
            drawn_cards,
        }
    }
}

/// The tagged outcome of a generation call, in wire form.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ReadingResponse {
    Success { reading: Reading },
    Failure { error: String },
}

impl From<ReadingResult> for ReadingResponse {
    fn from(result: ReadingResult) -> Self {
        match result {
            ReadingResult::Success(reading) => ReadingResponse::Success { reading },
            ReadingResult::Failure { message } => ReadingResponse::Failure { error: message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn drawn_cards_stay_hidden_until_the_spread_is_complete() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut session = DrawSession::with_rng(&mut rng);
        let draw_id = Uuid::new_v4();

        session.select_slot(0);
        let state = DrawStateResponse::from_session(draw_id, &session, Locale::En);
        assert_eq!(state.phase, "drawing");
        assert_eq!(state.cards_drawn, 1);
        assert!(state.drawn_cards.is_none());

        session.select_slot(1);
        session.select_slot(2);
        let state = DrawStateResponse::from_session(draw_id, &session, Locale::En);
        assert_eq!(state.phase, "complete");
        let cards = state.drawn_cards.expect("cards revealed once complete");
        assert_eq!(cards.len(), 3);
        assert!(!cards[0].name.is_empty());
    }

    #[test]
    fn reading_response_is_tagged_by_status() {
        let failure = ReadingResponse::from(ReadingResult::Failure {
            message: "the spirits are busy".to_string(),
        });
        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value["status"], "failure");
        assert_eq!(value["error"], "the spirits are busy");
    }
}
