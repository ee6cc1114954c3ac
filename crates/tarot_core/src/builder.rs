//! crates/tarot_core/src/builder.rs
//!
//! Pure construction of a [`ReadingRequest`] from the question, the three
//! drawn cards and the caller-resolved localization inputs. No I/O, no
//! hidden defaulting: anything missing is a [`ValidationError`] naming the
//! field so the caller can fix its inputs before the generation service is
//! ever contacted.

use crate::domain::{
    CardDefinition, CardSnapshot, Locale, ReadingRequest, SpreadLabels, UserProfile,
};
use std::fmt;

/// A position in the three-card spread, plus the closing section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Past,
    Present,
    Future,
    Conclusion,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Past => "past",
            Position::Present => "present",
            Position::Future => "future",
            Position::Conclusion => "conclusion",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reading request could not be assembled from the given inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field: question")]
    MissingQuestion,
    #[error("missing required field: {0} card")]
    MissingCard(Position),
    #[error("missing required field: {0} label")]
    MissingLabel(Position),
    #[error("missing required field: language name")]
    MissingLanguageName,
}

/// Builds the immutable request for one reading.
///
/// `drawn` is the session's draw-order card list; the first three entries
/// become the Past, Present and Future cards, localized into snapshots for
/// `locale`. Labels and the language display name come from the caller's
/// localization store.
pub fn build_request(
    question: &str,
    drawn: &[&CardDefinition],
    labels: SpreadLabels,
    user_info: Option<UserProfile>,
    locale: Locale,
    language_name: &str,
) -> Result<ReadingRequest, ValidationError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(ValidationError::MissingQuestion);
    }

    let card_at = |index: usize, position: Position| {
        drawn
            .get(index)
            .map(|card| CardSnapshot::from_card(card, locale))
            .ok_or(ValidationError::MissingCard(position))
    };
    let past_card = card_at(0, Position::Past)?;
    let present_card = card_at(1, Position::Present)?;
    let future_card = card_at(2, Position::Future)?;

    for (label, position) in [
        (&labels.past, Position::Past),
        (&labels.present, Position::Present),
        (&labels.future, Position::Future),
        (&labels.conclusion, Position::Conclusion),
    ] {
        if label.trim().is_empty() {
            return Err(ValidationError::MissingLabel(position));
        }
    }

    if language_name.trim().is_empty() {
        return Err(ValidationError::MissingLanguageName);
    }

    Ok(ReadingRequest {
        question: question.to_string(),
        past_card,
        present_card,
        future_card,
        labels,
        user_info,
        locale,
        language_name: language_name.to_string(),
    })
}
