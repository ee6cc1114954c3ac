pub mod builder;
pub mod catalog;
pub mod deck;
pub mod domain;
pub mod ports;
pub mod session;

pub use builder::{build_request, Position, ValidationError};
pub use catalog::{card_by_id, catalog, CATALOG_SIZE};
pub use deck::{shuffle, Deck};
pub use domain::{
    CardDefinition, CardSnapshot, Locale, LocalizedText, Reading, ReadingRequest, ReadingSection,
    SpreadLabels, UserProfile, WednesdayShift,
};
pub use ports::{GenerationError, ReadingGenerationService, ReadingResult};
pub use session::{DrawPhase, DrawSession, SlotId, SPREAD_SIZE};
