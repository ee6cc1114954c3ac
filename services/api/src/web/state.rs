//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use std::collections::HashMap;
use std::sync::Arc;
use tarot_core::ports::ReadingGenerationService;
use tarot_core::session::DrawSession;
use tokio::sync::Mutex;
use uuid::Uuid;

/// The shared application state, created once at startup and passed to all
/// handlers.
///
/// Draw sessions live only in memory and only for the lifetime of the
/// process; each one owns its deck exclusively, so the single map lock is
/// the only synchronization needed.
pub struct AppState {
    pub config: Arc<Config>,
    pub reading_adapter: Arc<dyn ReadingGenerationService>,
    pub draws: Mutex<HashMap<Uuid, DrawSession>>,
}

impl AppState {
    pub fn new(config: Arc<Config>, reading_adapter: Arc<dyn ReadingGenerationService>) -> Self {
        Self {
            config,
            reading_adapter,
            draws: Mutex::new(HashMap::new()),
        }
    }
}
