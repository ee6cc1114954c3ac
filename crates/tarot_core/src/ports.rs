//! crates/tarot_core/src/ports.rs
//!
//! Defines the service contract (trait) for reading generation.
//! This trait forms the boundary of the hexagonal architecture, allowing the
//! core to be independent of the concrete text-generation backend.

use crate::domain::{Reading, ReadingRequest};
use async_trait::async_trait;

/// Why a generation attempt failed, before it is flattened into the
/// caller-visible [`ReadingResult::Failure`].
///
/// Transport and content-shape failures are kept apart for logging; callers
/// only ever see the flattened message.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The service could not be reached or rejected the call (network,
    /// auth, HTTP status).
    #[error("the reading service could not be reached: {0}")]
    Transport(String),
    /// The service answered, but the content did not match the required
    /// output shape.
    #[error("the reading could not be generated: {0}")]
    Schema(String),
}

/// The single, uniform outcome type callers branch on.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadingResult {
    Success(Reading),
    Failure { message: String },
}

impl ReadingResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ReadingResult::Success(_))
    }
}

impl From<GenerationError> for ReadingResult {
    fn from(err: GenerationError) -> Self {
        ReadingResult::Failure {
            message: err.to_string(),
        }
    }
}

/// The port for the external text-generation dependency.
///
/// Implementations must convert every internal failure into
/// [`ReadingResult::Failure`]; no error escapes this boundary. Repeated
/// calls with the same request may produce different prose; only the shape
/// of a success is stable.
#[async_trait]
pub trait ReadingGenerationService: Send + Sync {
    /// Turns a validated request into a structured reading or a failure.
    async fn generate(&self, request: &ReadingRequest) -> ReadingResult;
}
