//! # Framework Errors
//!
//! Errors raised by the store engine itself, independent of any entity.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    /// The actor's receiver is gone; the store has shut down.
    #[error("Actor closed")]
    ActorClosed,
    /// The actor accepted the request but never answered.
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// An entity hook rejected the request.
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
