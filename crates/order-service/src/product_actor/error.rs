//! Error types for the Product actor.

use crate::model::ProductId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Prices must not be negative.
    #[error("Invalid price: {0}")]
    InvalidPrice(Decimal),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
