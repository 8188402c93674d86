//! Error types for the cart store.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// Persisted lines always hold at least one unit.
    #[error("Invalid cart quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Invalid unit price: {0}")]
    NegativePrice(Decimal),

    #[error("Cart quantity overflow: {current} + {delta}")]
    QuantityOverflow { current: u32, delta: u32 },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
