//! Error types for the order store.

use crate::model::ProductId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order has no items")]
    EmptyOrder,

    #[error("Invalid order line for product {0}")]
    InvalidLine(ProductId),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
