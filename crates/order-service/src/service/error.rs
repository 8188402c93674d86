//! Errors of the cart and checkout operations.

use crate::cart_actor::CartError;
use crate::lookup::LookupError;
use crate::model::{ProductId, UserId};
use crate::order_actor::OrderError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("Quantity must be a positive integer, got {0}")]
    InvalidQuantity(i64),

    /// The collaborator could not be reached within the call policy.
    #[error("{service} service unavailable: {source}")]
    Unavailable {
        service: &'static str,
        source: LookupError,
    },

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Order(#[from] OrderError),
}

impl ServiceError {
    pub(crate) fn unavailable(service: &'static str) -> impl FnOnce(LookupError) -> Self {
        move |source| Self::Unavailable { service, source }
    }

    /// How many units are missing, for `InsufficientStock`.
    pub fn shortfall(&self) -> Option<u32> {
        match self {
            Self::InsufficientStock {
                requested,
                available,
                ..
            } => Some(requested.saturating_sub(*available)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortfall() {
        let err = ServiceError::InsufficientStock {
            product_id: ProductId::from("P1"),
            requested: 2,
            available: 1,
        };
        assert_eq!(err.shortfall(), Some(1));
        assert_eq!(err.to_string(), "Insufficient stock for product P1: requested 2, available 1");
        assert_eq!(ServiceError::UserNotFound(UserId::from("U1")).shortfall(), None);
    }
}
