//! A catalog entry with its current price and stock level.
//!
//! # Actor Framework
//! This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
//!
//! Price and stock can drift between the moment a product is added to a cart and
//! the moment the cart is checked out; [`ProductUpdate`] is how that drift happens.

use crate::model::ProductId;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

/// Payload for adding a product to the catalog.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }
}

/// Partial update of price and stock.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
}
