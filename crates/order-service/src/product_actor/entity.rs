//! [`ActorEntity`] implementation for [`Product`].
//!
//! See the trait implementation on [`Product`] for method documentation.

use super::ProductError;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Context = ();
    type Error = ProductError;

    /// Creates a new Product from creation parameters.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        if params.price.is_sign_negative() {
            return Err(ProductError::InvalidPrice(params.price));
        }
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            stock: params.stock,
        })
    }

    /// Handles updates to the Product entity.
    ///
    /// # Fields Updated
    /// - `price`: current catalog price
    /// - `stock`: units available
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(price) = update.price {
            if price.is_sign_negative() {
                return Err(ProductError::InvalidPrice(price));
            }
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        Ok(())
    }
}
