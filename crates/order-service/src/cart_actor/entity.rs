//! [`ActorEntity`] implementation for [`CartItem`].

use super::CartError;
use crate::model::{CartItem, CartItemId, CartItemUpdate, NewCartItem};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl ActorEntity for CartItem {
    type Id = CartItemId;
    type Create = NewCartItem;
    type Update = CartItemUpdate;
    type Context = ();
    type Error = CartError;

    fn from_create_params(id: CartItemId, params: NewCartItem) -> Result<Self, Self::Error> {
        if params.quantity == 0 {
            return Err(CartError::InvalidQuantity(params.quantity));
        }
        if params.unit_price.is_sign_negative() {
            return Err(CartError::NegativePrice(params.unit_price));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            user_id: params.user_id,
            product_id: params.product_id,
            quantity: params.quantity,
            unit_price: params.unit_price,
            created_at: now,
            updated_at: now,
        })
    }

    /// Grows the quantity and refreshes the price. Checks run before any field is
    /// touched.
    async fn on_update(&mut self, update: CartItemUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if update.delta == 0 {
            return Err(CartError::InvalidQuantity(update.delta));
        }
        if update.unit_price.is_sign_negative() {
            return Err(CartError::NegativePrice(update.unit_price));
        }
        let quantity =
            self.quantity
                .checked_add(update.delta)
                .ok_or(CartError::QuantityOverflow {
                    current: self.quantity,
                    delta: update.delta,
                })?;

        self.quantity = quantity;
        self.unit_price = update.unit_price;
        self.updated_at = Utc::now();
        Ok(())
    }
}
