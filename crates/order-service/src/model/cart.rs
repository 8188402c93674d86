use crate::model::{CartItemId, ProductId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// One pending line in a user's cart.
///
/// There is at most one line per (user, product) pair; adding the same product again
/// merges into the existing line. `unit_price` is the catalog price seen the last time
/// the line was touched, kept for display only. Checkout always re-reads the price.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    pub fn belongs_to(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    pub fn is_for(&self, user_id: &UserId, product_id: &ProductId) -> bool {
        self.belongs_to(user_id) && &self.product_id == product_id
    }
}

/// Payload for the first add of a product to a cart.
#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// Merge applied when the product is already in the cart: the quantity grows by
/// `delta` and the price is replaced, never averaged.
#[derive(Debug, Clone)]
pub struct CartItemUpdate {
    pub delta: u32,
    pub unit_price: Decimal,
}
