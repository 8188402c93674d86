//! # Cart Service
//!
//! Add, list and remove cart lines on behalf of a user. Adding validates the user and
//! the product against their services first and stores the product's current price.

use super::{ServiceError, UserLocks};
use crate::clients::CartClient;
use crate::lookup::{CallPolicy, ProductCatalog, UserDirectory};
use crate::model::{CartItem, ProductId, UserId};
use crate::response::CartItemResponse;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct CartService {
    carts: CartClient,
    users: Arc<dyn UserDirectory>,
    products: Arc<dyn ProductCatalog>,
    policy: CallPolicy,
    locks: Option<UserLocks>,
}

impl CartService {
    pub fn new(
        carts: CartClient,
        users: Arc<dyn UserDirectory>,
        products: Arc<dyn ProductCatalog>,
        policy: CallPolicy,
        locks: Option<UserLocks>,
    ) -> Self {
        Self {
            carts,
            users,
            products,
            policy,
            locks,
        }
    }

    /// Adds `quantity` units of a product to the user's cart.
    ///
    /// The stock check covers the requested quantity only; checkout re-checks the
    /// whole line against the stock at that time.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn add_to_cart(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartItem, ServiceError> {
        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or(ServiceError::InvalidQuantity(quantity))?;

        self.policy
            .call("user", || self.users.get_user(user_id))
            .await
            .map_err(ServiceError::unavailable("user"))?
            .ok_or_else(|| ServiceError::UserNotFound(user_id.clone()))?;

        let product = self
            .policy
            .call("product", || self.products.get_product(product_id))
            .await
            .map_err(ServiceError::unavailable("product"))?
            .ok_or_else(|| ServiceError::ProductNotFound(product_id.clone()))?;

        if product.stock_quantity < quantity {
            return Err(ServiceError::InsufficientStock {
                product_id: product_id.clone(),
                requested: quantity,
                available: product.stock_quantity,
            });
        }

        let _guard = match &self.locks {
            Some(locks) => Some(locks.lock(user_id).await),
            None => None,
        };
        let item = self
            .carts
            .upsert(user_id, product_id, quantity, product.price)
            .await?;
        info!(item_id = %item.id, quantity = item.quantity, unit_price = %item.unit_price, "Cart updated");
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn get_cart(&self, user_id: &UserId) -> Result<Vec<CartItemResponse>, ServiceError> {
        let items = self.carts.list_by_user(user_id).await?;
        debug!(count = items.len(), "Cart loaded");
        Ok(items.iter().map(CartItemResponse::from).collect())
    }

    /// Removes the user's line for the product. `false` when there was none.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<bool, ServiceError> {
        let _guard = match &self.locks {
            Some(locks) => Some(locks.lock(user_id).await),
            None => None,
        };
        let Some(item) = self
            .carts
            .find_by_user_and_product(user_id, product_id)
            .await?
        else {
            debug!("No cart line to remove");
            return Ok(false);
        };
        let removed = self.carts.delete_item(&item).await?;
        info!(item_id = %item.id, removed, "Cart line removed");
        Ok(removed)
    }
}
