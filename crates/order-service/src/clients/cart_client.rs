//! # Cart Client
//!
//! The cart store contract on top of `ResourceClient<CartItem>`. Lookups by user and by
//! (user, product) are filters evaluated inside the actor.
use super::recover_entity_error;
use crate::cart_actor::CartError;
use crate::model::{CartItem, CartItemUpdate, NewCartItem, ProductId, UserId};
use actor_framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Client for the cart store.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<CartItem>,
}

fn owned_by(user_id: &UserId) -> Filter<CartItem> {
    let user_id = user_id.clone();
    Filter::new(format!("user_id={user_id}"), move |item: &CartItem| {
        item.belongs_to(&user_id)
    })
}

fn line_for(user_id: &UserId, product_id: &ProductId) -> Filter<CartItem> {
    let (user_id, product_id) = (user_id.clone(), product_id.clone());
    Filter::new(
        format!("user_id={user_id},product_id={product_id}"),
        move |item: &CartItem| item.is_for(&user_id, &product_id),
    )
}

impl CartClient {
    pub fn new(inner: ResourceClient<CartItem>) -> Self {
        Self { inner }
    }

    /// Adds `quantity` units to the user's line for the product, creating the line if
    /// needed. The line's price becomes `unit_price` either way.
    #[instrument(skip(self))]
    pub async fn upsert(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: u32,
        unit_price: Decimal,
    ) -> Result<CartItem, CartError> {
        debug!("Sending request");
        let create = NewCartItem {
            user_id: user_id.clone(),
            product_id: product_id.clone(),
            quantity,
            unit_price,
        };
        let update = CartItemUpdate {
            delta: quantity,
            unit_price,
        };
        self.inner
            .upsert(line_for(user_id, product_id), create, update)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_by_user_and_product(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<Option<CartItem>, CartError> {
        debug!("Sending request");
        let mut matches = self
            .inner
            .query(line_for(user_id, product_id))
            .await
            .map_err(Self::map_error)?;
        Ok(matches.pop())
    }

    /// The user's lines in the order they were first added.
    #[instrument(skip(self))]
    pub async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<CartItem>, CartError> {
        debug!("Sending request");
        self.inner
            .query(owned_by(user_id))
            .await
            .map_err(Self::map_error)
    }

    /// Removes one line. `false` when it was already gone.
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn delete_item(&self, item: &CartItem) -> Result<bool, CartError> {
        debug!("Sending request");
        self.inner
            .delete(item.id)
            .await
            .map(|removed| removed.is_some())
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn delete_all_for_user(&self, user_id: &UserId) -> Result<usize, CartError> {
        debug!("Sending request");
        self.inner
            .delete_where(owned_by(user_id))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<CartItem> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<CartItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        recover_entity_error(e, CartError::ActorCommunicationError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;

    fn spawn_carts() -> CartClient {
        let (actor, client) = crate::cart_actor::new(8);
        tokio::spawn(actor.run(()));
        client
    }

    fn price(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_upsert_merges_and_refreshes_price() {
        let carts = spawn_carts();
        let (u1, p1) = (UserId::from("U1"), ProductId::from("P1"));

        let first = carts.upsert(&u1, &p1, 2, price("10.00")).await.unwrap();
        let merged = carts.upsert(&u1, &p1, 3, price("12.00")).await.unwrap();

        assert_eq!(merged.id, first.id);
        assert_eq!(merged.quantity, 5);
        assert_eq!(merged.unit_price, price("12.00"));
        assert_eq!(merged.line_total(), price("60.00"));
        assert!(merged.updated_at >= first.updated_at);
        assert_eq!(carts.list_by_user(&u1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_lines_are_per_user() {
        let carts = spawn_carts();
        let (u1, u2) = (UserId::from("U1"), UserId::from("U2"));
        let (p1, p2) = (ProductId::from("P1"), ProductId::from("P2"));

        carts.upsert(&u1, &p2, 1, price("15.00")).await.unwrap();
        carts.upsert(&u2, &p1, 1, price("10.00")).await.unwrap();
        carts.upsert(&u1, &p1, 2, price("10.00")).await.unwrap();

        let products: Vec<String> = carts
            .list_by_user(&u1)
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.product_id.0)
            .collect();
        assert_eq!(products, vec!["P2", "P1"]);

        assert!(carts.find_by_user_and_product(&u2, &p2).await.unwrap().is_none());
        assert_eq!(carts.delete_all_for_user(&u1).await.unwrap(), 2);
        assert_eq!(carts.list_by_user(&u2).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_item_is_idempotent() {
        let carts = spawn_carts();
        let item = carts
            .upsert(&UserId::from("U1"), &ProductId::from("P1"), 1, price("1.00"))
            .await
            .unwrap();

        assert!(carts.delete_item(&item).await.unwrap());
        assert!(!carts.delete_item(&item).await.unwrap());
    }

    #[tokio::test]
    async fn test_zero_quantity_never_persisted() {
        let carts = spawn_carts();
        let (u1, p1) = (UserId::from("U1"), ProductId::from("P1"));

        let result = carts.upsert(&u1, &p1, 0, price("1.00")).await;
        assert_eq!(result, Err(CartError::InvalidQuantity(0)));
        assert!(carts.list_by_user(&u1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_overflowing_merge_keeps_line() {
        let carts = spawn_carts();
        let (u1, p1) = (UserId::from("U1"), ProductId::from("P1"));
        carts.upsert(&u1, &p1, u32::MAX, price("1.00")).await.unwrap();

        let result = carts.upsert(&u1, &p1, 1, price("2.00")).await;
        assert!(matches!(result, Err(CartError::QuantityOverflow { .. })));

        let line = carts.find_by_user_and_product(&u1, &p1).await.unwrap().unwrap();
        assert_eq!(line.quantity, u32::MAX);
        assert_eq!(line.unit_price, price("1.00"));
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_communication_error() {
        let mut mock = MockClient::<CartItem>::new();
        mock.expect_delete_where()
            .return_err(FrameworkError::ActorClosed);
        let carts = CartClient::new(mock.client());

        let result = carts.delete_all_for_user(&UserId::from("U1")).await;
        assert!(matches!(result, Err(CartError::ActorCommunicationError(_))));
        mock.verify();
    }
}
