//! # Order Client
//!
//! The order store contract: insert and reads, nothing else.
use super::recover_entity_error;
use crate::model::{NewOrder, Order, OrderId, UserId};
use crate::order_actor::OrderError;
use actor_framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the order store.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Persists the order and returns it with its assigned id.
    #[instrument(skip(self, order), fields(user_id = %order.user_id, lines = order.lines.len()))]
    pub async fn insert(&self, order: NewOrder) -> Result<Order, OrderError> {
        debug!(?order, "insert called");
        self.inner.create(order).await.map_err(Self::map_error)
    }

    pub async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        self.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let user_id = user_id.clone();
        let filter = Filter::new(format!("user_id={user_id}"), move |order: &Order| {
            order.user_id == user_id
        });
        self.inner.query(filter).await.map_err(Self::map_error)
    }

    pub async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        self.all().await
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        recover_entity_error(e, OrderError::ActorCommunicationError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewOrderLine, OrderStatus, ProductId};
    use rust_decimal::Decimal;

    fn spawn_orders() -> OrderClient {
        let (actor, client) = crate::order_actor::new(8);
        tokio::spawn(actor.run(()));
        client
    }

    fn order_for(user: &str, lines: Vec<(&str, u32)>) -> NewOrder {
        NewOrder {
            user_id: UserId::from(user),
            status: OrderStatus::Confirmed,
            lines: lines
                .into_iter()
                .map(|(product, quantity)| NewOrderLine {
                    product_id: ProductId::from(product),
                    quantity,
                    unit_price: Decimal::new(500, 2),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookups() {
        let orders = spawn_orders();

        let first = orders.insert(order_for("U1", vec![("P1", 1)])).await.unwrap();
        orders.insert(order_for("U2", vec![("P1", 2)])).await.unwrap();
        let third = orders.insert(order_for("U1", vec![("P2", 3)])).await.unwrap();

        assert_eq!(first.id, OrderId(1));
        assert_eq!(orders.find_by_id(third.id).await.unwrap(), Some(third.clone()));
        assert_eq!(orders.find_by_id(OrderId(99)).await.unwrap(), None);

        let mine: Vec<OrderId> = orders
            .find_by_user(&UserId::from("U1"))
            .await
            .unwrap()
            .iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(mine, vec![OrderId(1), OrderId(3)]);
        assert_eq!(orders.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_order_rejected_by_store() {
        let orders = spawn_orders();

        let result = orders.insert(order_for("U1", vec![])).await;
        assert_eq!(result, Err(OrderError::EmptyOrder));
        assert!(orders.list_all().await.unwrap().is_empty());
    }
}
