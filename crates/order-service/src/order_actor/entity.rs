//! [`ActorEntity`] implementation for [`Order`].
//!
//! Orders are append-only: `Update` is uninhabited, so the store offers no way to
//! change an order once it is inserted.

use super::OrderError;
use crate::model::{NewOrder, Order, OrderId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = NewOrder;
    type Update = Infallible;
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: NewOrder) -> Result<Self, Self::Error> {
        Order::new(id, params)
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }
}
