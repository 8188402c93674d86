//! # Order Actor
//!
//! The order store. Supports insert and reads only; see [`entity`] for why updates
//! cannot be expressed.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use actor_framework::ResourceActor;

/// Creates a new order store actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer);
    (actor, OrderClient::new(generic_client))
}
