//! # Cart Actor
//!
//! The cart store: every user's pending lines live in one actor, at most one line per
//! (user, product). Merging a repeat add into the existing line happens inside the
//! actor through an upsert, so two concurrent adds for the same pair cannot create
//! duplicate lines.
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for
//!   [`CartItem`](crate::model::CartItem)
//! - [`error`] - [`CartError`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CartClient;
use crate::model::CartItem;
use actor_framework::ResourceActor;

/// Creates a new cart store actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<CartItem>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(buffer);
    (actor, CartClient::new(generic_client))
}
