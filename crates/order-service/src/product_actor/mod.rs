//! # Product Actor
//!
//! In-process stand-in for the product catalog: products with a current price and a
//! stock level. Both can be changed with [`ProductUpdate`](crate::model::ProductUpdate),
//! which is how tests model a price rise or a sell-out between add-to-cart and
//! checkout. Checkout only reads stock; nothing here reserves or decrements it.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use order_service::product_actor;
//! use order_service::model::{ProductCreate, ProductUpdate};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_actor::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let widget = client
//!         .create_product(ProductCreate::new("Widget", Decimal::new(2999, 2), 100))
//!         .await?;
//!     let widget = client
//!         .update_product(widget.id, ProductUpdate { stock: Some(3), ..Default::default() })
//!         .await?;
//!     assert_eq!(widget.stock, 3);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use actor_framework::ResourceActor;

/// Creates a new Product actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer);
    (actor, ProductClient::new(generic_client))
}
