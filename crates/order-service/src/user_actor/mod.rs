//! # User Actor
//!
//! In-process stand-in for the user directory. Checkout and the cart service never
//! talk to this actor directly; they see it through the
//! [`UserDirectory`](crate::lookup::UserDirectory) trait implemented by
//! [`UserClient`].
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`User`]
//! - [`error`] - [`UserError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use order_service::user_actor;
//! use order_service::lookup::UserDirectory;
//! use order_service::model::UserCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = user_actor::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let user = client.create_user(UserCreate::new("Alice", "alice@example.com")).await?;
//!     assert_eq!(user.id.as_str(), "user_1");
//!     assert!(client.get_user(&user.id).await?.is_some());
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::model::User;
use actor_framework::ResourceActor;

/// Creates a new User actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(buffer);
    (actor, UserClient::new(generic_client))
}
