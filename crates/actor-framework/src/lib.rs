//! # Actor Framework
//!
//! Building blocks for keeping typed, in-memory record stores behind actors. Each store
//! is a Tokio task that owns its records outright; everything else talks to it through
//! a cloneable client over a channel.
//!
//! ## Why Actors for Stores?
//!
//! - Isolated state (no shared memory, no locks around the map)
//! - Requests are served one at a time, so "find, then merge or insert" is atomic
//! - Each store can be swapped for a scripted [`mock::MockClient`] in tests
//!
//! Coordination *across* stores (e.g. a checkout that reads a cart, writes an order and
//! clears the cart) is not atomic and is left to the calling service.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the record type, its payloads and validation hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - the task that owns the store
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed requests
//!
//! ## Requests
//!
//! | Request | Answer |
//! |---------|--------|
//! | `create(params)` | the stored record with its minted id |
//! | `get(id)` | `Option<T>` |
//! | `update(id, update)` | the updated record, `NotFound` if absent |
//! | `delete(id)` | the removed record, `None` if already gone |
//! | `query(filter)` | matches in insertion order |
//! | `upsert(filter, create, update)` | merged or newly created record |
//! | `delete_where(filter)` | number of removed records |
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::{ActorEntity, Filter, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Line {
//!     id: u32,
//!     sku: String,
//!     quantity: u32,
//! }
//!
//! #[derive(Debug)] struct LineCreate { sku: String, quantity: u32 }
//! #[derive(Debug)] struct AddQuantity(u32);
//! #[derive(Debug, thiserror::Error)] #[error("quantity must be positive")] struct LineError;
//!
//! #[async_trait]
//! impl ActorEntity for Line {
//!     type Id = u32;
//!     type Create = LineCreate;
//!     type Update = AddQuantity;
//!     type Context = ();
//!     type Error = LineError;
//!
//!     fn from_create_params(id: u32, params: LineCreate) -> Result<Self, Self::Error> {
//!         if params.quantity == 0 {
//!             return Err(LineError);
//!         }
//!         Ok(Self { id, sku: params.sku, quantity: params.quantity })
//!     }
//!
//!     async fn on_update(&mut self, update: AddQuantity, _ctx: &()) -> Result<(), Self::Error> {
//!         self.quantity += update.0;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Line>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let by_sku = || Filter::new("sku=A", |l: &Line| l.sku == "A");
//!     client.upsert(by_sku(), LineCreate { sku: "A".into(), quantity: 2 }, AddQuantity(2)).await.unwrap();
//!     let line = client
//!         .upsert(by_sku(), LineCreate { sku: "A".into(), quantity: 3 }, AddQuantity(3))
//!         .await
//!         .unwrap();
//!     assert_eq!(line.quantity, 5);
//! }
//! ```
//!
//! ## Testing
//!
//! See the [`mock`] module for `MockClient`, which answers client requests from a script
//! so that failure paths can be exercised without a real store.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
