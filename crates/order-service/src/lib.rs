//! # Order Service
//!
//! Cart management and checkout for an online store.
//!
//! ## Core Components
//!
//! - **[model]**: Records kept by the stores ([`User`](model::User), [`Product`](model::Product),
//!   [`CartItem`](model::CartItem), [`Order`](model::Order)) and their ids.
//! - **Store actors** ([`user_actor`], [`product_actor`], [`cart_actor`], [`order_actor`]):
//!   one [`ResourceActor`](actor_framework::ResourceActor) per record type.
//! - **[clients]**: Typed wrappers over the store actors.
//! - **[lookup]**: The user directory and product catalog contracts, plus the
//!   timeout/retry policy used to call them.
//! - **[service]**: Cart editing and the checkout workflow.
//! - **[events]**: "Order created" notifications.
//! - **[http]**: The REST surface.
//! - **[lifecycle]**: Starting and stopping everything above.
//!
//! ## Testing
//!
//! See [`actor_framework::mock`] for driving a client without spawning its actor.

pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod events;
pub mod http;
pub mod lifecycle;
pub mod lookup;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod response;
pub mod service;
pub mod user_actor;
