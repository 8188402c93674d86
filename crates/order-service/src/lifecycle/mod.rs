//! # System Lifecycle
//!
//! Starting, wiring and stopping the actors behind the service.
//!
//! ## Wiring
//!
//! ```text
//! UserClient ----+--> CartService -----+
//! ProductClient -+                     +--> AppState --> router
//! CartClient ----+--> CheckoutService -+
//! OrderClient ---+        |
//!                         +--> BroadcastPublisher --> notification listener
//! ```
//!
//! The user and product clients reach the services as `Arc<dyn UserDirectory>` and
//! `Arc<dyn ProductCatalog>`, so a deployment against remote services only swaps
//! those two values.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of every channel
//! 2. **Tasks detect closure** - `recv()` returns `None` / `Closed`
//! 3. **Await completion** - [`OrderSystem::shutdown`] joins every task
//!
//! The dependency graph is acyclic (no store holds another store's client), so
//! channel closure is enough to stop everything.

pub mod order_system;
pub mod seed;

pub use order_system::*;
pub use seed::*;
