//! Application services: cart editing and checkout.
//!
//! Both talk to the stores through their clients and to the user directory and
//! product catalog only through the [`lookup`](crate::lookup) traits.

pub mod cart_service;
pub mod checkout;
pub mod error;
pub mod locks;

pub use cart_service::CartService;
pub use checkout::{Checkout, CheckoutOptions, CheckoutReceipt, CheckoutService};
pub use error::ServiceError;
pub use locks::{UserLockGuard, UserLocks};
