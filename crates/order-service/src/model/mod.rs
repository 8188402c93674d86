//! Domain records kept by the stores, plus their creation and update payloads.

mod cart;
mod ids;
mod order;
mod product;
mod user;

pub use cart::*;
pub use ids::*;
pub use order::*;
pub use product::*;
pub use user::*;
