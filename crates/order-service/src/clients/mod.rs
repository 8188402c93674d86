//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each wrapper turns framework errors back into its entity's error: validation
//! failures raised inside the actor come back as the entity error they started as,
//! everything else becomes `ActorCommunicationError`.

pub mod cart_client;
pub mod order_client;
pub mod product_client;
pub mod user_client;

pub use cart_client::*;
pub use order_client::*;
pub use product_client::*;
pub use user_client::*;

use actor_framework::FrameworkError;

/// Recovers the entity error wrapped by the actor, or builds a communication error.
pub(crate) fn recover_entity_error<E>(e: FrameworkError, communication: fn(String) -> E) -> E
where
    E: std::error::Error + 'static,
{
    match e {
        FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
            Ok(entity_error) => *entity_error,
            Err(other) => communication(other.to_string()),
        },
        other => communication(other.to_string()),
    }
}
