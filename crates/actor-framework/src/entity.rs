//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every stored record (cart line, order,
//! catalog product, directory user) implements to be owned by a `ResourceActor`.
//! It names the id type, the creation and update payloads, the runtime context and
//! the error type, and provides the lifecycle hooks (`on_create`, `on_update`,
//! `on_delete`) the actor calls around every mutation.
//!
//! # Invariants Live in the Entity
//! The actor never inspects the payloads. Whatever makes a record valid (positive
//! quantities, non-empty item lists, derived totals) is enforced inside
//! [`ActorEntity::from_create_params`] and [`ActorEntity::on_update`]. A hook that
//! returns `Err` leaves the store untouched.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored record must implement to be managed by a `ResourceActor`.
///
/// # Ids
/// The actor mints ids from a monotonically increasing `u32`, so `Id` must be
/// constructible `From<u32>`. The store keeps entities ordered by id, which makes
/// every listing come back in insertion order.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they may await other clients. The `Context` type
/// is handed to `run()` and passed to every hook ("late binding").
#[async_trait]
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// Store-assigned identifier.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload used to create a new record.
    type Create: Send + Sync + Debug;

    /// Payload used to mutate an existing record.
    ///
    /// Append-only records use [`std::convert::Infallible`] so that an update
    /// can never be constructed.
    type Update: Send + Sync + Debug;

    /// Runtime dependencies injected into the actor. Use `()` if none.
    type Context: Send + Sync;

    /// Error raised by the entity's own validation.
    ///
    /// One error type per entity rather than per request keeps client code to a
    /// single `match`.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the record from its assigned id and creation payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the record is built and before it is inserted.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update in place. Returning `Err` must leave `self` unchanged.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the record is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
