//! # ActorClient Trait
//!
//! Common read operations for resource-specific clients, built on top of a
//! generic `ResourceClient`. Writes stay on the concrete client so that each
//! store only exposes the mutations its domain allows.
use crate::{ActorEntity, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard read operations.
///
/// # Example
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Ticket { id: u32 }
/// #[derive(Debug)] struct TicketCreate;
/// #[derive(Debug, thiserror::Error)]
/// enum TicketError {
///     #[error("store error: {0}")]
///     Store(String),
/// }
///
/// #[async_trait]
/// impl ActorEntity for Ticket {
///     type Id = u32;
///     type Create = TicketCreate;
///     type Update = std::convert::Infallible;
///     type Context = ();
///     type Error = TicketError;
///
///     fn from_create_params(id: u32, _: TicketCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id })
///     }
///     async fn on_update(&mut self, update: Self::Update, _: &()) -> Result<(), Self::Error> {
///         match update {}
///     }
/// }
///
/// struct TicketClient {
///     inner: ResourceClient<Ticket>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Ticket> for TicketClient {
///     type Error = TicketError;
///
///     fn inner(&self) -> &ResourceClient<Ticket> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         TicketError::Store(e.to_string())
///     }
/// }
///
/// async fn usage(client: TicketClient) {
///     // get() and all() are provided automatically
///     let _ = client.get(1).await;
///     let _ = client.all().await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Every stored entity, in insertion order.
    #[tracing::instrument(skip(self))]
    async fn all(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().query(Filter::all()).await.map_err(Self::map_error)
    }
}
