//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the task that owns a store of entities
//! and serves every request against it sequentially.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest};
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns a collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`) and
/// the receiver end of the channel. Requests are handled one at a time, so every
/// mutation is visible to the next read without any `Mutex` around the store.
///
/// The store is a `BTreeMap` keyed by the minted id, so `Query` returns records in id
/// order. For ids whose ordering follows the counter (plain numbers) that is insertion
/// order; string ids such as `user_10` sort lexically.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2.  **Wire**: dependencies go into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in its own task.
///
/// ```rust
/// use actor_framework::{ActorEntity, Filter, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u32, owner: String }
/// #[derive(Debug)] struct NoteCreate { owner: String }
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = u32;
///     type Create = NoteCreate;
///     type Update = std::convert::Infallible;
///     type Context = ();
///     type Error = NoteError;
///
///     fn from_create_params(id: u32, params: NoteCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, owner: params.owner })
///     }
///     async fn on_update(&mut self, update: Self::Update, _: &()) -> Result<(), Self::Error> {
///         match update {}
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(10);
///     tokio::spawn(actor.run(()));
///
///     client.create(NoteCreate { owner: "ann".into() }).await.unwrap();
///     let notes = client
///         .query(Filter::new("owner=ann", |n: &Note| n.owner == "ann"))
///         .await
///         .unwrap();
///     assert_eq!(notes.len(), 1);
/// }
/// ```
///
/// # Atomicity
///
/// `Update` and `Upsert` apply the entity hook to a clone and only swap it in when
/// the hook succeeds; `DeleteWhere` runs every `on_delete` hook before removing
/// anything. A failed request never leaves a half-applied record behind.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when it
    /// is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self, context: T::Context) {
        // Just the type name, e.g. "CartItem"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.insert_new(params, &context, entity_type).await;
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if self.store.contains_key(&id) {
                        let result = self.apply_update(&id, update, &context, entity_type).await;
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        debug!(entity_type, %id, "Delete of absent item");
                        let _ = respond_to.send(Ok(None));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    let removed = self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(removed));
                }
                ResourceRequest::Query { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| filter.matches(item))
                        .cloned()
                        .collect();
                    debug!(entity_type, filter = filter.label(), count = items.len(), "Query");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Upsert {
                    filter,
                    create,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, filter = filter.label(), "Upsert");
                    let result = match self.first_match(&filter) {
                        Some(id) => self.apply_update(&id, update, &context, entity_type).await,
                        None => self.insert_new(create, &context, entity_type).await,
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::DeleteWhere { filter, respond_to } => {
                    let result = self.delete_where(&filter, &context, entity_type).await;
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn insert_new(
        &mut self,
        params: T::Create,
        context: &T::Context,
        entity_type: &str,
    ) -> Result<T, FrameworkError> {
        let id = T::Id::from(self.next_id);
        let mut item = match T::from_create_params(id.clone(), params) {
            Ok(item) => item,
            Err(e) => {
                warn!(entity_type, error = %e, "Create failed");
                return Err(FrameworkError::EntityError(Box::new(e)));
            }
        };
        if let Err(e) = item.on_create(context).await {
            warn!(entity_type, error = %e, "on_create failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }
        // Only consume the id once the record is actually stored.
        self.next_id += 1;
        self.store.insert(id.clone(), item.clone());
        info!(entity_type, %id, size = self.store.len(), "Created");
        Ok(item)
    }

    async fn apply_update(
        &mut self,
        id: &T::Id,
        update: T::Update,
        context: &T::Context,
        entity_type: &str,
    ) -> Result<T, FrameworkError> {
        let Some(current) = self.store.get(id) else {
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        let mut next = current.clone();
        if let Err(e) = next.on_update(update, context).await {
            warn!(entity_type, %id, error = %e, "Update failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }
        self.store.insert(id.clone(), next.clone());
        info!(entity_type, %id, "Updated");
        Ok(next)
    }

    async fn delete_where(
        &mut self,
        filter: &Filter<T>,
        context: &T::Context,
        entity_type: &str,
    ) -> Result<usize, FrameworkError> {
        let ids: Vec<T::Id> = self
            .store
            .iter()
            .filter(|(_, item)| filter.matches(item))
            .map(|(id, _)| id.clone())
            .collect();

        for id in &ids {
            if let Some(item) = self.store.get(id) {
                if let Err(e) = item.on_delete(context).await {
                    warn!(entity_type, %id, error = %e, "on_delete failed, nothing removed");
                    return Err(FrameworkError::EntityError(Box::new(e)));
                }
            }
        }

        for id in &ids {
            self.store.remove(id);
        }
        info!(
            entity_type,
            filter = filter.label(),
            removed = ids.len(),
            size = self.store.len(),
            "Deleted matching"
        );
        Ok(ids.len())
    }

    fn first_match(&self, filter: &Filter<T>) -> Option<T::Id> {
        self.store
            .iter()
            .find(|(_, item)| filter.matches(item))
            .map(|(id, _)| id.clone())
    }
}
