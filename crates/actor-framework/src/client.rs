//! # Generic Client
//!
//! This module defines the generic client for communicating with actors.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest, Response};
use tokio::sync::{mpsc, oneshot};

/// ## ResourceClient
///
/// The `ResourceClient<T>` is the caller side of a `ResourceActor<T>`. Each method
/// sends one `ResourceRequest<T>` over the mpsc channel and awaits the oneshot reply.
/// The client only holds a sender, so cloning it is cheap and every clone talks to
/// the same store.
///
/// * `ActorClosed` – the actor stopped before the request was queued.
/// * `ActorDropped` – the actor took the request but never replied.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Inserts a new record and returns it with its assigned id.
    pub async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    /// Removes one record. `Ok(None)` when it was already absent.
    pub async fn delete(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn query(&self, filter: Filter<T>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Query { filter, respond_to })
            .await
    }

    /// Updates the first record matching `filter`, or creates one from `create`.
    pub async fn upsert(
        &self,
        filter: Filter<T>,
        create: T::Create,
        update: T::Update,
    ) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Upsert {
            filter,
            create,
            update,
            respond_to,
        })
        .await
    }

    /// Removes every record matching `filter` and returns how many were removed.
    pub async fn delete_where(&self, filter: Filter<T>) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::DeleteWhere { filter, respond_to })
            .await
    }
}
