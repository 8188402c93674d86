//! # User Client
//!
//! Wraps a `ResourceClient<User>` and serves it as the [`UserDirectory`].
use super::recover_entity_error;
use crate::lookup::{LookupError, UserDirectory, UserRecord};
use crate::model::{User, UserCreate, UserId};
use crate::user_actor::UserError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        recover_entity_error(e, UserError::ActorCommunicationError)
    }
}

#[async_trait]
impl UserDirectory for UserClient {
    async fn get_user(&self, id: &UserId) -> Result<Option<UserRecord>, LookupError> {
        let user = self
            .inner
            .get(id.clone())
            .await
            .map_err(|e| LookupError::Unavailable(e.to_string()))?;

        Ok(user.map(|u| UserRecord {
            id: u.id,
            name: u.name,
        }))
    }
}
