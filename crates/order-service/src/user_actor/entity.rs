//! [`ActorEntity`] implementation for [`User`].
//!
//! Users have no context and cannot be updated; the directory only registers and
//! looks them up.

use super::UserError;
use crate::model::{User, UserCreate, UserId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = Infallible;
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(UserError::ValidationError("name must not be empty".into()));
        }
        if !params.email.contains('@') {
            return Err(UserError::ValidationError(format!(
                "invalid email address: {}",
                params.email
            )));
        }
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
        })
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }
}
