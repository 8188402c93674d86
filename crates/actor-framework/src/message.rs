//! # Generic Messages
//!
//! The request enum exchanged between a `ResourceClient` and its `ResourceActor`,
//! plus the [`Filter`] predicate used by the collection-level requests.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A predicate over stored entities, evaluated inside the actor task.
///
/// `label` is only used for logging so that traces show what was selected
/// (e.g. `user_id=user_1`) instead of an opaque closure.
pub struct Filter<T> {
    label: String,
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Filter<T> {
    pub fn new(
        label: impl Into<String>,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Matches every entity.
    pub fn all() -> Self {
        Self::new("all", |_| true)
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.predicate)(item)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Filter").field(&self.label).finish()
    }
}

/// Internal message type sent to the actor to request operations.
///
/// # Record-Level Requests
/// - **Create**: assigns the next id and inserts a new record.
/// - **Get**: fetches one record by id.
/// - **Update**: mutates one record in place (`NotFound` when absent).
/// - **Delete**: removes one record; answers `None` when it was already gone.
///
/// # Collection-Level Requests
/// - **Query**: every record matching a [`Filter`], in insertion order.
/// - **Upsert**: updates the first match or creates a new record.
/// - **DeleteWhere**: removes every match and answers how many were removed.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Query {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
    Upsert {
        filter: Filter<T>,
        create: T::Create,
        update: T::Update,
        respond_to: Response<T>,
    },
    DeleteWhere {
        filter: Filter<T>,
        respond_to: Response<usize>,
    },
}
