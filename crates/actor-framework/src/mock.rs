//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered
//! from a script of expectations instead of a store. Use it to drive code that sits
//! *around* a client into states a real actor rarely reaches: a store that closes
//! mid-workflow, a bulk delete that fails after a successful read, and so on.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None, answers are scripted | Real store |
//! | **Error Injection** | Easy (`return_err`) | Hard |
//! | **Use Case** | Failure paths of orchestration code | Happy paths, store semantics |
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, Filter, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Line { id: u32, sku: String }
//! #[derive(Debug)] struct LineCreate;
//! #[derive(Debug, thiserror::Error)] #[error("line error")] struct LineError;
//!
//! #[async_trait]
//! impl ActorEntity for Line {
//!     type Id = u32; type Create = LineCreate; type Update = std::convert::Infallible;
//!     type Context = (); type Error = LineError;
//!     fn from_create_params(id: u32, _: LineCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, sku: String::new() })
//!     }
//!     async fn on_update(&mut self, update: Self::Update, _: &()) -> Result<(), Self::Error> {
//!         match update {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Line>::new();
//!     mock.expect_query().return_ok(vec![Line { id: 1, sku: "A".into() }]);
//!     mock.expect_delete_where().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.query(Filter::all()).await.unwrap().len(), 1);
//!     assert!(client.delete_where(Filter::all()).await.is_err());
//!     mock.verify();
//! }
//! ```
//!
//! ## Raw Channel Helpers
//!
//! [`create_mock_client`] returns a client plus the receiving end of its channel so a
//! test can inspect requests itself, answer late, or drop the responder to simulate
//! a store that accepted a request and then vanished.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted answer for the next request of a given kind.
enum Expectation<T: ActorEntity> {
    Get {
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    Query {
        response: Result<Vec<T>, FrameworkError>,
    },
    DeleteWhere {
        response: Result<usize, FrameworkError>,
    },
}

type Script<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request that does not match the next
/// expectation panics the background task, which the caller then observes as
/// `FrameworkError::ActorDropped`.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Script<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Script<T> = Arc::new(Mutex::new(VecDeque::new()));
        let script = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = script.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Query { respond_to, .. },
                        Some(Expectation::Query { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::DeleteWhere { respond_to, .. },
                        Some(Expectation::DeleteWhere { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Get { response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Create { response })
    }

    pub fn expect_query(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Query { response })
    }

    pub fn expect_delete_where(&mut self) -> ExpectationBuilder<T, usize> {
        ExpectationBuilder::new(&self.expectations, |response| {
            Expectation::DeleteWhere { response }
        })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder that records the answer for one expected request.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Script<T>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(expectations: &Script<T>, wrap: fn(Result<R, FrameworkError>) -> Expectation<T>) -> Self {
        Self {
            expectations: expectations.clone(),
            wrap,
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(response));
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is a `Get`.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    tokio::sync::oneshot::Sender<Result<Option<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
