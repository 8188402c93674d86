//! # Collaborator Lookups
//!
//! The contracts checkout and the cart service use to reach the user directory and the
//! product catalog, and the [`CallPolicy`] every such call goes through.
//!
//! A lookup has three outcomes that must never be confused:
//!
//! | Outcome | Meaning |
//! |---------|---------|
//! | `Ok(Some(record))` | the record exists |
//! | `Ok(None)` | the collaborator answered that it does not exist |
//! | `Err(LookupError)` | no answer: unreachable, or too slow |
//!
//! Only the last one is retried.

use crate::model::{ProductId, UserId};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// What the user directory tells us about a user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
}

/// What the product catalog tells us about a product at the time of the call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("unavailable: {0}")]
    Unavailable(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_user(&self, id: &UserId) -> Result<Option<UserRecord>, LookupError>;
}

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn get_product(&self, id: &ProductId) -> Result<Option<ProductRecord>, LookupError>;
}

/// Timeout and bounded retry applied to each collaborator call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallPolicy {
    /// Upper bound for one attempt.
    pub timeout: Duration,
    /// Total attempts, including the first one.
    pub attempts: u32,
    /// Wait before retry `n` is `backoff * n`.
    pub backoff: Duration,
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(2000),
            attempts: 3,
            backoff: Duration::from_millis(100),
        }
    }
}

impl CallPolicy {
    /// Runs `op` until it answers or the attempts run out.
    ///
    /// The attempt counter lives on this call's stack, so concurrent calls never
    /// share it.
    pub async fn call<T, F, Fut>(&self, service: &'static str, mut op: F) -> Result<T, LookupError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LookupError>>,
    {
        let max_attempts = self.attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let outcome = match tokio::time::timeout(self.timeout, op()).await {
                Ok(result) => result,
                Err(_) => Err(LookupError::Timeout(self.timeout)),
            };

            match outcome {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(service, attempt, "Lookup recovered");
                    }
                    return Ok(value);
                }
                Err(e) if attempt < max_attempts => {
                    warn!(service, attempt, max_attempts, error = %e, "Lookup failed, retrying");
                    tokio::time::sleep(self.backoff * attempt).await;
                }
                Err(e) => {
                    warn!(service, attempt, error = %e, "Lookup failed, giving up");
                    return Err(e);
                }
            }
        }
    }
}
