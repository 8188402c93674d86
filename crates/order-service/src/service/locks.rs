//! Per-user advisory locks.
//!
//! A checkout holds its user's lock from reading the cart until the cart is cleared,
//! and cart edits take the same lock, so a second checkout for that user sees the
//! cleared cart instead of placing the same lines twice. Entries are removed once
//! nobody holds or waits for them.

use crate::model::UserId;
use dashmap::DashMap;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::trace;

type LockTable = DashMap<UserId, Arc<Mutex<()>>>;

#[derive(Clone, Default)]
pub struct UserLocks {
    table: Arc<LockTable>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other task holds the lock for `user_id`.
    pub async fn lock(&self, user_id: &UserId) -> UserLockGuard {
        let mutex = self.table.entry(user_id.clone()).or_default().value().clone();
        let guard = Waiter {
            table: self.table.clone(),
            user_id: user_id.clone(),
            pending: Some(mutex.lock_owned().boxed()),
        }
        .await;
        trace!(%user_id, "User lock acquired");
        UserLockGuard {
            table: self.table.clone(),
            user_id: user_id.clone(),
            guard: Some(guard),
        }
    }

    /// Number of users with a live lock entry.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// A pending acquisition. Dropping it before the lock is granted sweeps the entry,
/// which the holder could not do while this waiter still referenced the mutex.
struct Waiter {
    table: Arc<LockTable>,
    user_id: UserId,
    pending: Option<BoxFuture<'static, OwnedMutexGuard<()>>>,
}

impl Future for Waiter {
    type Output = OwnedMutexGuard<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(pending) = self.pending.as_mut() else {
            return Poll::Pending;
        };
        let guard = futures::ready!(pending.as_mut().poll(cx));
        self.pending = None;
        Poll::Ready(guard)
    }
}

impl Drop for Waiter {
    fn drop(&mut self) {
        if self.pending.take().is_some() {
            self.table
                .remove_if(&self.user_id, |_, mutex| Arc::strong_count(mutex) == 1);
            trace!(user_id = %self.user_id, "User lock wait cancelled");
        }
    }
}

pub struct UserLockGuard {
    table: Arc<LockTable>,
    user_id: UserId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for UserLockGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the table's own reference left: no holder, no waiter.
        self.table
            .remove_if(&self.user_id, |_, mutex| Arc::strong_count(mutex) == 1);
        trace!(user_id = %self.user_id, "User lock released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_user_is_serialized() {
        let locks = UserLocks::new();
        let user = UserId::from("U1");

        let first = locks.lock(&user).await;
        let waiting = {
            let (locks, user) = (locks.clone(), user.clone());
            tokio::spawn(async move {
                let _second = locks.lock(&user).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiting.is_finished());

        drop(first);
        tokio::time::timeout(Duration::from_secs(1), waiting)
            .await
            .expect("second lock should be granted")
            .unwrap();
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_waiter_does_not_leave_entry() {
        let locks = UserLocks::new();
        let user = UserId::from("U1");

        let holder = locks.lock(&user).await;
        let mut waiter = Box::pin(locks.lock(&user));
        assert!(futures::poll!(waiter.as_mut()).is_pending());

        // Released while the waiter still references the mutex, so the entry stays.
        drop(holder);
        assert_eq!(locks.len(), 1);

        drop(waiter);
        assert!(locks.is_empty());

        let _again = tokio::time::timeout(Duration::from_secs(1), locks.lock(&user))
            .await
            .expect("lock should be free after the waiter is gone");
    }

    #[tokio::test]
    async fn test_different_users_do_not_block() {
        let locks = UserLocks::new();

        let _u1 = locks.lock(&UserId::from("U1")).await;
        let u2 = tokio::time::timeout(Duration::from_secs(1), locks.lock(&UserId::from("U2"))).await;

        assert!(u2.is_ok());
        assert_eq!(locks.len(), 2);
    }
}
