//! Owner-scoped async locks.
//!
//! Every composer operation for one owner runs under that owner's mutex,
//! so two submissions for the same owner can never interleave their
//! read-modify-write of the session. Owners never share a mutex, and an
//! owner's entry only lives while someone holds or awaits it.

use std::sync::Arc;

use dashmap::DashMap;
use letterpost_types::session::OwnerId;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub struct OwnerLocks {
    inner: DashMap<OwnerId, Arc<Mutex<()>>>,
}

/// Exclusive access to one owner. Dropping it unlocks the owner and
/// removes the table entry when nobody else is waiting.
pub struct OwnerGuard<'a> {
    locks: &'a OwnerLocks,
    owner: OwnerId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for OwnerGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks.release_idle(self.owner);
    }
}

impl OwnerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `owner`.
    ///
    /// The `DashMap` guard is dropped before awaiting the mutex.
    pub async fn acquire(&self, owner: OwnerId) -> OwnerGuard<'_> {
        let mutex = self.inner.entry(owner).or_default().value().clone();
        let guard = mutex.lock_owned().await;
        OwnerGuard {
            locks: self,
            owner,
            guard: Some(guard),
        }
    }

    /// Drop the owner's mutex if only the table still references it.
    ///
    /// `remove_if` runs under the shard lock, so no `acquire` can clone the
    /// mutex between the count check and the removal.
    fn release_idle(&self, owner: OwnerId) {
        self.inner
            .remove_if(&owner, |_, mutex| Arc::strong_count(mutex) == 1);
    }

    /// Number of owners with a live mutex.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_same_owner_is_exclusive() {
        let locks = OwnerLocks::new();
        let guard = locks.acquire(OwnerId(1)).await;

        let blocked = tokio::time::timeout(Duration::from_millis(50), locks.acquire(OwnerId(1))).await;
        assert!(blocked.is_err());

        drop(guard);
        let reacquired =
            tokio::time::timeout(Duration::from_millis(50), locks.acquire(OwnerId(1))).await;
        assert!(reacquired.is_ok());
    }

    #[tokio::test]
    async fn test_different_owners_do_not_contend() {
        let locks = OwnerLocks::new();
        let _first = locks.acquire(OwnerId(1)).await;

        let other = tokio::time::timeout(Duration::from_millis(50), locks.acquire(OwnerId(2))).await;
        assert!(other.is_ok());
    }

    #[tokio::test]
    async fn test_dropping_guard_prunes_entry() {
        let locks = OwnerLocks::new();
        let guard = locks.acquire(OwnerId(1)).await;
        assert_eq!(locks.len(), 1);

        drop(guard);
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_entry_survives_while_someone_waits() {
        let locks = Arc::new(OwnerLocks::new());
        let guard = locks.acquire(OwnerId(1)).await;

        let waiter = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.acquire(OwnerId(1)).await;
            })
        };
        // Let the waiter clone the mutex and park on it.
        tokio::time::sleep(Duration::from_millis(20)).await;

        drop(guard);
        assert_eq!(locks.len(), 1);

        waiter.await.unwrap();
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_many_owners_leave_no_entries() {
        let locks = OwnerLocks::new();
        for id in 0..1000 {
            let _guard = locks.acquire(OwnerId(id)).await;
        }
        assert!(locks.is_empty());
    }
}
