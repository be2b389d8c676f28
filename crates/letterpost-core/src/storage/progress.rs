//! Completed-letter counting.
//!
//! `ProgressTracker` records one completion per delivered artifact so a
//! channel can report how many letters have been produced overall and per
//! owner.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use letterpost_types::error::RepositoryError;
use letterpost_types::session::OwnerId;

/// Counter of delivered letters.
pub trait ProgressTracker: Send + Sync {
    /// Count one delivered letter for `owner`.
    fn record_completion(
        &self,
        owner: OwnerId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Letters delivered across all owners.
    fn completed_total(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Letters delivered for one owner.
    fn completed_for(
        &self,
        owner: OwnerId,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}

/// Process-local counter backed by `DashMap`.
///
/// Cloning produces a shared view of the same counters.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProgressTracker {
    per_owner: Arc<DashMap<OwnerId, AtomicU64>>,
}

impl InMemoryProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressTracker for InMemoryProgressTracker {
    async fn record_completion(&self, owner: OwnerId) -> Result<(), RepositoryError> {
        self.per_owner
            .entry(owner)
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn completed_total(&self) -> Result<u64, RepositoryError> {
        Ok(self
            .per_owner
            .iter()
            .map(|entry| entry.value().load(Ordering::Relaxed))
            .sum())
    }

    async fn completed_for(&self, owner: OwnerId) -> Result<u64, RepositoryError> {
        Ok(self
            .per_owner
            .get(&owner)
            .map(|count| count.load(Ordering::Relaxed))
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_per_owner_and_total() {
        let tracker = InMemoryProgressTracker::new();
        tracker.record_completion(OwnerId(1)).await.unwrap();
        tracker.record_completion(OwnerId(1)).await.unwrap();
        tracker.record_completion(OwnerId(2)).await.unwrap();

        assert_eq!(tracker.completed_for(OwnerId(1)).await.unwrap(), 2);
        assert_eq!(tracker.completed_for(OwnerId(2)).await.unwrap(), 1);
        assert_eq!(tracker.completed_for(OwnerId(3)).await.unwrap(), 0);
        assert_eq!(tracker.completed_total().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_clones_share_counters() {
        let tracker = InMemoryProgressTracker::new();
        let view = tracker.clone();
        tracker.record_completion(OwnerId(4)).await.unwrap();
        assert_eq!(view.completed_total().await.unwrap(), 1);
    }
}
