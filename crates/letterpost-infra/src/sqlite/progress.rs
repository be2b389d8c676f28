//! SQLite implementation of `ProgressTracker`.
//!
//! Each delivered letter is one row in `completed_letters`; counts are
//! plain `COUNT(*)` queries.

use chrono::Utc;
use letterpost_core::storage::progress::ProgressTracker;
use letterpost_types::error::RepositoryError;
use letterpost_types::session::OwnerId;

use super::pool::DatabasePool;

/// SQLite-backed delivered-letter counter.
pub struct SqliteProgressTracker {
    pool: DatabasePool,
}

impl SqliteProgressTracker {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl ProgressTracker for SqliteProgressTracker {
    async fn record_completion(&self, owner: OwnerId) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO completed_letters (owner_id, completed_at) VALUES (?, ?)")
            .bind(owner.0)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn completed_total(&self) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM completed_letters")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count as u64)
    }

    async fn completed_for(&self, owner: OwnerId) -> Result<u64, RepositoryError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM completed_letters WHERE owner_id = ?")
                .bind(owner.0)
                .fetch_one(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::tests::test_pool;

    #[tokio::test]
    async fn test_counts() {
        let (pool, _dir) = test_pool().await;
        let tracker = SqliteProgressTracker::new(pool);
        assert_eq!(tracker.completed_total().await.unwrap(), 0);

        tracker.record_completion(OwnerId(1)).await.unwrap();
        tracker.record_completion(OwnerId(1)).await.unwrap();
        tracker.record_completion(OwnerId(2)).await.unwrap();

        assert_eq!(tracker.completed_total().await.unwrap(), 3);
        assert_eq!(tracker.completed_for(OwnerId(1)).await.unwrap(), 2);
        assert_eq!(tracker.completed_for(OwnerId(3)).await.unwrap(), 0);
    }
}
