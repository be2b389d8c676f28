//! SQLite implementation of `SessionStore`.
//!
//! Persists sessions in the `compose_sessions` table, one row per owner,
//! using INSERT OR REPLACE for upsert semantics. The full session is kept
//! as JSON in `state_json`; `step` is duplicated into its own column for
//! listing without deserialization.

use letterpost_core::storage::session_store::SessionStore;
use letterpost_types::error::RepositoryError;
use letterpost_types::session::{OwnerId, Session};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed session persistence.
pub struct SqliteSessionStore {
    pool: DatabasePool,
}

impl SqliteSessionStore {
    /// Create a new session store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Owners with a composition in progress, with their current step name.
    pub async fn list_active(&self) -> Result<Vec<(OwnerId, String)>, RepositoryError> {
        let rows = sqlx::query("SELECT owner_id, step FROM compose_sessions ORDER BY updated_at DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut active = Vec::with_capacity(rows.len());
        for row in &rows {
            let owner: i64 = row
                .try_get("owner_id")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let step: String = row
                .try_get("step")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            active.push((OwnerId(owner), step));
        }

        Ok(active)
    }
}

impl SessionStore for SqliteSessionStore {
    async fn get(&self, owner: OwnerId) -> Result<Option<Session>, RepositoryError> {
        let row = sqlx::query("SELECT state_json FROM compose_sessions WHERE owner_id = ?")
            .bind(owner.0)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let state_json: String = row
                    .try_get("state_json")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                let session: Session = serde_json::from_str(&state_json)
                    .map_err(|e| RepositoryError::Serialization(format!("invalid session JSON: {e}")))?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, session: &Session) -> Result<(), RepositoryError> {
        let state_json = serde_json::to_string(session)
            .map_err(|e| RepositoryError::Serialization(format!("failed to serialize session: {e}")))?;

        sqlx::query(
            r#"INSERT OR REPLACE INTO compose_sessions (owner_id, step, state_json, started_at, updated_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(session.owner.0)
        .bind(session.step.to_string())
        .bind(&state_json)
        .bind(session.started_at.to_rfc3339())
        .bind(session.updated_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, owner: OwnerId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM compose_sessions WHERE owner_id = ?")
            .bind(owner.0)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use letterpost_core::compose::session::{new_session, SessionExt};
    use letterpost_types::letter::{FieldName, Step};
    use letterpost_types::session::Submission;

    use super::*;
    use crate::sqlite::pool::tests::test_pool;

    #[tokio::test]
    async fn test_put_and_get_preserves_fields() {
        let (pool, _dir) = test_pool().await;
        let store = SqliteSessionStore::new(pool);
        let mut session = new_session(OwnerId(77));
        session.record(Submission::Text("123 Main St".to_string())).unwrap();
        session.record(Submission::Skip).unwrap();

        store.put(&session).await.unwrap();
        let loaded = store.get(OwnerId(77)).await.unwrap().unwrap();

        assert_eq!(loaded.step, Step::Address3);
        assert_eq!(
            loaded.field(FieldName::Address1).unwrap().value.as_deref(),
            Some("123 Main St")
        );
        assert!(!loaded.field(FieldName::Address2).unwrap().is_provided());
        assert_eq!(loaded.fields, session.fields);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let (pool, _dir) = test_pool().await;
        let store = SqliteSessionStore::new(pool);
        assert!(store.get(OwnerId(1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_existing_row() {
        let (pool, _dir) = test_pool().await;
        let store = SqliteSessionStore::new(pool);
        let mut session = new_session(OwnerId(5));
        store.put(&session).await.unwrap();

        session.record(Submission::Skip).unwrap();
        store.put(&session).await.unwrap();

        let loaded = store.get(OwnerId(5)).await.unwrap().unwrap();
        assert_eq!(loaded.step, Step::Address2);
        assert_eq!(store.list_active().await.unwrap(), vec![(OwnerId(5), "address_line2".to_string())]);
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let (pool, _dir) = test_pool().await;
        let store = SqliteSessionStore::new(pool);
        store.put(&new_session(OwnerId(8))).await.unwrap();

        assert!(store.delete(OwnerId(8)).await.unwrap());
        assert!(!store.delete(OwnerId(8)).await.unwrap());
        assert!(store.get(OwnerId(8)).await.unwrap().is_none());
    }
}
