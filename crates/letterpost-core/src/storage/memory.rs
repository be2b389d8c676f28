//! In-memory `SessionStore` backed by `DashMap`.
//!
//! Sessions are cloned on read so no `DashMap` guard outlives a call.

use std::sync::Arc;

use dashmap::DashMap;
use letterpost_types::error::RepositoryError;
use letterpost_types::session::{OwnerId, Session};

use super::session_store::SessionStore;

/// Concurrent owner -> session map. Cloning shares the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    inner: Arc<DashMap<OwnerId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions currently held.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    async fn get(&self, owner: OwnerId) -> Result<Option<Session>, RepositoryError> {
        Ok(self.inner.get(&owner).map(|r| r.value().clone()))
    }

    async fn put(&self, session: &Session) -> Result<(), RepositoryError> {
        self.inner.insert(session.owner, session.clone());
        Ok(())
    }

    async fn delete(&self, owner: OwnerId) -> Result<bool, RepositoryError> {
        Ok(self.inner.remove(&owner).is_some())
    }
}
