//! Session store trait.
//!
//! Defines the owner-keyed store for in-progress compositions.
//! Implementations live here (in-memory) and in letterpost-infra (SQLite).

use letterpost_types::error::RepositoryError;
use letterpost_types::session::{OwnerId, Session};

/// Owner-keyed persistence for composition sessions.
///
/// Each call must be atomic for its key. The composer serializes calls for
/// one owner itself, so implementations need no cross-call locking.
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait SessionStore: Send + Sync {
    /// Get the session for an owner. Returns None if there is none.
    fn get(
        &self,
        owner: OwnerId,
    ) -> impl std::future::Future<Output = Result<Option<Session>, RepositoryError>> + Send;

    /// Store the session under its owner (upsert).
    fn put(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete the owner's session. Returns whether one existed.
    fn delete(
        &self,
        owner: OwnerId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
