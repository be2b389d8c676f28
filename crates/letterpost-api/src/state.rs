//! Application state wiring the composer to its adapters.
//!
//! AppState holds the concrete composer and renderer used by both the
//! terminal channel and the REST API. The composer is generic over the
//! store traits; AppState pins it to enum adapters so the backend can be
//! picked from `config.toml` at startup.

use std::path::PathBuf;
use std::sync::Arc;

use letterpost_core::compose::machine::Composer;
use letterpost_core::storage::memory::InMemorySessionStore;
use letterpost_core::storage::progress::{InMemoryProgressTracker, ProgressTracker};
use letterpost_core::storage::session_store::SessionStore;
use letterpost_infra::config::load_global_config;
use letterpost_infra::filesystem::{database_path, resolve_data_dir, resolve_results_dir};
use letterpost_infra::render::text::TextRenderer;
use letterpost_infra::sqlite::pool::DatabasePool;
use letterpost_infra::sqlite::progress::SqliteProgressTracker;
use letterpost_infra::sqlite::session::SqliteSessionStore;
use letterpost_types::config::{GlobalConfig, StoreKind};
use letterpost_types::error::RepositoryError;
use letterpost_types::session::{OwnerId, Session};

/// Session store selected by `GlobalConfig::store`.
pub enum AppSessionStore {
    Memory(InMemorySessionStore),
    Sqlite(SqliteSessionStore),
}

impl AppSessionStore {
    /// Number of compositions currently in progress.
    pub async fn active_count(&self) -> Result<usize, RepositoryError> {
        match self {
            Self::Memory(store) => Ok(store.len()),
            Self::Sqlite(store) => Ok(store.list_active().await?.len()),
        }
    }
}

impl SessionStore for AppSessionStore {
    async fn get(&self, owner: OwnerId) -> Result<Option<Session>, RepositoryError> {
        match self {
            Self::Memory(store) => store.get(owner).await,
            Self::Sqlite(store) => store.get(owner).await,
        }
    }

    async fn put(&self, session: &Session) -> Result<(), RepositoryError> {
        match self {
            Self::Memory(store) => store.put(session).await,
            Self::Sqlite(store) => store.put(session).await,
        }
    }

    async fn delete(&self, owner: OwnerId) -> Result<bool, RepositoryError> {
        match self {
            Self::Memory(store) => store.delete(owner).await,
            Self::Sqlite(store) => store.delete(owner).await,
        }
    }
}

/// Progress tracker matching the session store backend.
pub enum AppProgressTracker {
    Memory(InMemoryProgressTracker),
    Sqlite(SqliteProgressTracker),
}

impl ProgressTracker for AppProgressTracker {
    async fn record_completion(&self, owner: OwnerId) -> Result<(), RepositoryError> {
        match self {
            Self::Memory(tracker) => tracker.record_completion(owner).await,
            Self::Sqlite(tracker) => tracker.record_completion(owner).await,
        }
    }

    async fn completed_total(&self) -> Result<u64, RepositoryError> {
        match self {
            Self::Memory(tracker) => tracker.completed_total().await,
            Self::Sqlite(tracker) => tracker.completed_total().await,
        }
    }

    async fn completed_for(&self, owner: OwnerId) -> Result<u64, RepositoryError> {
        match self {
            Self::Memory(tracker) => tracker.completed_for(owner).await,
            Self::Sqlite(tracker) => tracker.completed_for(owner).await,
        }
    }
}

pub type AppComposer = Composer<AppSessionStore, AppProgressTracker>;

/// Shared application state.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub composer: Arc<AppComposer>,
    pub renderer: Arc<TextRenderer>,
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: load config, open the store, wire the composer.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;

        let (store, progress) = match config.store {
            StoreKind::Memory => (
                AppSessionStore::Memory(InMemorySessionStore::new()),
                AppProgressTracker::Memory(InMemoryProgressTracker::new()),
            ),
            StoreKind::Sqlite => {
                let pool = DatabasePool::open(&database_path(&data_dir)).await?;
                (
                    AppSessionStore::Sqlite(SqliteSessionStore::new(pool.clone())),
                    AppProgressTracker::Sqlite(SqliteProgressTracker::new(pool)),
                )
            }
        };
        tracing::debug!(store = ?config.store, data_dir = %data_dir.display(), "state initialized");

        let renderer = TextRenderer::new(resolve_results_dir(&data_dir, &config));

        Ok(Self::from_parts(
            Composer::new(store, progress),
            renderer,
            config,
            data_dir,
        ))
    }

    pub fn from_parts(
        composer: AppComposer,
        renderer: TextRenderer,
        config: GlobalConfig,
        data_dir: PathBuf,
    ) -> Self {
        Self {
            composer: Arc::new(composer),
            renderer: Arc::new(renderer),
            config: Arc::new(config),
            data_dir,
        }
    }

    /// In-memory state rooted at `data_dir`, for tests.
    #[cfg(test)]
    pub fn in_memory(data_dir: PathBuf) -> Self {
        let config = GlobalConfig::default();
        let renderer = TextRenderer::new(resolve_results_dir(&data_dir, &config));
        Self::from_parts(
            Composer::new(
                AppSessionStore::Memory(InMemorySessionStore::new()),
                AppProgressTracker::Memory(InMemoryProgressTracker::new()),
            ),
            renderer,
            config,
            data_dir,
        )
    }
}
