//! Composer -- the field-collection state machine.
//!
//! Drives one letter per owner through the fixed step order
//! (`Address1 .. Signature -> Done`), persisting the session after every
//! mutation, and hands the assembled `Document` to a `Renderer` once the
//! last field has been visited.
//!
//! Concurrency policy: calls for the same owner are serialized on an
//! owner-scoped mutex (`OwnerLocks`); calls for different owners proceed
//! in parallel. A lock entry lives only for the duration of a call.
//! Rendering happens after the owner's session has been removed and its
//! lock released.

use letterpost_types::document::{ArtifactHandle, Document};
use letterpost_types::error::ComposeError;
use letterpost_types::letter::{SectionName, Step};
use letterpost_types::session::{OwnerId, Session, Submission};
use tracing::{debug, info, warn};

use crate::render::Renderer;
use crate::storage::progress::ProgressTracker;
use crate::storage::session_store::SessionStore;

use super::assembler::DocumentAssembler;
use super::locks::OwnerLocks;
use super::session::{new_session, SessionExt};

/// Outcome of a successful delivery.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub owner: OwnerId,
    pub artifact: ArtifactHandle,
    /// Sections that survived elision.
    pub sections: Vec<SectionName>,
}

/// Composition state machine over an injected session store and
/// progress tracker.
pub struct Composer<S: SessionStore, P: ProgressTracker> {
    store: S,
    progress: P,
    locks: OwnerLocks,
}

impl<S: SessionStore, P: ProgressTracker> Composer<S, P> {
    pub fn new(store: S, progress: P) -> Self {
        Self {
            store,
            progress,
            locks: OwnerLocks::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }

    /// Start a new composition for `owner` at the first step.
    ///
    /// Any composition already in progress for the owner is discarded.
    pub async fn begin(&self, owner: OwnerId) -> Result<Session, ComposeError> {
        let _guard = self.locks.acquire(owner).await;

        if self.store.delete(owner).await? {
            info!(%owner, "discarded unfinished composition");
        }
        let session = new_session(owner);
        self.store.put(&session).await?;

        info!(%owner, "composition started");
        Ok(session)
    }

    /// Record the submission for the owner's current step and advance.
    ///
    /// Returns the step the session moved to.
    pub async fn submit(
        &self,
        owner: OwnerId,
        submission: Submission,
    ) -> Result<Step, ComposeError> {
        let _guard = self.locks.acquire(owner).await;

        let mut session = self
            .store
            .get(owner)
            .await?
            .ok_or(ComposeError::NoActiveSession(owner))?;

        let collected = session.step;
        let skipped = submission.is_skip();
        let next = session.record(submission)?;
        self.store.put(&session).await?;

        debug!(%owner, step = %collected, skipped, next = %next, "field collected");
        Ok(next)
    }

    /// Abandon the owner's composition, whatever its step.
    ///
    /// Returns whether there was one. Not an error when there was not.
    pub async fn cancel(&self, owner: OwnerId) -> Result<bool, ComposeError> {
        let guard = self.locks.acquire(owner).await;
        let existed = self.store.delete(owner).await?;
        drop(guard);

        if existed {
            info!(%owner, "composition cancelled");
        }
        Ok(existed)
    }

    /// The owner's current step, or `None` without an active composition.
    pub async fn current_step(&self, owner: OwnerId) -> Result<Option<Step>, ComposeError> {
        let _guard = self.locks.acquire(owner).await;
        Ok(self.store.get(owner).await?.map(|s| s.step))
    }

    /// Assemble the owner's document and discard the session.
    ///
    /// Fails with `IncompleteSession` (leaving the session untouched) unless
    /// all seven fields have been visited.
    pub async fn finalize(&self, owner: OwnerId) -> Result<Document, ComposeError> {
        let guard = self.locks.acquire(owner).await;

        let session = self
            .store
            .get(owner)
            .await?
            .ok_or(ComposeError::NoActiveSession(owner))?;
        let document = DocumentAssembler::assemble(&session)?;
        self.store.delete(owner).await?;
        drop(guard);

        info!(%owner, fields = document.fields().len(), "composition finalized");
        Ok(document)
    }

    /// Finalize the owner's composition, render it, and count the delivery.
    ///
    /// A rendering failure is returned as `RenderingFailed`; the session is
    /// already gone at that point and the owner has to begin again.
    pub async fn deliver<R: Renderer>(
        &self,
        owner: OwnerId,
        renderer: &R,
    ) -> Result<Delivery, ComposeError> {
        let document = self.finalize(owner).await?;
        let sections = document.sections();

        let artifact = match renderer.render(document).await {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!(%owner, error = %e, "rendering failed");
                return Err(e.into());
            }
        };

        self.progress.record_completion(owner).await?;
        info!(%owner, path = %artifact.path.display(), "letter delivered");

        Ok(Delivery {
            owner,
            artifact,
            sections,
        })
    }
}
