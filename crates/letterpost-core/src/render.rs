//! Renderer port: turns an assembled `Document` into an artifact.
//!
//! The renderer owns the document once it is handed over. Implementations
//! live in letterpost-infra.

use std::future::Future;

use letterpost_types::document::{ArtifactHandle, Document};
use letterpost_types::error::RenderError;

/// Produces the final artifact for a letter.
///
/// Uses RPITIT (return position `impl Trait` in traits) consistent with
/// all async traits in this project.
pub trait Renderer: Send + Sync {
    /// Render `document`, consuming it.
    ///
    /// Failures are final for the composition: the caller never retries.
    fn render(
        &self,
        document: Document,
    ) -> impl Future<Output = Result<ArtifactHandle, RenderError>> + Send;
}
