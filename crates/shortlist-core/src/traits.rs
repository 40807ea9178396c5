//! Core traits for shortlist pipeline abstractions.
//!
//! These traits define the seams between the pipeline and its collaborators.
//! The pipeline takes every collaborator as an injected trait object, so
//! tests can substitute fakes without touching orchestration logic.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Registration, ShortlistEntry};

// =============================================================================
// DOCUMENT ACQUISITION
// =============================================================================

/// Retrieves raw document bytes over the network.
///
/// One attempt per document, no retries: a transient failure is treated the
/// same as a permanent one and the candidate is dropped from the run.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the document at `url`. Errors are per-document, never
    /// pipeline-fatal; the caller converts them to an empty-text candidate.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Converts raw document bytes into plain text.
pub trait TextExtractor: Send + Sync {
    /// Extract text from `bytes`. A parse failure is per-document; the
    /// caller converts it to an empty-text candidate.
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

// =============================================================================
// GENERATION BACKEND
// =============================================================================

/// Text generation backend (one prompt in, one reply out, no streaming).
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text given a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate text with system context.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Lookup of owning registrations, keyed by document-URL equality.
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Return the registrations whose submitted document URL is in `urls`.
    async fn find_by_document_urls(&self, urls: &[String]) -> Result<Vec<Registration>>;
}

/// Durable shortlist storage with last-run-wins replace semantics.
#[async_trait]
pub trait ShortlistRepository: Send + Sync {
    /// Atomically replace the event's shortlist with `registration_ids`
    /// (given in rank order). An empty slice clears the shortlist.
    async fn replace_for_event(&self, event_id: Uuid, registration_ids: &[Uuid]) -> Result<()>;

    /// List the currently persisted shortlist for an event, rank order.
    async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<ShortlistEntry>>;
}
