//! # shortlist-pipeline
//!
//! The idea-shortlisting pipeline: fetch candidate PDFs, extract their text,
//! have a generation backend rank and select a top-N subset, and persist the
//! selection with last-run-wins semantics per parent event.
//!
//! The pipeline takes every collaborator (fetcher, extractor, generation
//! backend, repositories) as an injected trait object; production wiring
//! lives in `shortlist-api`, fakes in the tests.

pub mod extract;
pub mod fetcher;
pub mod pipeline;

// Re-export core types
pub use shortlist_core::*;

pub use extract::PdfTextExtractor;
pub use fetcher::HttpDocumentFetcher;
pub use pipeline::{PipelineConfig, ShortlistPipeline};
