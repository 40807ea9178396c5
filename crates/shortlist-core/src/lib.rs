//! # shortlist-core
//!
//! Core types, traits, and abstractions for the shortlist service.
//!
//! This crate provides the foundational data structures and trait
//! definitions that the other shortlist crates depend on: the pipeline
//! error taxonomy, the domain models, the collaborator trait seams, and the
//! centralized default constants.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, PersistStep, Result};
pub use models::{
    CandidateDocument, CandidateText, Registration, ShortlistEntry, ShortlistRequest,
    ShortlistResult,
};
pub use traits::{
    DocumentFetcher, GenerationBackend, RegistrationRepository, ShortlistRepository, TextExtractor,
};
