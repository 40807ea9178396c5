//! Error types for the shortlist pipeline.

use thiserror::Error;

/// Result type alias using the shortlist Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Persistence step that failed, so callers can judge whether a retry is safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistStep {
    /// Resolving owning registrations for the candidate documents.
    Lookup,
    /// Transactional delete-and-insert of the event's shortlist rows.
    Replace,
}

impl std::fmt::Display for PersistStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistStep::Lookup => write!(f, "registration lookup"),
            PersistStep::Replace => write!(f, "shortlist replace"),
        }
    }
}

/// Core error type for shortlist operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Candidate set exceeds the per-run ceiling
    #[error("Too many documents: {found} provided, limit is {limit}")]
    TooManyDocuments { found: usize, limit: usize },

    /// Fewer surviving candidates than the requested selection size
    #[error("Only {found} valid documents found, cannot select top {requested}")]
    InsufficientCandidates { found: usize, requested: usize },

    /// The generation reply contained no usable selection
    #[error("No selection produced: {0}")]
    NoSelection(String),

    /// Inference/generation failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Persistence failed at a specific step
    #[error("Persistence error during {step}: {message}")]
    Persistence { step: PersistStep, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

impl Error {
    /// Shorthand for a persistence failure at the lookup step.
    pub fn lookup_failed(message: impl Into<String>) -> Self {
        Error::Persistence {
            step: PersistStep::Lookup,
            message: message.into(),
        }
    }

    /// Shorthand for a persistence failure at the replace step.
    pub fn replace_failed(message: impl Into<String>) -> Self {
        Error::Persistence {
            step: PersistStep::Replace,
            message: message.into(),
        }
    }
}
