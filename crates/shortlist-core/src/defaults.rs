//! Centralized default constants for the shortlist service.
//!
//! **This module is the single source of truth** for all shared default
//! values. All crates reference these constants instead of defining their
//! own magic numbers; runtime configuration overrides them where a
//! `from_env` constructor exists.

// =============================================================================
// PIPELINE
// =============================================================================

/// Maximum number of conforming candidate documents per run.
///
/// Bounds the worst-case latency and cost of the single ranking call; a run
/// with more conforming URLs is rejected before any network fetch.
pub const MAX_CANDIDATES: usize = 10;

/// Minimum extracted-text length (Unicode scalars, after trimming) for a
/// candidate to count as a meaningful submission.
pub const MIN_TEXT_CHARS: usize = 100;

/// Per-candidate excerpt budget embedded in the judge prompt. Keeps the
/// combined prompt bounded regardless of the selection size.
pub const EXCERPT_CHARS: usize = 2000;

// =============================================================================
// NETWORK
// =============================================================================

/// Timeout for a single document fetch (seconds).
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Timeout for the generation request (seconds).
pub const GEN_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// INFERENCE
// =============================================================================

/// Default OpenAI-compatible inference router endpoint.
pub const INFERENCE_URL: &str = "https://router.huggingface.co/v1";

/// Default generation model for idea ranking.
pub const GEN_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.3";
