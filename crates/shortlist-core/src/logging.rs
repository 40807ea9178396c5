//! Structured logging field name constants for the shortlist service.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, candidate dropped or fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), run completions |
//! | DEBUG | Decision points, intermediate values, config choices |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated across request → pipeline → sub-calls.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "pipeline", "db", "inference"
pub const SUBSYSTEM: &str = "subsystem";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Parent event UUID being operated on.
pub const EVENT_ID: &str = "event_id";

/// Candidate ordinal within the current run (1-based).
pub const ORDINAL: &str = "ordinal";

/// Candidate document URL.
pub const DOCUMENT_URL: &str = "document_url";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Operation wall time in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of candidates at the current stage.
pub const CANDIDATE_COUNT: &str = "candidate_count";
