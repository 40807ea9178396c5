//! # shortlist-inference
//!
//! LLM generation backend abstraction for the shortlist pipeline.
//!
//! This crate provides:
//! - An OpenAI-compatible generation backend (Hugging Face router by default)
//! - The judge prompt builder for candidate ranking
//! - Best-effort parsing of the judge's free-text reply into a structured
//!   selection (sum type: parsed indices or unparseable)
//! - A mock backend (feature `mock`) for deterministic tests
//!
//! # Example
//!
//! ```rust,no_run
//! use shortlist_inference::HfBackend;
//! use shortlist_core::GenerationBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = HfBackend::from_env().unwrap();
//!     let reply = backend.generate("Return ONLY a JSON array: [1]").await.unwrap();
//!     println!("{}", reply);
//! }
//! ```

pub mod hf;
pub mod judge;
pub mod types;

// Mock generation backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use shortlist_core::{Error, GenerationBackend, Result};

pub use hf::{HfBackend, HfConfig, DEFAULT_GEN_MODEL, DEFAULT_INFERENCE_URL};
pub use judge::{build_judge_prompt, parse_selection_reply, translate_indices, SelectionReply};
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockGenerationBackend;
