//! Gemini-backed [`pharmatrack_core::DataSource`].
//!
//! One grounded `generateContent` call per search; the structured JSON output
//! becomes a [`pharmatrack_core::DrugReport`] and the grounding chunks become
//! its source links.

pub mod client;
pub mod error;
pub(crate) mod normalize;
pub mod prompt;
pub mod types;

pub use client::{GeminiClient, DEFAULT_MODEL};
pub use error::GeminiError;
