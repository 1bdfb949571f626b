//! Knowledge-base loading and the answer cascade.
//!
//! Loads question/answer records from JSON sources (with a built-in
//! default bank as the last resort), fits the TF-IDF question index once
//! at construction, and resolves queries through the fixed matching
//! cascade: TF-IDF, then fuzzy, then sequence similarity, then the
//! static fallback.
//!
//! # Main types
//!
//! - [`KnowledgeBase`] — Immutable entries + normalizer + fitted index.
//! - [`Responder`] — The cascade; `get_response` is the sole query
//!   entry point for any presentation layer.
//! - [`MatchThresholds`] — The fixed tier thresholds.

/// The immutable knowledge base.
pub mod kb;
/// JSON directory loading and the built-in default bank.
pub mod loader;
/// The response cascade.
pub mod resolver;

pub use kb::KnowledgeBase;
pub use loader::{default_entries, load_dir};
pub use resolver::{MatchThresholds, Responder, FALLBACK_MESSAGE};
