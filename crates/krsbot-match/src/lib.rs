//! Text-matching primitives for the KRSBot answer cascade.
//!
//! Provides the informal-spelling normalizer, the TF-IDF question index,
//! token-based fuzzy matching, and character-level sequence similarity.
//! All matchers are pure: they are built once and queried through `&self`
//! (or are free functions), so a fitted index is safe to share across
//! concurrent readers.
//!
//! # Main types
//!
//! - [`Normalizer`] — Fixed-order informal-spelling rewrite table.
//! - [`TfidfIndex`] — Fit-once TF-IDF vector space with cosine scoring.
//! - [`FuzzyMatch`] — A fuzzy-matching candidate with its 0–100 score.
//! - [`sequence::ratio`] — Longest-matching-block similarity ratio.

/// Token-based fuzzy matching over stored questions.
pub mod fuzzy;
/// Informal-spelling normalization and query preprocessing.
pub mod normalize;
/// Character-level sequence similarity for short queries.
pub mod sequence;
/// The fixed Indonesian stopword list.
pub mod stopwords;
/// TF-IDF vector space over the question bank.
pub mod tfidf;

pub use fuzzy::FuzzyMatch;
pub use normalize::Normalizer;
pub use stopwords::is_stopword;
pub use tfidf::TfidfIndex;
