//! Core types and error definitions for KRSBot.
//!
//! This crate provides the foundational types shared across all KRSBot
//! crates: error handling, the question/answer record, and the match
//! result returned by the cascade.
//!
//! # Main types
//!
//! - [`KrsbotError`] — Unified error enum for all KRSBot subsystems.
//! - [`KrsbotResult`] — Convenience alias for `Result<T, KrsbotError>`.
//! - [`QAEntry`] — A single question/answer record in the knowledge bank.
//! - [`MatchMethod`] — Which cascade tier produced an answer.
//! - [`MatchResult`] — The full answer decision with provenance.

use serde::{Deserialize, Serialize};

// --- Error types ---

/// Top-level error type for KRSBot.
///
/// Each variant corresponds to a subsystem that can produce errors.
#[derive(Debug, thiserror::Error)]
pub enum KrsbotError {
    /// An error while loading or building the knowledge base.
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// An error while constructing a matcher (e.g. rule compilation).
    #[error("Matcher error: {0}")]
    Matcher(String),

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`KrsbotError`].
pub type KrsbotResult<T> = Result<T, KrsbotError>;

// --- Knowledge records ---

/// A single question/answer record.
///
/// The on-disk field names follow the knowledge data format:
/// `pertanyaan` (question) and `jawaban` (answer). Unknown fields in a
/// record are ignored. Entries are immutable after load; their position
/// in the bank is the index every matcher reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QAEntry {
    /// The stored question text.
    #[serde(rename = "pertanyaan")]
    pub question: String,
    /// The answer returned when this entry matches.
    #[serde(rename = "jawaban")]
    pub answer: String,
}

impl QAEntry {
    /// Creates a new entry from question and answer text.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

// --- Match results ---

/// The cascade tier that produced a [`MatchResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    /// TF-IDF cosine similarity over the question vector space.
    Tfidf,
    /// Token-based fuzzy string matching.
    Fuzzy,
    /// Character-level sequence similarity for short queries.
    Sequence,
    /// No tier qualified; the static fallback message was returned.
    Fallback,
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MatchMethod::Tfidf => "TF-IDF",
            MatchMethod::Fuzzy => "Fuzzy Matching",
            MatchMethod::Sequence => "Sequence Matching",
            MatchMethod::Fallback => "Fallback",
        };
        f.write_str(label)
    }
}

/// The decision returned for a single query.
///
/// `similarity` is always in `[0, 1]`, whatever tier produced it. On
/// fallback, `matched_question` is `None` and `similarity` carries the
/// vector-similarity score that failed its threshold, which callers use
/// for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The answer text to present.
    pub answer: String,
    /// The stored question that matched, if any tier succeeded.
    pub matched_question: Option<String>,
    /// Confidence score in `[0, 1]`.
    pub similarity: f32,
    /// Which tier produced this result.
    pub method: MatchMethod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qa_entry_deserializes_from_data_field_names() {
        let entry: QAEntry = serde_json::from_str(
            r#"{"pertanyaan": "Apa itu KRS?", "jawaban": "Kartu Rencana Studi."}"#,
        )
        .unwrap();
        assert_eq!(entry.question, "Apa itu KRS?");
        assert_eq!(entry.answer, "Kartu Rencana Studi.");
    }

    #[test]
    fn qa_entry_ignores_unknown_fields() {
        let entry: QAEntry = serde_json::from_str(
            r#"{"pertanyaan": "q", "jawaban": "a", "kategori": "umum"}"#,
        )
        .unwrap();
        assert_eq!(entry.question, "q");
    }

    #[test]
    fn qa_entry_rejects_missing_field() {
        let result: Result<QAEntry, _> = serde_json::from_str(r#"{"pertanyaan": "q"}"#);
        assert!(result.is_err(), "a record missing 'jawaban' must be rejected");
    }

    #[test]
    fn method_labels_match_presentation_captions() {
        assert_eq!(MatchMethod::Tfidf.to_string(), "TF-IDF");
        assert_eq!(MatchMethod::Fuzzy.to_string(), "Fuzzy Matching");
        assert_eq!(MatchMethod::Sequence.to_string(), "Sequence Matching");
        assert_eq!(MatchMethod::Fallback.to_string(), "Fallback");
    }
}
