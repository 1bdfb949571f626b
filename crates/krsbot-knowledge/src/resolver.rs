use krsbot_core::{MatchMethod, MatchResult};
use krsbot_match::{fuzzy, sequence};
use tracing::debug;

use crate::kb::KnowledgeBase;

/// The static message returned when every tier fails. Enumerates the
/// supported topics, verbatim.
pub const FALLBACK_MESSAGE: &str = "\
Maaf, saya tidak dapat memahami pertanyaan Anda.

Berikut beberapa topik yang bisa saya bantu:

• Cara mengisi KRS dan deadline
• Batas maksimal SKS per semester
• Mata kuliah prasyarat
• Bentrok jadwal dan solusinya
• Konsultasi dengan dosen pembimbing
• Mata kuliah lintas fakultas
• Masalah teknis sistem akademik
• Biaya dan administrasi KRS

Silakan ajukan pertanyaan yang lebih spesifik.";

/// The fixed cascade thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchThresholds {
    /// Minimum TF-IDF cosine similarity, in `[0, 1]`.
    pub similarity: f32,
    /// Minimum fuzzy score, in `[0, 100]`.
    pub fuzzy: f32,
    /// Sequence ratio that must be strictly exceeded, in `[0, 1]`.
    pub sequence: f32,
    /// Maximum whitespace token count for the sequence tier.
    pub short_query_tokens: usize,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            similarity: 0.4,
            fuzzy: 90.0,
            sequence: 0.6,
            short_query_tokens: 3,
        }
    }
}

/// Resolves queries against a [`KnowledgeBase`] through the fixed
/// priority cascade. The sole query entry point is
/// [`get_response`](Self::get_response); presentation layers only ever
/// call it and display the returned fields.
pub struct Responder {
    kb: KnowledgeBase,
    thresholds: MatchThresholds,
}

impl Responder {
    /// Create a responder with the default thresholds.
    pub fn new(kb: KnowledgeBase) -> Self {
        Self {
            kb,
            thresholds: MatchThresholds::default(),
        }
    }

    /// Override the thresholds. Chainable builder method.
    pub fn with_thresholds(mut self, thresholds: MatchThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// The underlying knowledge base.
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Resolve one raw query. Tiers run in strict order and the first
    /// one clearing its threshold wins:
    ///
    /// 1. TF-IDF cosine similarity over the preprocessed query.
    /// 2. Fuzzy matching over the raw query, score rescaled to `[0, 1]`.
    /// 3. Sequence similarity over the raw query, short queries only.
    /// 4. The static fallback, carrying the tier-1 score that failed its
    ///    threshold (callers rely on it for diagnostics).
    ///
    /// Never fails: every tier degrades to the next, ending at the
    /// fallback. Pure read over immutable state, so identical queries
    /// yield identical results.
    pub fn get_response(&self, raw_query: &str) -> MatchResult {
        let entries = self.kb.entries();
        let processed = self.kb.normalizer().preprocess(raw_query);

        let (vector_index, vector_score) = self.kb.index().score(&processed);
        if vector_score >= self.thresholds.similarity {
            let entry = &entries[vector_index];
            debug!(index = vector_index, score = vector_score, "Vector tier matched");
            return MatchResult {
                answer: entry.answer.clone(),
                matched_question: Some(entry.question.clone()),
                similarity: vector_score,
                method: MatchMethod::Tfidf,
            };
        }

        // The fuzzy tier sees the raw query: its own canonicalization is
        // part of the scoring, not the normalizer's.
        let candidates = fuzzy::extract(raw_query, entries, self.thresholds.fuzzy);
        if let Some(best) = candidates.into_iter().next() {
            debug!(index = best.index, score = best.score, "Fuzzy tier matched");
            return MatchResult {
                answer: best.entry.answer,
                matched_question: Some(best.entry.question),
                similarity: best.score / 100.0,
                method: MatchMethod::Fuzzy,
            };
        }

        let token_count = raw_query.split_whitespace().count();
        if token_count <= self.thresholds.short_query_tokens {
            let mut best_index = 0;
            let mut best_ratio = 0.0f32;
            for (index, entry) in entries.iter().enumerate() {
                let ratio = sequence::ratio(raw_query, &entry.question);
                if ratio > best_ratio {
                    best_index = index;
                    best_ratio = ratio;
                }
            }
            if best_ratio > self.thresholds.sequence {
                let entry = &entries[best_index];
                debug!(index = best_index, ratio = best_ratio, "Sequence tier matched");
                return MatchResult {
                    answer: entry.answer.clone(),
                    matched_question: Some(entry.question.clone()),
                    similarity: best_ratio,
                    method: MatchMethod::Sequence,
                };
            }
        }

        debug!(vector_score, token_count, "Cascade exhausted, falling back");
        MatchResult {
            answer: FALLBACK_MESSAGE.to_string(),
            matched_question: None,
            similarity: vector_score,
            method: MatchMethod::Fallback,
        }
    }
}
