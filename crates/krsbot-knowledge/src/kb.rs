use std::path::Path;

use krsbot_core::{KrsbotResult, QAEntry};
use krsbot_match::{Normalizer, TfidfIndex};
use tracing::{debug, warn};

use crate::loader;

/// The immutable knowledge base: the ordered entry bank, the compiled
/// normalizer, and the TF-IDF index fitted over the preprocessed
/// questions.
///
/// Constructed once, explicitly, and then only read: every query runs
/// through `&self`, so a single instance is safe to share across
/// concurrent readers. Entry `i` corresponds to document `i` of the
/// index; nothing may reorder one without the other.
pub struct KnowledgeBase {
    entries: Vec<QAEntry>,
    normalizer: Normalizer,
    index: TfidfIndex,
}

impl KnowledgeBase {
    /// Load entries from a data directory (falling back to the built-in
    /// bank) and fit the index.
    pub async fn load(dir: &Path) -> KrsbotResult<Self> {
        Self::from_entries(loader::load_dir(dir).await)
    }

    /// Build from an explicit entry list. An empty list is replaced by
    /// the built-in default bank so the index is never degenerate.
    pub fn from_entries(entries: Vec<QAEntry>) -> KrsbotResult<Self> {
        let entries = if entries.is_empty() {
            warn!("Constructing knowledge base from zero entries, substituting defaults");
            loader::default_entries()
        } else {
            entries
        };

        let normalizer = Normalizer::new()?;
        let processed: Vec<String> = entries
            .iter()
            .map(|e| normalizer.preprocess(&e.question))
            .collect();
        let index = TfidfIndex::fit(&processed);
        debug!(
            entries = entries.len(),
            vocabulary = index.vocabulary_len(),
            "Knowledge base fitted"
        );

        Ok(Self {
            entries,
            normalizer,
            index,
        })
    }

    /// The ordered entry bank.
    pub fn entries(&self) -> &[QAEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: construction substitutes the default bank for an
    /// empty input.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The compiled normalizer used for queries and at fit time.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// The fitted TF-IDF index.
    pub fn index(&self) -> &TfidfIndex {
        &self.index
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_substitutes_default_bank() {
        let kb = KnowledgeBase::from_entries(Vec::new()).unwrap();
        assert_eq!(kb.entries(), loader::default_entries().as_slice());
        assert!(!kb.is_empty());
    }

    #[test]
    fn entry_order_is_preserved() {
        let entries = vec![
            QAEntry::new("pertama", "a1"),
            QAEntry::new("kedua", "a2"),
            QAEntry::new("ketiga", "a3"),
        ];
        let kb = KnowledgeBase::from_entries(entries.clone()).unwrap();
        assert_eq!(kb.entries(), entries.as_slice());
        assert_eq!(kb.index().document_count(), 3);
    }

    #[test]
    fn index_documents_use_preprocessed_questions() {
        let kb = KnowledgeBase::from_entries(vec![
            QAEntry::new("Gmn cara mengisi KRS?", "jawaban"),
            QAEntry::new("Kapan deadline?", "jawaban"),
        ])
        .unwrap();
        // "gmn" normalizes to "bagaimana" (a stopword), so the indexed
        // document is "cara mengisi krs" and a canonical query matches it.
        let (best, score) = kb.index().score("cara mengisi krs");
        assert_eq!(best, 0);
        assert!(score > 0.99);
    }
}
