use std::collections::{BTreeMap, HashMap, HashSet};

use crate::stopwords::is_stopword;

/// Vocabulary size cap; when the corpus produces more distinct terms,
/// the most frequent ones are kept.
const MAX_FEATURES: usize = 1000;

/// Tokenize text into lowercase words, filtering tokens with length <= 1.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|w| w.len() > 1)
        .collect()
}

/// Terms for one document: stopword-filtered unigrams plus the bigrams
/// formed over the remaining adjacent tokens.
fn terms(text: &str) -> Vec<String> {
    let tokens: Vec<String> = tokenize(text)
        .into_iter()
        .filter(|t| !is_stopword(t))
        .collect();
    let mut terms = tokens.clone();
    terms.extend(tokens.windows(2).map(|w| format!("{} {}", w[0], w[1])));
    terms
}

/// A fit-once TF-IDF vector space over the question bank.
///
/// Document vectors are computed at construction and are read-only
/// afterwards; queries are transformed into the same space and compared
/// by cosine similarity.
///
/// Weighting uses the smoothed formulation:
/// ```text
/// idf(t)    = ln((1 + N) / (1 + df(t))) + 1
/// weight    = tf(t, d) * idf(t)
/// ```
/// with every document vector L2-normalized, so cosine similarity is a
/// plain dot product in `[0, 1]`.
pub struct TfidfIndex {
    /// term -> column index
    vocabulary: HashMap<String, usize>,
    /// column index -> inverse document frequency
    idf: Vec<f32>,
    /// One sparse, L2-normalized vector per document, in input order.
    /// Ordered maps keep float accumulation order fixed, so repeated
    /// scoring of the same query is bit-for-bit identical.
    doc_vectors: Vec<BTreeMap<usize, f32>>,
}

impl TfidfIndex {
    /// Fit the vector space over the given documents. Document order is
    /// preserved: `score` reports indexes into this slice.
    pub fn fit(documents: &[String]) -> Self {
        Self::fit_limited(documents, MAX_FEATURES)
    }

    fn fit_limited(documents: &[String], max_features: usize) -> Self {
        let doc_terms: Vec<Vec<String>> = documents.iter().map(|d| terms(d)).collect();

        // Corpus-wide term counts and document frequencies.
        let mut corpus_count: HashMap<&str, usize> = HashMap::new();
        let mut df: HashMap<&str, usize> = HashMap::new();
        for doc in &doc_terms {
            for term in doc {
                *corpus_count.entry(term.as_str()).or_insert(0) += 1;
            }
            let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        // Select the vocabulary: most frequent terms first when over the
        // cap (ties lexicographic), then assign indexes in sorted order.
        let mut selected: Vec<&str> = corpus_count.keys().copied().collect();
        if selected.len() > max_features {
            selected.sort_by(|a, b| {
                corpus_count[b]
                    .cmp(&corpus_count[a])
                    .then_with(|| a.cmp(b))
            });
            selected.truncate(max_features);
        }
        selected.sort_unstable();

        let vocabulary: HashMap<String, usize> = selected
            .iter()
            .enumerate()
            .map(|(idx, term)| ((*term).to_string(), idx))
            .collect();

        let n = documents.len() as f32;
        let mut idf = vec![0.0f32; vocabulary.len()];
        for (term, &idx) in &vocabulary {
            let term_df = df.get(term.as_str()).copied().unwrap_or(0) as f32;
            idf[idx] = ((1.0 + n) / (1.0 + term_df)).ln() + 1.0;
        }

        let doc_vectors = doc_terms
            .iter()
            .map(|doc| weigh(doc, &vocabulary, &idf))
            .collect();

        Self {
            vocabulary,
            idf,
            doc_vectors,
        }
    }

    /// Transform a preprocessed query into the fitted space.
    /// Out-of-vocabulary terms contribute nothing.
    pub fn transform(&self, text: &str) -> BTreeMap<usize, f32> {
        weigh(&terms(text), &self.vocabulary, &self.idf)
    }

    /// Cosine similarity of the query against every document; returns
    /// the index of the maximum and its similarity in `[0, 1]`.
    /// Ties resolve to the first index attaining the maximum; a query
    /// sharing no vocabulary with any document scores `(0, 0.0)`.
    pub fn score(&self, query: &str) -> (usize, f32) {
        let query_vector = self.transform(query);

        let mut best_index = 0;
        let mut best_score = 0.0f32;
        for (index, doc_vector) in self.doc_vectors.iter().enumerate() {
            let similarity = dot(&query_vector, doc_vector);
            if similarity > best_score {
                best_index = index;
                best_score = similarity;
            }
        }
        (best_index, best_score.min(1.0))
    }

    /// Number of documents in the fitted space.
    pub fn document_count(&self) -> usize {
        self.doc_vectors.len()
    }

    /// Number of terms in the fitted vocabulary.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Count terms, weight by IDF, and L2-normalize into a sparse vector.
fn weigh(
    doc_terms: &[String],
    vocabulary: &HashMap<String, usize>,
    idf: &[f32],
) -> BTreeMap<usize, f32> {
    let mut vector: BTreeMap<usize, f32> = BTreeMap::new();
    for term in doc_terms {
        if let Some(&idx) = vocabulary.get(term) {
            *vector.entry(idx).or_insert(0.0) += idf[idx];
        }
    }

    let norm: f32 = vector.values().map(|w| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
    vector
}

/// Dot product of two sparse vectors (iterates the smaller one).
fn dot(a: &BTreeMap<usize, f32>, b: &BTreeMap<usize, f32>) -> f32 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(idx, wa)| large.get(idx).map(|wb| wa * wb))
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| (*t).to_string()).collect()
    }

    #[test]
    fn identical_query_scores_one() {
        let index = TfidfIndex::fit(&docs(&[
            "cara mengisi krs online",
            "maksimal sks satu semester",
        ]));
        let (best, score) = index.score("cara mengisi krs online");
        assert_eq!(best, 0);
        assert!((score - 1.0).abs() < 1e-3, "exact match should score ~1.0, got {score}");
    }

    #[test]
    fn disjoint_query_scores_zero() {
        let index = TfidfIndex::fit(&docs(&["cara mengisi krs", "deadline pengisian krs"]));
        let (best, score) = index.score("resep masakan rendang");
        assert_eq!(best, 0, "no-overlap queries fall back to the first index");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn stopword_only_query_scores_zero() {
        let index = TfidfIndex::fit(&docs(&["cara mengisi krs"]));
        let (_, score) = index.score("apa itu yang mana");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn bigrams_reward_word_order() {
        let index = TfidfIndex::fit(&docs(&["mata kuliah", "kuliah mata"]));
        let (best, score) = index.score("mata kuliah");
        assert_eq!(best, 0, "shared bigram should prefer the same-order document");
        assert!((score - 1.0).abs() < 1e-3);
    }

    #[test]
    fn ties_resolve_to_first_index() {
        let index = TfidfIndex::fit(&docs(&["jadwal bentrok", "jadwal bentrok"]));
        let (best, score) = index.score("jadwal bentrok");
        assert_eq!(best, 0);
        assert!(score > 0.99);
    }

    #[test]
    fn max_features_keeps_most_frequent_terms() {
        let index = TfidfIndex::fit_limited(
            &docs(&["aa bb", "aa bb", "aa cc"]),
            3,
        );
        assert_eq!(index.vocabulary_len(), 3);
        // "cc" only occurs once and is cut from the capped vocabulary.
        let (_, score) = index.score("cc");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn short_tokens_are_dropped() {
        // Single-character tokens never enter the vocabulary.
        let index = TfidfIndex::fit(&docs(&["a b krs"]));
        assert_eq!(index.vocabulary_len(), 1);
    }

    #[test]
    fn document_count_matches_input_order() {
        let index = TfidfIndex::fit(&docs(&["satu dua", "tiga empat", "lima enam"]));
        assert_eq!(index.document_count(), 3);
        let (best, _) = index.score("lima enam");
        assert_eq!(best, 2);
    }
}
