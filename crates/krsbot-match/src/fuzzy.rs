use krsbot_core::QAEntry;
use strsim::normalized_levenshtein;

/// At most this many top-scoring candidates are considered before the
/// threshold filter is applied.
pub const CANDIDATE_LIMIT: usize = 3;

/// A fuzzy-matching candidate for one stored entry.
#[derive(Debug, Clone)]
pub struct FuzzyMatch {
    /// The matched entry.
    pub entry: QAEntry,
    /// Similarity score in `[0, 100]`.
    pub score: f32,
    /// Position of the entry in the knowledge bank.
    pub index: usize,
}

/// Lowercase, map non-alphanumeric runs to single spaces, trim.
fn process(text: &str) -> String {
    let mapped: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn token_sort(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Token-based similarity in `[0, 100]`: the better of the plain and
/// token-sorted normalized Levenshtein similarities of the processed
/// strings. The token-sorted pass makes the score tolerant of word-order
/// differences on top of single-character edits.
pub fn score(a: &str, b: &str) -> f32 {
    let pa = process(a);
    let pb = process(b);
    let plain = normalized_levenshtein(&pa, &pb);
    let sorted = normalized_levenshtein(&token_sort(&pa), &token_sort(&pb));
    (plain.max(sorted) * 100.0) as f32
}

/// Score the query against every stored question, keep the top
/// [`CANDIDATE_LIMIT`] by descending score (ties keep bank order), then
/// retain only candidates scoring at least `threshold`.
pub fn extract(query: &str, entries: &[QAEntry], threshold: f32) -> Vec<FuzzyMatch> {
    let mut matches: Vec<FuzzyMatch> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| FuzzyMatch {
            entry: entry.clone(),
            score: score(query, &entry.question),
            index,
        })
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(CANDIDATE_LIMIT);
    matches.retain(|m| m.score >= threshold);
    matches
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn bank(questions: &[&str]) -> Vec<QAEntry> {
        questions
            .iter()
            .map(|q| QAEntry::new(*q, format!("jawaban untuk {q}")))
            .collect()
    }

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(score("Apa itu KRS?", "apa itu krs"), 100.0);
    }

    #[test]
    fn single_typo_stays_above_90() {
        let s = score("Apa itu KRX?", "Apa itu KRS?");
        assert!(s >= 90.0, "one edit in eleven characters should score >= 90, got {s}");
    }

    #[test]
    fn word_order_is_forgiven_by_token_sort() {
        assert_eq!(score("krs deadline", "deadline krs"), 100.0);
    }

    #[test]
    fn extract_filters_by_threshold() {
        let entries = bank(&["Kapan deadline pengisian KRS?", "Apa itu KRS?"]);
        let matches = extract("Kapan deadline pengisian KRX?", &entries, 90.0);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].index, 0);
        assert!(matches[0].score >= 90.0);
    }

    #[test]
    fn extract_caps_candidates_before_filtering() {
        let entries = bank(&["aaa bbb", "aaa bbb", "aaa bbb", "aaa bbb", "aaa bbb"]);
        let matches = extract("aaa bbb", &entries, 0.0);
        assert_eq!(matches.len(), CANDIDATE_LIMIT);
        // Stable sort keeps bank order among equal scores.
        assert_eq!(matches[0].index, 0);
        assert_eq!(matches[1].index, 1);
        assert_eq!(matches[2].index, 2);
    }

    #[test]
    fn extract_returns_empty_when_nothing_qualifies() {
        let entries = bank(&["Apa itu KRS?"]);
        let matches = extract("resep masakan padang", &entries, 90.0);
        assert!(matches.is_empty());
    }

    #[test]
    fn results_sorted_by_descending_score() {
        let entries = bank(&["abcdefgh", "abcdefgx", "zzzzzzzz"]);
        let matches = extract("abcdefgh", &entries, 0.0);
        assert_eq!(matches[0].index, 0);
        for pair in matches.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}
