//! Longest-matching-block sequence similarity.
//!
//! Reference: Ratcliff, J. W. & Obershelp, J. A. (1988), "Pattern
//! Matching: The Gestalt Approach" — the algorithm behind Python's
//! `difflib.SequenceMatcher`.
//!
//! The ratio is `2·M / T` where `M` is the total length of the matching
//! blocks found by repeatedly taking the longest common substring
//! (earliest on ties) and recursing on the pieces to its left and right,
//! and `T` is the combined length of both strings. The popular-element
//! junk heuristic of `difflib` is omitted; it only activates on inputs
//! an order of magnitude longer than FAQ questions.

use std::collections::HashMap;

/// Case-insensitive similarity ratio in `[0, 1]` between two full
/// strings. Two empty strings are identical (ratio 1.0).
pub fn ratio(a: &str, b: &str) -> f32 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matching_total(&a, &b);
    (2.0 * matched as f32) / total as f32
}

/// Sum of the sizes of all matching blocks.
fn matching_total(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        b2j.entry(c).or_default().push(j);
    }

    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if size > 0 {
            total += size;
            pending.push((alo, i, blo, j));
            pending.push((i + size, ahi, j + size, bhi));
        }
    }
    total
}

/// Longest matching block within `a[alo..ahi]` / `b[blo..bhi]`,
/// earliest block on ties.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best_i = alo;
    let mut best_j = blo;
    let mut best_size = 0;

    // j2len[j] = length of the longest match ending at a[i-1], b[j].
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for i in alo..ahi {
        let mut next_j2len: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(&a[i]) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| j2len.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_j2len.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        j2len = next_j2len;
    }
    (best_i, best_j, best_size)
}
