//! Similarity Matcher
//!
//! Normalized Levenshtein similarity between recognized tokens and target words.
//! Comparison is case-insensitive; both sides are folded to lowercase first.

pub mod tokenize;

pub use tokenize::split_words;

use strsim::levenshtein;

/// Acceptance threshold used by the highlight resolver.
///
/// A pair matches when its similarity is strictly greater than this value.
pub const MATCH_THRESHOLD: f64 = 0.5;

/// Levenshtein edit distance between the lowercase forms of `a` and `b`
///
/// Unit cost for insertions, deletions and substitutions, counted in chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    distance_folded(&a, &b)
}

/// Similarity in `[0, 1]`: `(max_len - distance) / max_len`
///
/// Two empty strings are identical (1.0); an empty string against a
/// non-empty one scores 0.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = distance_folded(&a, &b);
    (max_len - distance) as f64 / max_len as f64
}

/// Returns true iff `similarity(a, b) > threshold`
pub fn is_match(a: &str, b: &str, threshold: f64) -> bool {
    similarity(a, b) > threshold
}

/// Distance on already folded input.
///
/// strsim keeps a single row sized to its second argument, so the shorter
/// string goes second to bound the scratch space by the shorter input.
fn distance_folded(a: &str, b: &str) -> usize {
    if a.chars().count() >= b.chars().count() {
        levenshtein(a, b)
    } else {
        levenshtein(b, a)
    }
}
