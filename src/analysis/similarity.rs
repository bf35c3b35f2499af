//! Token-overlap similarity between alert texts.

use std::collections::HashSet;

/// Split text into a case-folded set of word-like tokens (alphanumeric
/// runs). Chinese text has no token separators, so a contiguous Chinese
/// phrase contributes a single token; that is intentional and matches how
/// incident descriptions are written.
fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .collect()
}

/// Relatedness score in [0, 1] between two texts: Jaccard index over token
/// sets, scaled by a length-balance factor that penalizes comparing texts
/// of very different sizes. Symmetric and deterministic.
pub fn similarity(text_a: &str, text_b: &str) -> f64 {
    let tokens_a = tokenize(text_a);
    let tokens_b = tokenize(text_b);

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();
    let jaccard = intersection as f64 / union as f64;

    let min_len = tokens_a.len().min(tokens_b.len());
    let max_len = tokens_a.len().max(tokens_b.len());
    let length_ratio = min_len as f64 / max_len as f64;

    jaccard * length_ratio
}
