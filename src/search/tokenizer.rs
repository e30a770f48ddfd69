/// Split a free-text query into lowercase terms.
///
/// Terms are separated by runs of whitespace. There is no stemming, stop-word
/// removal or normalization, matching is plain substring containment.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|s| s.to_lowercase())
        .collect()
}
