use quotematch_core::types::{SearchOutcome, SearchResult};

/// Keep candidates with a positive score, sort them by score descending and
/// truncate to `top_n`.
///
/// The sort is stable, so ties keep the collection's original order. An
/// empty survivor set is reported as [`SearchOutcome::NoMatch`].
pub fn rank(scored: Vec<SearchResult>, top_n: usize) -> SearchOutcome {
    let mut survivors: Vec<SearchResult> = scored.into_iter().filter(|r| r.score > 0.0).collect();
    if survivors.is_empty() {
        return SearchOutcome::NoMatch;
    }
    survivors.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    survivors.truncate(top_n);
    SearchOutcome::Matches(survivors)
}
