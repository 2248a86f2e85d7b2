use std::collections::HashMap;

use crate::models::ScoredOutfit;

/// Default number of results allowed to share one archetype
pub const DEFAULT_DIVERSITY_CAP: usize = 3;

/// Hard cap on the number of outfits returned, regardless of diversity
pub const MAX_DIVERSE_RESULTS: usize = 50;

/// Caps how many outfits may share an archetype, keeping score order
///
/// Walks the already score-sorted input once and keeps an outfit only while
/// fewer than `k` outfits of its archetype have been kept. Collection stops
/// once [`MAX_DIVERSE_RESULTS`] outfits have been kept.
///
/// This is a greedy single pass. It guarantees the per-archetype cap and
/// preserves relative order, but it does not search for the highest-scoring
/// diverse subset overall.
pub fn ensure_diversity(scored: Vec<ScoredOutfit>, k: usize) -> Vec<ScoredOutfit> {
    let input_len = scored.len();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut kept = Vec::with_capacity(input_len.min(MAX_DIVERSE_RESULTS));

    for item in scored {
        if kept.len() >= MAX_DIVERSE_RESULTS {
            break;
        }
        let count = counts.entry(item.archetype_key()).or_insert(0);
        if *count < k {
            *count += 1;
            kept.push(item);
        }
    }

    tracing::debug!(input = input_len, kept = kept.len(), k, "Applied diversity cap");

    kept
}
