use super::{CandidateSet, OrderedPair};

/// Flatten candidate sets into (original, copy) pairs, resolving authorship
/// by timestamp. Sets with no candidates are dropped. Output order follows
/// source-post order, then candidate order within each set.
///
/// On an exact timestamp tie the source post is treated as the original.
pub fn organize(sets: Vec<CandidateSet>) -> Vec<OrderedPair> {
    sets.into_iter()
        .filter(|set| !set.candidates.is_empty())
        .flat_map(|set| {
            let source = set.source;
            set.candidates.into_iter().map(move |candidate| {
                if candidate.created_at < source.created_at {
                    OrderedPair {
                        original: candidate,
                        copy: source.clone(),
                    }
                } else {
                    OrderedPair {
                        original: source.clone(),
                        copy: candidate,
                    }
                }
            })
        })
        .collect()
}
