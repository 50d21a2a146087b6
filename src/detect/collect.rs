use super::CandidateSet;
use crate::twitter::{Post, SearchProvider};
use anyhow::{Context, Result};
use futures::future;
use tracing::debug;

/// Search for candidate copies of every source post. One search per post,
/// all issued concurrently and joined as a batch; the first failing search
/// aborts the whole collection with the underlying cause attached.
pub async fn collect(sources: &[Post], search: &dyn SearchProvider) -> Result<Vec<CandidateSet>> {
    let lookups = sources.iter().map(|source| async move {
        let found = search
            .search(&source.text)
            .await
            .with_context(|| format!("search failed for post {}", source.id))?;

        let candidates: Vec<Post> = found
            .into_iter()
            .filter(|candidate| !disqualified(source, candidate))
            .collect();

        debug!(
            source = %source.id,
            candidates = candidates.len(),
            "collected candidates"
        );

        Ok::<_, anyhow::Error>(CandidateSet {
            source: source.clone(),
            candidates,
        })
    });

    future::try_join_all(lookups).await
}

/// A candidate is disqualified when it is the source post itself or a
/// retweet (search also surfaces retweets of retweets; the flag covers both).
fn disqualified(source: &Post, candidate: &Post) -> bool {
    candidate.id == source.id || candidate.retweet
}
