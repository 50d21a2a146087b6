pub mod collect;
pub mod incident;
pub mod organize;
pub mod report;
pub mod similarity;

use crate::twitter::{Post, SearchProvider};
use anyhow::Result;
use self::similarity::{Metric, SimilarityScores};
use tracing::debug;

/// Candidate copies found for one source post.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    pub source: Post,
    pub candidates: Vec<Post>,
}

/// A (original, copy) pair with authorship resolved by timestamp:
/// `original.created_at <= copy.created_at`, never the same post id.
#[derive(Debug, Clone)]
pub struct OrderedPair {
    pub original: Post,
    pub copy: Post,
}

/// One scored theft record.
#[derive(Debug, Clone)]
pub struct Incident {
    pub original: Post,
    pub copy: Post,
    pub scores: SimilarityScores,
    pub confidence: f64,
}

/// Incidents ranked by confidence, highest first.
#[derive(Debug, Clone)]
pub struct Report {
    incidents: Vec<Incident>,
}

/// Run the full pipeline over the source posts: concurrent candidate
/// search, pair organization, scoring, and ranking.
pub async fn run(
    sources: &[Post],
    search: &dyn SearchProvider,
    metrics: &[Metric],
) -> Result<Report> {
    let sets = collect::collect(sources, search).await?;
    let pairs = organize::organize(sets);
    debug!(pairs = pairs.len(), "organized candidate pairs");

    let incidents = pairs
        .into_iter()
        .map(|pair| incident::build(metrics, pair))
        .collect();

    Ok(report::aggregate(incidents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twitter::Author;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    fn post(id: &str, handle: &str, text: &str, ts: i64, retweet: bool) -> Post {
        Post {
            id: id.to_string(),
            author: Author {
                name: handle.to_uppercase(),
                handle: handle.to_string(),
            },
            text: text.to_string(),
            created_at: Utc.timestamp_opt(ts, 0).unwrap(),
            retweet,
        }
    }

    struct StubSearch {
        results: HashMap<String, Vec<Post>>,
    }

    #[async_trait]
    impl SearchProvider for StubSearch {
        async fn search(&self, query: &str) -> Result<Vec<Post>> {
            Ok(self.results.get(query).cloned().unwrap_or_default())
        }
    }

    #[tokio::test]
    async fn test_identical_copy_yields_one_full_confidence_incident() {
        let sources = vec![post("1", "ada", "Hello world", 100, false)];
        let search = StubSearch {
            results: HashMap::from([(
                "Hello world".to_string(),
                vec![post("2", "copycat", "Hello world", 200, false)],
            )]),
        };

        let report = run(&sources, &search, &similarity::default_metrics())
            .await
            .unwrap();

        assert_eq!(report.incidents().len(), 1);
        let incident = &report.incidents()[0];
        assert_eq!(incident.original.id, "1");
        assert_eq!(incident.copy.id, "2");
        assert!((incident.confidence - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_retweet_candidates_never_become_incidents() {
        let sources = vec![post("1", "ada", "Hello world", 100, false)];
        let search = StubSearch {
            results: HashMap::from([(
                "Hello world".to_string(),
                vec![post("2", "copycat", "Hello world", 200, true)],
            )]),
        };

        let report = run(&sources, &search, &similarity::default_metrics())
            .await
            .unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn test_sources_without_candidates_are_dropped() {
        let sources = vec![
            post("1", "ada", "nothing matches this", 100, false),
            post("2", "ada", "stolen post", 110, false),
        ];
        let search = StubSearch {
            results: HashMap::from([(
                "stolen post".to_string(),
                vec![post("3", "copycat", "stolen post", 300, false)],
            )]),
        };

        let report = run(&sources, &search, &similarity::default_metrics())
            .await
            .unwrap();

        assert_eq!(report.incidents().len(), 1);
        assert_eq!(report.incidents()[0].original.id, "2");
    }

    #[tokio::test]
    async fn test_self_match_yields_no_incident() {
        let sources = vec![post("1", "ada", "Hello world", 100, false)];
        let search = StubSearch {
            results: HashMap::from([(
                "Hello world".to_string(),
                vec![post("1", "ada", "Hello world", 100, false)],
            )]),
        };

        let report = run(&sources, &search, &similarity::default_metrics())
            .await
            .unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn test_closer_copies_rank_higher() {
        let sources = vec![
            post("1", "ada", "the quick brown fox jumps", 100, false),
            post("2", "ada", "lorem ipsum dolor sit amet", 110, false),
        ];
        let search = StubSearch {
            results: HashMap::from([
                (
                    "the quick brown fox jumps".to_string(),
                    vec![post("3", "x", "a quick brown dog sleeps", 300, false)],
                ),
                (
                    "lorem ipsum dolor sit amet".to_string(),
                    vec![post("4", "y", "lorem ipsum dolor sit amet", 400, false)],
                ),
            ]),
        };

        let report = run(&sources, &search, &similarity::default_metrics())
            .await
            .unwrap();

        assert_eq!(report.incidents().len(), 2);
        assert_eq!(report.incidents()[0].copy.id, "4");
        assert_eq!(report.incidents()[1].copy.id, "3");
    }
}
