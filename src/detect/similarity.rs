use std::collections::{BTreeMap, BTreeSet};

/// Scores for one pair of texts, keyed by metric name. The key set is fixed
/// by the registered metrics; every value is in [0, 1].
pub type SimilarityScores = BTreeMap<&'static str, f64>;

pub type MetricFn = fn(&str, &str) -> f64;

/// A named pairwise text-similarity function.
#[derive(Clone, Copy)]
pub struct Metric {
    pub name: &'static str,
    func: MetricFn,
}

impl Metric {
    pub const fn new(name: &'static str, func: MetricFn) -> Self {
        Self { name, func }
    }

    pub fn apply(&self, a: &str, b: &str) -> f64 {
        (self.func)(a, b).clamp(0.0, 1.0)
    }
}

/// The default metric set: a token-overlap coefficient and an edit-distance
/// ratio, so confidence is not dominated by one algorithm's bias.
pub fn default_metrics() -> Vec<Metric> {
    vec![
        Metric::new("token_set", token_set),
        Metric::new("levenshtein", levenshtein),
    ]
}

/// Apply every registered metric to (a, b).
pub fn score(metrics: &[Metric], a: &str, b: &str) -> SimilarityScores {
    metrics
        .iter()
        .map(|metric| (metric.name, metric.apply(a, b)))
        .collect()
}

/// Normalize text for comparison: lowercase and collapse any run of
/// non-alphanumeric characters into a single space.
fn normalize(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                normalized.push(lower);
            }
        } else if !normalized.ends_with(' ') {
            normalized.push(' ');
        }
    }
    normalized.trim().to_string()
}

/// Jaccard coefficient over the normalized word sets.
fn token_set(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let set_a: BTreeSet<&str> = a.split_whitespace().collect();
    let set_b: BTreeSet<&str> = b.split_whitespace().collect();

    let intersection = set_a.intersection(&set_b).count() as f64;
    let union = set_a.union(&set_b).count() as f64;
    intersection / union
}

/// Normalized Levenshtein ratio on the normalized texts.
fn levenshtein(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    strsim::normalized_levenshtein(&a, &b)
}
