use super::similarity::{self, Metric};
use super::{Incident, OrderedPair};

/// Score a pair and assemble the incident record. Confidence is the mean of
/// the metric scores, 0.0 when no metrics are registered.
pub fn build(metrics: &[Metric], pair: OrderedPair) -> Incident {
    let scores = similarity::score(metrics, &pair.original.text, &pair.copy.text);
    let confidence = if scores.is_empty() {
        0.0
    } else {
        scores.values().sum::<f64>() / scores.len() as f64
    };

    Incident {
        original: pair.original,
        copy: pair.copy,
        scores,
        confidence,
    }
}
