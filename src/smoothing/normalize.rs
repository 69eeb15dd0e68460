use crate::types::Sample;

/// Orders samples by timestamp and keeps only the first sample seen for each
/// timestamp. The sort is stable, so "first" means first in input order.
pub fn normalize(mut samples: Vec<Sample>) -> Vec<Sample> {
    samples.sort_by_key(|s| s.timestamp);
    samples.dedup_by_key(|s| s.timestamp);
    samples
}
