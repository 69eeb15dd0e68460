use crate::types::{ActivityType, Sample};

/// Drops samples that are never worth correcting.
///
/// `still` samples are structural noise and are removed outright rather than
/// relabelled. Samples whose coordinate accuracy is at or beyond
/// `max_accuracy_m` are unreliable regardless of label.
pub fn filter_samples(samples: Vec<Sample>, max_accuracy_m: f64) -> Vec<Sample> {
    samples
        .into_iter()
        .filter(|s| is_reliable(s, max_accuracy_m))
        .collect()
}

pub fn is_reliable(sample: &Sample, max_accuracy_m: f64) -> bool {
    sample.activity_type != ActivityType::Still && sample.coordinate_accuracy < max_accuracy_m
}
