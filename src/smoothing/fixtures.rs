//! Trip builders shared by the smoothing tests.

use crate::types::{ActivityType, Sample};
use chrono::{DateTime, Duration, TimeZone, Utc};

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 5, 14, 7, 30, 0).unwrap()
}

/// Builds a trip from `(label, count, speed_kmh)` blocks, one sample per second
pub fn trip(blocks: &[(ActivityType, usize, f64)]) -> Vec<Sample> {
    let mut samples = Vec::new();
    let mut t = start_time();
    for &(label, count, speed_kmh) in blocks {
        for _ in 0..count {
            samples.push(Sample::new(t, label, speed_kmh / 3.6, 10.0));
            t += Duration::seconds(1);
        }
    }
    samples
}

pub fn labels(samples: &[Sample]) -> Vec<ActivityType> {
    samples.iter().map(|s| s.activity_type).collect()
}
