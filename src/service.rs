//! Entry point for an embedding API layer.
//!
//! Validates a ride upload, smooths it and hands back both the result and
//! the before/after trajectories a chart renderer needs. Storage and
//! authentication belong to the caller.

use crate::config::SmoothingConfig;
use crate::error::SmootherResult;
use crate::observer::{LogObserver, SmoothingObserver};
use crate::ride::{RideRequest, RideSummary};
use crate::smoothing::{ActivitySmoother, PassReport};
use crate::types::Sample;

/// Everything produced for one ride upload
#[derive(Clone, Debug)]
pub struct ProcessedRide {
    pub request_id: String,
    pub summary: RideSummary,
    /// Validated input in upload order, before filtering or correction
    pub before: Vec<Sample>,
    /// Trajectory after both passes
    pub after: Vec<Sample>,
    pub passes: Vec<PassReport>,
}

pub struct RideProcessor<O: SmoothingObserver = LogObserver> {
    smoother: ActivitySmoother<O>,
}

impl RideProcessor<LogObserver> {
    pub fn new(config: SmoothingConfig) -> SmootherResult<Self> {
        Ok(RideProcessor {
            smoother: ActivitySmoother::new(config)?,
        })
    }
}

impl<O: SmoothingObserver> RideProcessor<O> {
    pub fn with_smoother(smoother: ActivitySmoother<O>) -> Self {
        RideProcessor { smoother }
    }

    pub fn smoother(&self) -> &ActivitySmoother<O> {
        &self.smoother
    }

    pub fn process(&self, request_id: &str, ride: &RideRequest) -> SmootherResult<ProcessedRide> {
        log::info!(
            "[{}] processing ride {} with {} locations",
            request_id,
            ride.ride_id.as_deref().unwrap_or("-"),
            ride.locations.len()
        );

        let before = ride.to_samples().inspect_err(|e| {
            log::warn!("[{}] rejected ride: {}", request_id, e);
        })?;

        let outcome = self.smoother.smooth(before.clone()).inspect_err(|e| {
            log::warn!("[{}] smoothing failed: {}", request_id, e);
        })?;

        Ok(ProcessedRide {
            request_id: request_id.to_string(),
            summary: RideSummary::from_samples(&outcome.samples),
            before,
            after: outcome.samples,
            passes: outcome.passes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SmootherError;
    use crate::types::ActivityType;
    use serde_json::json;

    fn upload(blocks: &[(&str, usize, f64)]) -> RideRequest {
        let mut locations = Vec::new();
        let mut second = 0;
        for &(kind, count, speed_ms) in blocks {
            for _ in 0..count {
                locations.push(json!({
                    "timestamp": format!("2021-05-14T07:{:02}:{:02}Z", second / 60, second % 60),
                    "activity": { "type": kind, "confidence": 70 },
                    "coordinates": {
                        "latitude": 50.0,
                        "longitude": 8.0,
                        "coordinateAccuracy": 10.0,
                        "speed": speed_ms
                    }
                }));
                second += 1;
            }
        }
        serde_json::from_value(json!({ "ride_id": "ride-42", "locations": locations })).unwrap()
    }

    #[test]
    fn test_process_rule_a_ride() {
        let ride = upload(&[("in_vehicle", 15, 22.0), ("walking", 2, 5.5), ("in_vehicle", 15, 22.0)]);
        let processor = RideProcessor::new(SmoothingConfig::default()).unwrap();
        let result = processor.process("req-1", &ride).unwrap();

        assert_eq!(result.request_id, "req-1");
        assert_eq!(result.before.len(), 32);
        assert_eq!(result.before[15].activity_type, ActivityType::Walking);
        assert!(result
            .after
            .iter()
            .all(|s| s.activity_type == ActivityType::InVehicle));
        assert_eq!(result.passes.len(), 2);

        assert_eq!(
            result.summary.started_at.as_deref(),
            Some("2021-05-14T07:00:00.000000Z")
        );
        assert_eq!(
            result.summary.ended_at.as_deref(),
            Some("2021-05-14T07:00:31.000000Z")
        );
        assert_eq!(result.summary.locations.len(), 32);
        assert_eq!(
            result.summary.locations[16].activity.kind,
            ActivityType::InVehicle
        );
    }

    #[test]
    fn test_before_keeps_still_samples() {
        let ride = upload(&[("in_vehicle", 12, 20.0), ("still", 3, 0.0), ("in_vehicle", 12, 20.0)]);
        let processor = RideProcessor::new(SmoothingConfig::default()).unwrap();
        let result = processor.process("req-2", &ride).unwrap();
        assert_eq!(result.before.len(), 27);
        assert_eq!(result.after.len(), 24);
    }

    #[test]
    fn test_validation_failure_surfaces() {
        let ride = upload(&[("in_vehicle", 3, 20.0), ("hovering", 1, 1.0)]);
        let processor = RideProcessor::new(SmoothingConfig::default()).unwrap();
        let err = processor.process("req-3", &ride).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err,
            SmootherError::UnknownActivity {
                index: 3,
                value: "hovering".to_string()
            }
        );
    }

    #[test]
    fn test_everything_filtered_gives_empty_ride() {
        let ride = upload(&[("still", 5, 0.0)]);
        let processor = RideProcessor::new(SmoothingConfig::default()).unwrap();
        let result = processor.process("req-4", &ride).unwrap();
        assert_eq!(result.before.len(), 5);
        assert!(result.after.is_empty());
        assert!(result.summary.started_at.is_none());
        assert!(result.summary.locations.is_empty());
    }
}
