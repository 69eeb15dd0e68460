use crate::error::{SmootherError, SmootherResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Coordinates worse than this are dropped before segmentation
pub const MAX_COORDINATE_ACCURACY_M: f64 = 500.0;
/// Max average speed a person can realistically sustain on foot
pub const MAX_WALKING_SPEED_KMH: f64 = 6.0;
/// Runs shorter than this many samples are treated as noise.
/// Point count stands in for a distance measure.
pub const SIGNIFICANCE_THRESHOLD: usize = 10;

/// How the "next run exists" bound is evaluated.
///
/// Runs are numbered 1..=N. `LastRun` gives every run but the last a next
/// neighbour. `Legacy` reproduces the older `position < N - 1` comparison,
/// which also withholds the next neighbour from run N-1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextRunBound {
    #[default]
    LastRun,
    Legacy,
}

impl NextRunBound {
    pub fn has_next(&self, position: usize, run_count: usize) -> bool {
        match self {
            NextRunBound::LastRun => position < run_count,
            NextRunBound::Legacy => position + 1 < run_count,
        }
    }
}

/// Thresholds for the label smoother
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub max_coordinate_accuracy_m: f64,
    pub max_walking_speed_kmh: f64,
    pub significance_threshold: usize,
    pub next_run_bound: NextRunBound,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            max_coordinate_accuracy_m: MAX_COORDINATE_ACCURACY_M,
            max_walking_speed_kmh: MAX_WALKING_SPEED_KMH,
            significance_threshold: SIGNIFICANCE_THRESHOLD,
            next_run_bound: NextRunBound::LastRun,
        }
    }
}

impl SmoothingConfig {
    /// Load from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: SmoothingConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SmootherResult<()> {
        if !self.max_coordinate_accuracy_m.is_finite() || self.max_coordinate_accuracy_m <= 0.0 {
            return Err(SmootherError::InvalidConfig(format!(
                "max_coordinate_accuracy_m must be positive, got {}",
                self.max_coordinate_accuracy_m
            )));
        }
        if !self.max_walking_speed_kmh.is_finite() || self.max_walking_speed_kmh <= 0.0 {
            return Err(SmootherError::InvalidConfig(format!(
                "max_walking_speed_kmh must be positive, got {}",
                self.max_walking_speed_kmh
            )));
        }
        if self.significance_threshold == 0 {
            return Err(SmootherError::InvalidConfig(
                "significance_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = SmoothingConfig::default();
        assert_eq!(config.max_coordinate_accuracy_m, 500.0);
        assert_eq!(config.max_walking_speed_kmh, 6.0);
        assert_eq!(config.significance_threshold, 10);
        assert_eq!(config.next_run_bound, NextRunBound::LastRun);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_next_run_bound() {
        // 4 runs, 1-based positions
        assert!(NextRunBound::LastRun.has_next(3, 4));
        assert!(!NextRunBound::LastRun.has_next(4, 4));

        // Legacy comparison drops the next neighbour of the second-to-last run
        assert!(NextRunBound::Legacy.has_next(2, 4));
        assert!(!NextRunBound::Legacy.has_next(3, 4));
        assert!(!NextRunBound::Legacy.has_next(4, 4));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: SmoothingConfig =
            serde_json::from_str(r#"{"next_run_bound": "legacy"}"#).unwrap();
        assert_eq!(config.next_run_bound, NextRunBound::Legacy);
        assert_eq!(config.significance_threshold, SIGNIFICANCE_THRESHOLD);
    }

    #[test]
    fn test_validate_rejects_bad_thresholds() {
        let config = SmoothingConfig {
            significance_threshold: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SmootherError::InvalidConfig(_))
        ));

        let config = SmoothingConfig {
            max_walking_speed_kmh: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
