//! Speed-over-time chart data for the before/after comparison.
//!
//! Rasterising the chart is left to a [`ChartRenderer`]; this module only
//! prepares the series and ships a JSON encoder for them.

use crate::types::{ActivityType, Sample};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Plot colour for an activity label
pub fn label_color(label: ActivityType) -> &'static str {
    match label {
        ActivityType::OnFoot | ActivityType::Walking => "cyan",
        ActivityType::Running => "blue",
        ActivityType::OnBicycle => "green",
        ActivityType::Still => "black",
        ActivityType::InVehicle => "red",
        ActivityType::Unknown => "gray",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub speed_kmh: f64,
    pub label: ActivityType,
    pub color: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpeedChart {
    pub title: String,
    pub y_label: &'static str,
    pub points: Vec<ChartPoint>,
}

impl SpeedChart {
    pub fn from_samples(title: &str, samples: &[Sample]) -> Self {
        SpeedChart {
            title: title.to_string(),
            y_label: "km/h",
            points: samples
                .iter()
                .map(|s| ChartPoint {
                    timestamp: s.timestamp,
                    speed_kmh: s.speed_kmh(),
                    label: s.activity_type,
                    color: label_color(s.activity_type),
                })
                .collect(),
        }
    }

    /// Labels present in the chart, in first-seen order, for the legend
    pub fn legend(&self) -> Vec<ActivityType> {
        let mut seen = Vec::new();
        for p in &self.points {
            if !seen.contains(&p.label) {
                seen.push(p.label);
            }
        }
        seen
    }
}

/// Turns the uncorrected and corrected trajectories into an encoded chart
pub trait ChartRenderer {
    fn render(&self, before: &[Sample], after: &[Sample]) -> Result<String>;
}

/// Encodes both charts as a JSON document
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonChartRenderer {
    pub pretty: bool,
}

#[derive(Serialize)]
struct ChartPair {
    before: SpeedChart,
    after: SpeedChart,
}

impl ChartRenderer for JsonChartRenderer {
    fn render(&self, before: &[Sample], after: &[Sample]) -> Result<String> {
        let pair = ChartPair {
            before: SpeedChart::from_samples("before", before),
            after: SpeedChart::from_samples("after", after),
        };
        let encoded = if self.pretty {
            serde_json::to_string_pretty(&pair)?
        } else {
            serde_json::to_string(&pair)?
        };
        Ok(encoded)
    }
}
