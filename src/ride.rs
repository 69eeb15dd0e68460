//! JSON shapes of a ride upload and of the smoothed ride handed back.

use crate::error::{SmootherError, SmootherResult};
use crate::types::{ActivityType, Sample, SampleExtras};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RideRequest {
    #[serde(default)]
    pub ride_id: Option<String>,
    #[serde(rename = "startedAt", default)]
    pub started_at: Option<String>,
    #[serde(rename = "endedAt", default)]
    pub ended_at: Option<String>,
    pub locations: Vec<LocationRecord>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub activity: ActivityRecord,
    #[serde(default)]
    pub coordinates: CoordinatesRecord,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ActivityRecord {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoordinatesRecord {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub coordinate_accuracy: Option<f64>,
    pub heading: Option<f64>,
    pub heading_accuracy: Option<f64>,
    pub speed: Option<f64>,
    pub speed_accuracy: Option<f64>,
}

impl RideRequest {
    /// Validates every record and converts it, keeping input order.
    /// The first bad record aborts the conversion.
    pub fn to_samples(&self) -> SmootherResult<Vec<Sample>> {
        self.locations
            .iter()
            .enumerate()
            .map(|(index, record)| record.to_sample(index))
            .collect()
    }
}

impl LocationRecord {
    pub fn to_sample(&self, index: usize) -> SmootherResult<Sample> {
        let raw_ts = self.timestamp.as_deref().ok_or(SmootherError::MissingField {
            index,
            field: "timestamp",
        })?;
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| SmootherError::InvalidTimestamp {
            index,
            value: raw_ts.to_string(),
        })?;

        let raw_type = self.activity.kind.as_deref().ok_or(SmootherError::MissingField {
            index,
            field: "activity.type",
        })?;
        let activity_type =
            raw_type
                .parse::<ActivityType>()
                .map_err(|e| SmootherError::UnknownActivity {
                    index,
                    value: e.0,
                })?;

        let speed = non_negative(index, "coordinates.speed", self.coordinates.speed)?;
        let coordinate_accuracy = non_negative(
            index,
            "coordinates.coordinateAccuracy",
            self.coordinates.coordinate_accuracy,
        )?;

        let c = &self.coordinates;
        let extras = SampleExtras {
            confidence: self.activity.confidence,
            latitude: c.latitude,
            longitude: c.longitude,
            altitude: c.altitude,
            heading: c.heading,
            heading_accuracy: c.heading_accuracy,
            speed_accuracy: c.speed_accuracy,
        };

        Ok(Sample::new(timestamp, activity_type, speed, coordinate_accuracy).with_extras(extras))
    }
}

fn non_negative(index: usize, field: &'static str, value: Option<f64>) -> SmootherResult<f64> {
    let value = value.ok_or(SmootherError::MissingField { index, field })?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SmootherError::NegativeValue {
            index,
            field,
            value,
        })
    }
}

/// Offset forms after RFC 3339: `%#z` also takes `+02`, `+0200` and `Z`
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

/// Naive forms, read as UTC
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Accepts ISO-8601 date-times with an extended, basic or hour-only offset,
/// optional seconds and fraction. Without an offset the time is taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(raw, format) {
            return Some(ts.with_timezone(&Utc));
        }
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// `YYYY-MM-DDTHH:MM:SS.ffffffZ`
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Smoothed ride returned to the caller
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RideSummary {
    #[serde(rename = "startedAt")]
    pub started_at: Option<String>,
    #[serde(rename = "endedAt")]
    pub ended_at: Option<String>,
    pub locations: Vec<LocationOutput>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LocationOutput {
    pub timestamp: String,
    pub activity: ActivityOutput,
    pub coordinates: CoordinatesOutput,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActivityOutput {
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub confidence: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatesOutput {
    pub coordinate_accuracy: f64,
    pub speed_accuracy: Option<f64>,
    pub heading: Option<f64>,
    pub altitude: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub heading_accuracy: Option<f64>,
    pub speed: f64,
}

impl From<&Sample> for LocationOutput {
    fn from(s: &Sample) -> Self {
        LocationOutput {
            timestamp: format_timestamp(&s.timestamp),
            activity: ActivityOutput {
                kind: s.activity_type,
                confidence: s.extras.confidence,
            },
            coordinates: CoordinatesOutput {
                coordinate_accuracy: s.coordinate_accuracy,
                speed_accuracy: s.extras.speed_accuracy,
                heading: s.extras.heading,
                altitude: s.extras.altitude,
                latitude: s.extras.latitude,
                longitude: s.extras.longitude,
                heading_accuracy: s.extras.heading_accuracy,
                speed: s.speed,
            },
        }
    }
}

impl RideSummary {
    /// Builds the summary from a time-ordered trajectory.
    /// An empty trajectory has no start or end.
    pub fn from_samples(samples: &[Sample]) -> Self {
        RideSummary {
            started_at: samples.first().map(|s| format_timestamp(&s.timestamp)),
            ended_at: samples.last().map(|s| format_timestamp(&s.timestamp)),
            locations: samples.iter().map(LocationOutput::from).collect(),
        }
    }
}
