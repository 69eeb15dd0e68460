pub mod activity;

pub use activity::{ActivityType, UnknownActivityType};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fields carried through the engine untouched
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleExtras {
    pub confidence: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub heading: Option<f64>,
    pub heading_accuracy: Option<f64>,
    pub speed_accuracy: Option<f64>,
}

/// One validated location reading.
///
/// Only `activity_type` is ever rewritten by the smoother.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub activity_type: ActivityType,
    /// m/s
    pub speed: f64,
    /// meters
    pub coordinate_accuracy: f64,
    #[serde(default)]
    pub extras: SampleExtras,
}

impl Sample {
    pub fn new(
        timestamp: DateTime<Utc>,
        activity_type: ActivityType,
        speed: f64,
        coordinate_accuracy: f64,
    ) -> Self {
        Sample {
            timestamp,
            activity_type,
            speed,
            coordinate_accuracy,
            extras: SampleExtras::default(),
        }
    }

    pub fn with_extras(mut self, extras: SampleExtras) -> Self {
        self.extras = extras;
        self
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed * MS_TO_KMH
    }
}

/// m/s to km/h
pub const MS_TO_KMH: f64 = 3.6;
