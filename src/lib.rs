//! Activity label smoothing for recorded trips.
//!
//! Takes a ride of geotagged samples carrying on-device activity labels and
//! relabels short or implausible stretches so the label sequence can be used
//! for analytics. See [`smoothing`] for the engine and [`service`] for the
//! ride-level entry point.

pub mod chart;
pub mod config;
pub mod error;
pub mod observer;
pub mod ride;
pub mod service;
pub mod smoothing;
pub mod types;

pub use chart::{ChartRenderer, JsonChartRenderer, SpeedChart};
pub use config::{NextRunBound, SmoothingConfig};
pub use error::{SmootherError, SmootherResult};
pub use observer::{CorrectionEvent, LogObserver, NullObserver, RecordingObserver, SmoothingObserver};
pub use ride::{RideRequest, RideSummary};
pub use service::{ProcessedRide, RideProcessor};
pub use smoothing::{ActivitySmoother, PassReport, SmoothingOutcome, PASSES};
pub use types::{ActivityType, Sample, SampleExtras};
