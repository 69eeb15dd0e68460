use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Activity label assigned on-device to a location sample
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    OnFoot,
    Walking,
    Running,
    OnBicycle,
    Still,
    InVehicle,
    Unknown,
}

impl ActivityType {
    pub const ALL: [ActivityType; 7] = [
        ActivityType::OnFoot,
        ActivityType::Walking,
        ActivityType::Running,
        ActivityType::OnBicycle,
        ActivityType::Still,
        ActivityType::InVehicle,
        ActivityType::Unknown,
    ];

    /// Wire name of the label (`in_vehicle`, `on_bicycle`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::OnFoot => "on_foot",
            ActivityType::Walking => "walking",
            ActivityType::Running => "running",
            ActivityType::OnBicycle => "on_bicycle",
            ActivityType::Still => "still",
            ActivityType::InVehicle => "in_vehicle",
            ActivityType::Unknown => "unknown",
        }
    }

    /// `on_foot` and `walking` are treated as the same pedestrian activity.
    /// `running` is not.
    pub fn is_on_foot(&self) -> bool {
        matches!(self, ActivityType::OnFoot | ActivityType::Walking)
    }
}

impl Display for ActivityType {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a label outside the fixed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownActivityType(pub String);

impl Display for UnknownActivityType {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "unknown activity type: {}", self.0)
    }
}

impl std::error::Error for UnknownActivityType {}

impl FromStr for ActivityType {
    type Err = UnknownActivityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownActivityType(s.to_string()))
    }
}
