use serde::{Deserialize, Serialize};

/// which side of a station a trip link is viewed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripDirection {
    /// trips leaving the station
    Starting,
    /// trips arriving at the station
    Ending,
}

impl std::fmt::Display for TripDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripDirection::Starting => write!(f, "starting"),
            TripDirection::Ending => write!(f, "ending"),
        }
    }
}
