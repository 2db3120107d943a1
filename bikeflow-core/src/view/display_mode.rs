use serde::{Deserialize, Serialize};

use crate::model::TripDirection;

/// which trip lines a station shows. clicking a station steps through
/// off, outgoing trips, incoming trips and back to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Off,
    TripsOut,
    TripsIn,
}

impl DisplayMode {
    pub fn next(&self) -> DisplayMode {
        match self {
            DisplayMode::Off => DisplayMode::TripsOut,
            DisplayMode::TripsOut => DisplayMode::TripsIn,
            DisplayMode::TripsIn => DisplayMode::Off,
        }
    }

    /// the trip direction shown in this mode, if any
    pub fn direction(&self) -> Option<TripDirection> {
        match self {
            DisplayMode::Off => None,
            DisplayMode::TripsOut => Some(TripDirection::Starting),
            DisplayMode::TripsIn => Some(TripDirection::Ending),
        }
    }
}

impl From<TripDirection> for DisplayMode {
    fn from(value: TripDirection) -> Self {
        match value {
            TripDirection::Starting => DisplayMode::TripsOut,
            TripDirection::Ending => DisplayMode::TripsIn,
        }
    }
}
