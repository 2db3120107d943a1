use serde::Serialize;

use crate::dataset::BikeShareDataset;
use crate::model::{DatasetError, Station, TripCounts, TripLink};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// what the rendering layer sees of a station.
#[derive(Debug, Clone, Serialize)]
pub struct StationView<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub coordinates: Coordinates,
    pub combined_starting_counts: &'a TripCounts,
    pub combined_ending_counts: &'a TripCounts,
    pub round_trip_count: u64,
    pub max_starting_trip_total: u64,
    pub max_ending_trip_total: u64,
}

/// a trip link endpoint, as referenced from a [`TripLinkView`].
#[derive(Debug, Clone, Serialize)]
pub struct StationRef<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub coordinates: Coordinates,
}

/// what the rendering layer sees of a trip link.
#[derive(Debug, Clone, Serialize)]
pub struct TripLinkView<'a> {
    pub start_station: StationRef<'a>,
    pub end_station: StationRef<'a>,
    pub distance_km: f64,
    pub is_round_trip: bool,
    pub counts: &'a TripCounts,
}

impl From<&Station> for Coordinates {
    fn from(value: &Station) -> Self {
        Coordinates {
            lat: value.latitude(),
            lng: value.longitude(),
        }
    }
}

impl<'a> From<&'a Station> for StationView<'a> {
    fn from(station: &'a Station) -> Self {
        StationView {
            id: station.id(),
            name: station.name(),
            coordinates: station.into(),
            combined_starting_counts: station.combined_starting_counts(),
            combined_ending_counts: station.combined_ending_counts(),
            round_trip_count: station.round_trip_count(),
            max_starting_trip_total: station.max_starting_trip_total(),
            max_ending_trip_total: station.max_ending_trip_total(),
        }
    }
}

impl<'a> From<&'a Station> for StationRef<'a> {
    fn from(station: &'a Station) -> Self {
        StationRef {
            id: station.id(),
            name: station.name(),
            coordinates: station.into(),
        }
    }
}

impl<'a> TripLinkView<'a> {
    /// resolves both endpoints of `link` in `dataset`.
    pub fn new(
        dataset: &'a BikeShareDataset,
        link: &'a TripLink,
    ) -> Result<TripLinkView<'a>, DatasetError> {
        let start = dataset.start_station(link).ok_or_else(|| {
            let msg = format!("trip link start station {} missing", link.start_station().0);
            DatasetError::Internal(msg)
        })?;
        let end = dataset.end_station(link).ok_or_else(|| {
            let msg = format!("trip link end station {} missing", link.end_station().0);
            DatasetError::Internal(msg)
        })?;
        Ok(TripLinkView {
            start_station: start.into(),
            end_station: end.into(),
            distance_km: link.distance_km(),
            is_round_trip: link.is_round_trip(),
            counts: link.counts(),
        })
    }
}
