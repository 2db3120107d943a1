use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{DatasetError, Station, StationIdx, TripCounts, TripDirection};
use crate::{dataset::AggregatedTripRecord, util::geo_utils};

/// position of a [`TripLink`] in the trip list of a loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TripLinkIdx(pub usize);

/// all trips from one station to another (or back to itself) aggregated
/// into a single directed link. immutable once constructed.
#[derive(Debug, Clone)]
pub struct TripLink {
    start_station: StationIdx,
    end_station: StationIdx,
    counts: TripCounts,
    distance_km: f64,
    is_round_trip: bool,
}

impl TripLink {
    /// resolves the endpoints of an aggregated trip record against the station index
    /// and computes the link's distance. the link is not yet attached to its stations.
    ///
    /// # Arguments
    ///
    /// * `stations` - station index keyed by station id
    /// * `record` - raw aggregated trip
    /// * `record_index` - position of the record in the source, used in error messages
    ///
    /// # Returns
    ///
    /// * the trip link, or a [`DatasetError::MissingStation`] if either endpoint is
    ///   not in the station index
    pub fn new(
        stations: &IndexMap<String, Station>,
        record: &AggregatedTripRecord,
        record_index: usize,
    ) -> Result<TripLink, DatasetError> {
        let (start_idx, start) = lookup(
            stations,
            &record.start_station_id,
            TripDirection::Starting,
            record_index,
        )?;
        let (end_idx, end) = lookup(
            stations,
            &record.end_station_id,
            TripDirection::Ending,
            record_index,
        )?;
        let distance_km = if start_idx == end_idx {
            0.0
        } else {
            geo_utils::haversine_km(start.point(), end.point())
        };
        Ok(TripLink::from_parts(
            start_idx,
            end_idx,
            record.trip_counts,
            distance_km,
        ))
    }

    pub(crate) fn from_parts(
        start_station: StationIdx,
        end_station: StationIdx,
        counts: TripCounts,
        distance_km: f64,
    ) -> TripLink {
        TripLink {
            start_station,
            end_station,
            counts,
            distance_km,
            is_round_trip: start_station == end_station,
        }
    }

    pub fn start_station(&self) -> StationIdx {
        self.start_station
    }

    pub fn end_station(&self) -> StationIdx {
        self.end_station
    }

    /// the station at the far side of this link when viewed from `direction`:
    /// the end station for starting trips, the start station for ending trips.
    pub fn other_station(&self, direction: TripDirection) -> StationIdx {
        match direction {
            TripDirection::Starting => self.end_station,
            TripDirection::Ending => self.start_station,
        }
    }

    pub fn counts(&self) -> &TripCounts {
        &self.counts
    }

    /// shorthand for `counts().total()`
    pub fn total(&self) -> u64 {
        self.counts.total()
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn is_round_trip(&self) -> bool {
        self.is_round_trip
    }
}

fn lookup<'a>(
    stations: &'a IndexMap<String, Station>,
    station_id: &str,
    role: TripDirection,
    record_index: usize,
) -> Result<(StationIdx, &'a Station), DatasetError> {
    stations
        .get_full(station_id)
        .map(|(idx, _, station)| (StationIdx(idx), station))
        .ok_or_else(|| DatasetError::MissingStation {
            station_id: station_id.to_string(),
            role,
            record_index,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BikeType, MemberType};

    fn index() -> IndexMap<String, Station> {
        let mut stations = IndexMap::new();
        for (id, lng) in [("a", 0.0), ("b", 1.0)] {
            let station = Station::new(id, id, 0.0, lng).unwrap();
            stations.insert(id.to_string(), station);
        }
        stations
    }

    fn record(start: &str, end: &str) -> AggregatedTripRecord {
        AggregatedTripRecord {
            start_station_id: start.to_string(),
            end_station_id: end.to_string(),
            trip_counts: TripCounts::single(BikeType::Electric, MemberType::Casual),
        }
    }

    #[test]
    fn test_new_link_between_stations() {
        let link = TripLink::new(&index(), &record("a", "b"), 0).expect("stations exist");
        assert_eq!(link.start_station(), StationIdx(0));
        assert_eq!(link.end_station(), StationIdx(1));
        assert_eq!(link.other_station(TripDirection::Ending), StationIdx(0));
        assert!(!link.is_round_trip());
        assert!((link.distance_km() - 111.19).abs() < 0.5);
        assert_eq!(link.total(), 1);
    }

    #[test]
    fn test_round_trip_has_zero_distance() {
        let link = TripLink::new(&index(), &record("b", "b"), 0).unwrap();
        assert!(link.is_round_trip());
        assert_eq!(link.distance_km(), 0.0);
    }

    #[test]
    fn test_missing_end_station() {
        let result = TripLink::new(&index(), &record("a", "zz"), 4);
        match result {
            Err(DatasetError::MissingStation {
                station_id,
                role,
                record_index,
            }) => {
                assert_eq!(station_id, "zz");
                assert_eq!(role, TripDirection::Ending);
                assert_eq!(record_index, 4);
            }
            other => panic!("expected MissingStation error, found {other:?}"),
        }
    }
}
