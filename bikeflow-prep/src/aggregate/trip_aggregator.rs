use bikeflow_core::dataset::{AggregatedTripRecord, RawDataset, StationRecord};
use bikeflow_core::model::TripCounts;
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{PrepError, RideRecord, UnknownCategoryPolicy};

/// counts rides into one [`TripCounts`] per (start station, end station)
/// pair and collects the stations they reference.
pub struct TripAggregator {
    policy: UnknownCategoryPolicy,
    stations: IndexMap<String, StationEntry>,
    trips: IndexMap<(String, String), TripCounts>,
    complete: usize,
    incomplete: usize,
    skipped: usize,
    period: Option<RidePeriod>,
}

/// what happened to one ride row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideOutcome {
    Aggregated,
    Incomplete,
    Skipped,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct PrepReport {
    /// rows with both a start and an end station id
    pub complete: usize,
    /// rows missing a station id
    pub incomplete: usize,
    /// complete rows dropped for an unknown category
    pub skipped: usize,
    pub stations: usize,
    pub trips: usize,
    pub period: Option<RidePeriod>,
}

/// earliest ride start and latest ride end among aggregated rides.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct RidePeriod {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

struct StationEntry {
    name: String,
    coordinates: Option<(f64, f64)>,
}

impl TripAggregator {
    pub fn new(policy: UnknownCategoryPolicy) -> TripAggregator {
        TripAggregator {
            policy,
            stations: IndexMap::new(),
            trips: IndexMap::new(),
            complete: 0,
            incomplete: 0,
            skipped: 0,
            period: None,
        }
    }

    /// counts one ride.
    ///
    /// # Arguments
    ///
    /// * `row_index` - position of the row in the source, used in messages
    /// * `ride` - the ride
    ///
    /// # Returns
    ///
    /// * how the ride was handled. fails only on an unknown category under
    ///   [`UnknownCategoryPolicy::Fail`].
    pub fn add_ride(&mut self, row_index: usize, ride: &RideRecord) -> Result<RideOutcome, PrepError> {
        let (start_id, end_id) = match ride.station_ids() {
            Some(ids) => ids,
            None => {
                self.incomplete += 1;
                return Ok(RideOutcome::Incomplete);
            }
        };
        self.complete += 1;

        let (bike_type, member_type) = match (ride.categories(), self.policy) {
            (Ok(categories), _) => categories,
            (Err(message), UnknownCategoryPolicy::Fail) => {
                return Err(PrepError::UnknownCategory { row_index, message });
            }
            (Err(message), UnknownCategoryPolicy::Skip) => {
                log::warn!("skipping ride row {row_index} ('{}'): {message}", ride.ride_id);
                self.skipped += 1;
                return Ok(RideOutcome::Skipped);
            }
        };

        self.observe_station(start_id, &ride.start_station_name, ride.start_lat, ride.start_lng);
        self.observe_station(end_id, &ride.end_station_name, ride.end_lat, ride.end_lng);
        self.observe_period(row_index, ride);

        *self
            .trips
            .entry((start_id.to_string(), end_id.to_string()))
            .or_default() += &TripCounts::single(bike_type, member_type);
        Ok(RideOutcome::Aggregated)
    }

    /// builds the aggregated dataset: stations sorted by id, trips by
    /// descending total with ties in first-seen order.
    pub fn finish(self) -> Result<(RawDataset, PrepReport), PrepError> {
        let stations = self
            .stations
            .into_iter()
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(id, entry)| match entry.coordinates {
                Some((lat, lng)) => Ok(StationRecord {
                    id,
                    name: entry.name,
                    lat,
                    lng,
                }),
                None => Err(PrepError::MissingCoordinates(id)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let aggregated_trips = self
            .trips
            .into_iter()
            .sorted_by(|(_, a), (_, b)| b.total().cmp(&a.total()))
            .map(|((start_station_id, end_station_id), trip_counts)| AggregatedTripRecord {
                start_station_id,
                end_station_id,
                trip_counts,
            })
            .collect_vec();

        let report = PrepReport {
            complete: self.complete,
            incomplete: self.incomplete,
            skipped: self.skipped,
            stations: stations.len(),
            trips: aggregated_trips.len(),
            period: self.period,
        };
        log::info!(
            "aggregated {} complete rides ({} incomplete, {} skipped) into {} trips between {} stations",
            report.complete,
            report.incomplete,
            report.skipped,
            report.trips,
            report.stations
        );
        let dataset = RawDataset {
            stations,
            aggregated_trips,
        };
        Ok((dataset, report))
    }

    /// the first row naming a station sets its name. coordinates come from
    /// the first row that carries them.
    fn observe_station(&mut self, id: &str, name: &str, lat: Option<f64>, lng: Option<f64>) {
        let coordinates = lat.zip(lng);
        match self.stations.get_mut(id) {
            Some(entry) => {
                if entry.coordinates.is_none() {
                    entry.coordinates = coordinates;
                }
            }
            None => {
                let entry = StationEntry {
                    name: name.to_string(),
                    coordinates,
                };
                self.stations.insert(id.to_string(), entry);
            }
        }
    }

    fn observe_period(&mut self, row_index: usize, ride: &RideRecord) {
        let started_at = ride
            .started_at()
            .map_err(|e| log::warn!("ride row {row_index}: {e}"))
            .ok();
        let ended_at = ride
            .ended_at()
            .map_err(|e| log::warn!("ride row {row_index}: {e}"))
            .ok();
        for time in [started_at, ended_at].into_iter().flatten() {
            self.period = match self.period {
                None => Some(RidePeriod {
                    start: time,
                    end: time,
                }),
                Some(p) => Some(RidePeriod {
                    start: p.start.min(time),
                    end: p.end.max(time),
                }),
            };
        }
    }
}

/// aggregates every ride of `rides`, stopping at the first error.
pub fn aggregate_rides<I>(
    rides: I,
    policy: UnknownCategoryPolicy,
) -> Result<(RawDataset, PrepReport), PrepError>
where
    I: IntoIterator<Item = Result<RideRecord, PrepError>>,
{
    let mut aggregator = TripAggregator::new(policy);
    for (row_index, ride) in rides.into_iter().enumerate() {
        aggregator.add_ride(row_index, &ride?)?;
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeflow_core::model::{BikeType, MemberType};

    fn ride(start: &str, end: &str, bike: &str, member: &str) -> RideRecord {
        RideRecord {
            ride_id: format!("{start}-{end}"),
            rideable_type: bike.to_string(),
            started_at: String::from("2024-04-02 10:00:00"),
            ended_at: String::from("2024-04-02 10:15:00"),
            start_station_name: format!("Station {start}"),
            start_station_id: Some(start.to_string()).filter(|s| !s.is_empty()),
            end_station_name: format!("Station {end}"),
            end_station_id: Some(end.to_string()).filter(|s| !s.is_empty()),
            start_lat: Some(37.80),
            start_lng: Some(-122.27),
            end_lat: Some(37.87),
            end_lng: Some(-122.27),
            member_casual: member.to_string(),
        }
    }

    #[test]
    fn test_aggregates_per_station_pair() {
        let rides = vec![
            ride("B", "A", "classic_bike", "member"),
            ride("A", "B", "classic_bike", "casual"),
            ride("A", "B", "electric_bike", "member"),
            ride("B", "A", "electric_bike", "member"),
            ride("A", "B", "classic_bike", "casual"),
        ];
        let (dataset, report) =
            aggregate_rides(rides.into_iter().map(Ok), UnknownCategoryPolicy::Fail).unwrap();
        let ids = dataset.stations.iter().map(|s| s.id.as_str()).collect_vec();
        assert_eq!(ids, vec!["A", "B"]);
        let first = &dataset.aggregated_trips[0];
        assert_eq!((first.start_station_id.as_str(), first.end_station_id.as_str()), ("A", "B"));
        assert_eq!(first.trip_counts.total(), 3);
        assert_eq!(first.trip_counts.get(BikeType::Classic, MemberType::Casual), 2);
        assert_eq!(dataset.aggregated_trips[1].trip_counts.total(), 2);
        assert_eq!(report.complete, 5);
        assert_eq!(report.trips, 2);
    }

    #[test]
    fn test_equal_totals_keep_first_seen_order() {
        let rides = vec![
            ride("C", "A", "classic_bike", "member"),
            ride("A", "B", "classic_bike", "member"),
            ride("B", "C", "classic_bike", "member"),
        ];
        let (dataset, _) =
            aggregate_rides(rides.into_iter().map(Ok), UnknownCategoryPolicy::Fail).unwrap();
        let starts = dataset
            .aggregated_trips
            .iter()
            .map(|t| t.start_station_id.as_str())
            .collect_vec();
        assert_eq!(starts, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_incomplete_rows_are_counted_not_aggregated() {
        let mut aggregator = TripAggregator::new(UnknownCategoryPolicy::Fail);
        let outcome = aggregator
            .add_ride(0, &ride("", "A", "classic_bike", "member"))
            .unwrap();
        assert_eq!(outcome, RideOutcome::Incomplete);
        let (dataset, report) = aggregator.finish().unwrap();
        assert!(dataset.stations.is_empty());
        assert_eq!(report.incomplete, 1);
        assert_eq!(report.complete, 0);
        assert_eq!(report.period, None);
    }

    #[test]
    fn test_unknown_category_policy() {
        let docked = ride("A", "B", "docked_bike", "member");
        let mut failing = TripAggregator::new(UnknownCategoryPolicy::Fail);
        let result = failing.add_ride(4, &docked);
        assert!(matches!(result, Err(PrepError::UnknownCategory { row_index: 4, .. })));

        let mut skipping = TripAggregator::new(UnknownCategoryPolicy::Skip);
        assert_eq!(skipping.add_ride(4, &docked).unwrap(), RideOutcome::Skipped);
        let (dataset, report) = skipping.finish().unwrap();
        assert!(dataset.stations.is_empty());
        assert_eq!(report.skipped, 1);
        assert_eq!(report.complete, 1);
    }

    #[test]
    fn test_coordinates_from_first_row_that_has_them() {
        let mut first = ride("A", "B", "classic_bike", "member");
        first.start_lat = None;
        let mut second = ride("A", "B", "classic_bike", "member");
        second.start_lat = Some(37.75);
        second.start_lng = Some(-122.40);
        let mut third = ride("A", "B", "classic_bike", "member");
        third.start_lat = Some(1.0);
        third.start_lng = Some(1.0);
        let (dataset, _) = aggregate_rides(
            vec![first, second, third].into_iter().map(Ok),
            UnknownCategoryPolicy::Fail,
        )
        .unwrap();
        assert_eq!(dataset.stations[0].lat, 37.75);
        assert_eq!(dataset.stations[0].lng, -122.40);
    }

    #[test]
    fn test_station_without_coordinates_fails() {
        let mut r = ride("A", "B", "classic_bike", "member");
        r.end_lng = None;
        let result = aggregate_rides(vec![Ok(r)], UnknownCategoryPolicy::Fail);
        assert!(matches!(result, Err(PrepError::MissingCoordinates(id)) if id == "B"));
    }
}
