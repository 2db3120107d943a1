use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::BikeShareDataset;
use crate::model::{TripCounts, TripDirection, TripLink};

/// summarizes a loaded bike share dataset.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "snake_case")]
pub struct DatasetSummary {
    /// location the dataset was loaded from
    pub source: String,
    pub stats: DatasetStats,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "snake_case")]
pub struct DatasetStats {
    /// number of stations in the station index
    pub stations: usize,
    /// number of trip links, round trips included
    pub trip_links: usize,
    /// number of trip links that start and end at the same station
    pub round_trip_links: usize,
    /// rides over every trip link, by category
    pub trip_counts: TripCounts,
    /// rides that ended where they started
    pub round_trips: u64,
    /// mean distance of a ride between two different stations
    pub avg_trip_distance_km: Option<f64>,
    pub longest_trip: Option<TripLinkStats>,
    /// stations with the most departures, busiest first
    pub busiest_starting_stations: Vec<StationStats>,
    /// stations with the most arrivals, busiest first
    pub busiest_ending_stations: Vec<StationStats>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "snake_case")]
pub struct TripLinkStats {
    pub start_station_id: String,
    pub end_station_id: String,
    pub distance_km: f64,
    pub total: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct StationStats {
    pub id: String,
    pub name: String,
    pub total: u64,
}

impl DatasetSummary {
    /// # Arguments
    ///
    /// * `source` - description of where the dataset came from
    /// * `dataset` - the loaded dataset
    /// * `top_n` - how many stations to list in each busiest-station ranking
    pub fn new(source: &str, dataset: &BikeShareDataset, top_n: usize) -> DatasetSummary {
        DatasetSummary {
            source: source.to_string(),
            stats: DatasetStats::new(dataset, top_n),
        }
    }
}

impl DatasetStats {
    pub fn new(dataset: &BikeShareDataset, top_n: usize) -> DatasetStats {
        let trip_counts: TripCounts = dataset.trips().iter().map(TripLink::counts).sum();
        let (round_trip_links, round_trips) = dataset
            .trips()
            .iter()
            .filter(|link| link.is_round_trip())
            .fold((0, 0), |(n, total), link| (n + 1, total + link.total()));

        // weighted by rides so that a busy link counts once per ride
        let (ride_distance, rides) = dataset
            .trips()
            .iter()
            .filter(|link| !link.is_round_trip())
            .fold((0.0, 0u64), |(distance, rides), link| {
                (distance + link.distance_km() * link.total() as f64, rides + link.total())
            });
        let avg_trip_distance_km = if rides == 0 {
            None
        } else {
            Some(ride_distance / rides as f64)
        };

        let longest_trip = dataset.longest_trip().and_then(|link| {
            let start = dataset.start_station(link)?;
            let end = dataset.end_station(link)?;
            Some(TripLinkStats {
                start_station_id: start.id().to_string(),
                end_station_id: end.id().to_string(),
                distance_km: link.distance_km(),
                total: link.total(),
            })
        });

        DatasetStats {
            stations: dataset.n_stations(),
            trip_links: dataset.n_trips(),
            round_trip_links,
            trip_counts,
            round_trips,
            avg_trip_distance_km,
            longest_trip,
            busiest_starting_stations: busiest(dataset, TripDirection::Starting, top_n),
            busiest_ending_stations: busiest(dataset, TripDirection::Ending, top_n),
        }
    }
}

/// ranks stations by their combined total in one direction. ties keep
/// station index order.
fn busiest(dataset: &BikeShareDataset, direction: TripDirection, top_n: usize) -> Vec<StationStats> {
    dataset
        .stations()
        .map(|station| StationStats {
            id: station.id().to_string(),
            name: station.name().to_string(),
            total: station.combined_counts(direction).total(),
        })
        .sorted_by(|a, b| b.total.cmp(&a.total))
        .take(top_n)
        .collect_vec()
}
