use indexmap::IndexMap;

use super::RawDataset;
use crate::model::{
    DatasetError, Station, StationIdx, TripDirection, TripLink, TripLinkIdx,
};

/// the station/trip graph built from one aggregated dataset.
///
/// stations are indexed by id in the order they appear in the source, trip
/// links are kept in source order. the graph is read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct BikeShareDataset {
    stations: IndexMap<String, Station>,
    trips: Vec<TripLink>,
}

impl BikeShareDataset {
    /// builds the graph in two phases: every station is indexed first, then
    /// each aggregated trip becomes a [`TripLink`] attached to its endpoints
    /// (outgoing on the start station, then incoming on the end station).
    ///
    /// # Arguments
    ///
    /// * `raw` - the parsed dataset
    ///
    /// # Returns
    ///
    /// * the loaded dataset. fails on a repeated station id, a trip that references
    ///   an unknown station, or a malformed station. nothing is returned on failure.
    pub fn load(raw: RawDataset) -> Result<BikeShareDataset, DatasetError> {
        log::debug!(
            "loading dataset with {} station records and {} aggregated trip records",
            raw.stations.len(),
            raw.aggregated_trips.len()
        );

        let mut stations: IndexMap<String, Station> = IndexMap::with_capacity(raw.stations.len());
        for record in raw.stations.iter() {
            if stations.contains_key(&record.id) {
                return Err(DatasetError::DuplicateStation(record.id.clone()));
            }
            let station = Station::new(&record.id, &record.name, record.lat, record.lng)?;
            stations.insert(record.id.clone(), station);
        }

        let mut trips: Vec<TripLink> = Vec::with_capacity(raw.aggregated_trips.len());
        for (record_index, record) in raw.aggregated_trips.iter().enumerate() {
            let link = TripLink::new(&stations, record, record_index)?;
            let link_idx = TripLinkIdx(trips.len());
            station_mut(&mut stations, link.start_station())?.attach_outgoing(link_idx, &link);
            station_mut(&mut stations, link.end_station())?.attach_incoming(link_idx, &link);
            trips.push(link);
        }

        log::info!(
            "loaded bike share dataset with {} stations and {} trip links",
            stations.len(),
            trips.len()
        );
        Ok(BikeShareDataset { stations, trips })
    }

    /// the station index, keyed by station id in source order
    pub fn station_index(&self) -> &IndexMap<String, Station> {
        &self.stations
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    pub fn station(&self, station_id: &str) -> Option<&Station> {
        self.stations.get(station_id)
    }

    pub fn station_at(&self, idx: StationIdx) -> Option<&Station> {
        self.stations.get_index(idx.0).map(|(_, station)| station)
    }

    pub fn trips(&self) -> &[TripLink] {
        &self.trips
    }

    pub fn trip(&self, idx: TripLinkIdx) -> Option<&TripLink> {
        self.trips.get(idx.0)
    }

    pub fn start_station(&self, link: &TripLink) -> Option<&Station> {
        self.station_at(link.start_station())
    }

    pub fn end_station(&self, link: &TripLink) -> Option<&Station> {
        self.station_at(link.end_station())
    }

    pub fn n_stations(&self) -> usize {
        self.stations.len()
    }

    pub fn n_trips(&self) -> usize {
        self.trips.len()
    }

    /// sum of rides over every trip link, round trips included
    pub fn total_trips(&self) -> u64 {
        self.trips.iter().map(TripLink::total).sum()
    }

    /// the trip links of a station in one direction whose total is at least
    /// `min_total`, in dataset order. the model is not modified.
    ///
    /// # Arguments
    ///
    /// * `station_id` - the station to query
    /// * `direction` - starting (outgoing) or ending (incoming) links
    /// * `min_total` - lower bound, inclusive, on each link's ride total
    pub fn station_trips(
        &self,
        station_id: &str,
        direction: TripDirection,
        min_total: u64,
    ) -> Result<Vec<(TripLinkIdx, &TripLink)>, DatasetError> {
        let station = self
            .station(station_id)
            .ok_or_else(|| DatasetError::StationNotFound(station_id.to_string()))?;
        station
            .trips(direction)
            .iter()
            .map(|idx| {
                self.trip(*idx).map(|link| (*idx, link)).ok_or_else(|| {
                    DatasetError::Internal(format!(
                        "station '{station_id}' references missing trip link {}",
                        idx.0
                    ))
                })
            })
            .filter(|result| match result {
                Ok((_, link)) => link.total() >= min_total,
                Err(_) => true,
            })
            .collect()
    }

    /// the non-round-trip link covering the greatest distance. on ties,
    /// the first link in dataset order wins.
    pub fn longest_trip(&self) -> Option<&TripLink> {
        self.trips
            .iter()
            .filter(|link| !link.is_round_trip())
            .fold(None, |longest: Option<&TripLink>, link| match longest {
                Some(current) if current.distance_km() >= link.distance_km() => Some(current),
                _ => Some(link),
            })
    }
}

fn station_mut(
    stations: &mut IndexMap<String, Station>,
    idx: StationIdx,
) -> Result<&mut Station, DatasetError> {
    stations
        .get_index_mut(idx.0)
        .map(|(_, station)| station)
        .ok_or_else(|| DatasetError::Internal(format!("station index {} out of range", idx.0)))
}
