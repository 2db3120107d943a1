use geo::Point;
use serde::{Deserialize, Serialize};

use super::{DatasetError, TripCounts, TripDirection, TripLink, TripLinkIdx};

/// position of a [`Station`] in the station index of a loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StationIdx(pub usize);

/// a bike-share dock along with the running totals of every trip link
/// attached to it.
///
/// a station references its trip links by [`TripLinkIdx`]; the links
/// themselves live in the dataset. the running totals are only mutated while
/// the dataset is loaded and are read-only afterward.
#[derive(Debug, Clone)]
pub struct Station {
    id: String,
    name: String,
    point: Point<f64>,
    trips_starting_here: Vec<TripLinkIdx>,
    trips_ending_here: Vec<TripLinkIdx>,
    combined_starting_counts: TripCounts,
    combined_ending_counts: TripCounts,
    round_trip_count: u64,
    max_starting_trip_total: u64,
    max_ending_trip_total: u64,
}

impl Station {
    /// creates a station with no trips attached.
    ///
    /// # Arguments
    ///
    /// * `id` - unique station identifier from the source data, must not be empty
    /// * `name` - display name
    /// * `lat` - latitude in degrees, within [-90, 90]
    /// * `lng` - longitude in degrees, within [-180, 180]
    pub fn new(id: &str, name: &str, lat: f64, lng: f64) -> Result<Station, DatasetError> {
        if id.trim().is_empty() {
            let msg = format!("station '{name}' has an empty id");
            return Err(DatasetError::DataShape(msg));
        }
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            let msg = format!("station '{id}' has invalid latitude {lat}");
            return Err(DatasetError::DataShape(msg));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            let msg = format!("station '{id}' has invalid longitude {lng}");
            return Err(DatasetError::DataShape(msg));
        }
        Ok(Station {
            id: id.to_string(),
            name: name.to_string(),
            point: Point::new(lng, lat),
            trips_starting_here: vec![],
            trips_ending_here: vec![],
            combined_starting_counts: TripCounts::default(),
            combined_ending_counts: TripCounts::default(),
            round_trip_count: 0,
            max_starting_trip_total: 0,
            max_ending_trip_total: 0,
        })
    }

    /// records a trip link leaving this station.
    pub(crate) fn attach_outgoing(&mut self, link_idx: TripLinkIdx, link: &TripLink) {
        self.trips_starting_here.push(link_idx);
        self.combined_starting_counts.merge(link.counts());
        if !link.is_round_trip() {
            self.max_starting_trip_total = self.max_starting_trip_total.max(link.total());
        }
    }

    /// records a trip link arriving at this station. round trips are
    /// counted here only, so they are not double counted.
    pub(crate) fn attach_incoming(&mut self, link_idx: TripLinkIdx, link: &TripLink) {
        self.trips_ending_here.push(link_idx);
        self.combined_ending_counts.merge(link.counts());
        if link.is_round_trip() {
            self.round_trip_count = self.round_trip_count.saturating_add(link.total());
        } else {
            self.max_ending_trip_total = self.max_ending_trip_total.max(link.total());
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// station location as (x=longitude, y=latitude)
    pub fn point(&self) -> Point<f64> {
        self.point
    }

    pub fn latitude(&self) -> f64 {
        self.point.y()
    }

    pub fn longitude(&self) -> f64 {
        self.point.x()
    }

    pub fn trips_starting_here(&self) -> &[TripLinkIdx] {
        &self.trips_starting_here
    }

    pub fn trips_ending_here(&self) -> &[TripLinkIdx] {
        &self.trips_ending_here
    }

    /// trip links in the given direction, in dataset order.
    pub fn trips(&self, direction: TripDirection) -> &[TripLinkIdx] {
        match direction {
            TripDirection::Starting => &self.trips_starting_here,
            TripDirection::Ending => &self.trips_ending_here,
        }
    }

    pub fn combined_starting_counts(&self) -> &TripCounts {
        &self.combined_starting_counts
    }

    pub fn combined_ending_counts(&self) -> &TripCounts {
        &self.combined_ending_counts
    }

    pub fn combined_counts(&self, direction: TripDirection) -> &TripCounts {
        match direction {
            TripDirection::Starting => &self.combined_starting_counts,
            TripDirection::Ending => &self.combined_ending_counts,
        }
    }

    pub fn round_trip_count(&self) -> u64 {
        self.round_trip_count
    }

    pub fn max_starting_trip_total(&self) -> u64 {
        self.max_starting_trip_total
    }

    pub fn max_ending_trip_total(&self) -> u64 {
        self.max_ending_trip_total
    }

    /// largest non-round-trip link total in the given direction, or 0.
    /// sizes the minimum-count range control of a station's trip display.
    pub fn max_trip_total(&self, direction: TripDirection) -> u64 {
        match direction {
            TripDirection::Starting => self.max_starting_trip_total,
            TripDirection::Ending => self.max_ending_trip_total,
        }
    }
}
