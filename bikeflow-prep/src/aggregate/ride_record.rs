use bikeflow_core::model::{BikeType, MemberType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// format of `started_at` and `ended_at`. fractional seconds are optional.
pub const RIDE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// one row of a monthly ride export. empty fields deserialize as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRecord {
    pub ride_id: String,
    pub rideable_type: String,
    pub started_at: String,
    pub ended_at: String,
    pub start_station_name: String,
    pub start_station_id: Option<String>,
    pub end_station_name: String,
    pub end_station_id: Option<String>,
    pub start_lat: Option<f64>,
    pub start_lng: Option<f64>,
    pub end_lat: Option<f64>,
    pub end_lng: Option<f64>,
    pub member_casual: String,
}

impl RideRecord {
    /// both station ids, if the ride has them
    pub fn station_ids(&self) -> Option<(&str, &str)> {
        let start = self.start_station_id.as_deref().filter(|s| !s.is_empty())?;
        let end = self.end_station_id.as_deref().filter(|s| !s.is_empty())?;
        Some((start, end))
    }

    pub fn categories(&self) -> Result<(BikeType, MemberType), String> {
        let bike_type = self.rideable_type.parse::<BikeType>()?;
        let member_type = self.member_casual.parse::<MemberType>()?;
        Ok((bike_type, member_type))
    }

    pub fn started_at(&self) -> Result<NaiveDateTime, String> {
        parse_ride_datetime(&self.started_at)
    }

    pub fn ended_at(&self) -> Result<NaiveDateTime, String> {
        parse_ride_datetime(&self.ended_at)
    }
}

fn parse_ride_datetime(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value.trim(), RIDE_DATETIME_FORMAT).map_err(|e| {
        format!("failed reading timestamp '{value}'. required format: '{RIDE_DATETIME_FORMAT}'. error: {e}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn ride(start: Option<&str>, end: Option<&str>) -> RideRecord {
        RideRecord {
            ride_id: String::from("r"),
            rideable_type: String::from("electric_bike"),
            started_at: String::from("2024-04-01 08:00:00.512"),
            ended_at: String::from("2024-04-01 08:20:00"),
            start_station_name: String::from("A"),
            start_station_id: start.map(String::from),
            end_station_name: String::from("B"),
            end_station_id: end.map(String::from),
            start_lat: Some(37.8),
            start_lng: Some(-122.27),
            end_lat: Some(37.81),
            end_lng: Some(-122.26),
            member_casual: String::from("casual"),
        }
    }

    #[test]
    fn test_station_ids_require_both_ends() {
        assert_eq!(ride(Some("A"), Some("B")).station_ids(), Some(("A", "B")));
        assert_eq!(ride(None, Some("B")).station_ids(), None);
        assert_eq!(ride(Some("A"), Some("")).station_ids(), None);
    }

    #[test]
    fn test_timestamps_with_and_without_fraction() {
        let r = ride(Some("A"), Some("B"));
        assert_eq!(r.started_at().unwrap().nanosecond(), 512_000_000);
        assert_eq!(r.ended_at().unwrap().minute(), 20);
        let bad = RideRecord {
            started_at: String::from("04/01/2024 8:00"),
            ..r
        };
        assert!(bad.started_at().is_err());
    }

    #[test]
    fn test_categories() {
        let r = ride(Some("A"), Some("B"));
        assert_eq!(
            r.categories(),
            Ok((BikeType::Electric, MemberType::Casual))
        );
        let docked = RideRecord {
            rideable_type: String::from("docked_bike"),
            ..r
        };
        assert!(docked.categories().is_err());
    }
}
