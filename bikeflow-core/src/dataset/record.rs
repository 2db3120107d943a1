use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{DatasetError, TripCounts};
use crate::util::serde_ops::deserialize_coordinate;

/// the aggregated trip dataset as stored on disk or served over HTTP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDataset {
    pub stations: Vec<StationRecord>,
    #[serde(alias = "aggregatedTrips")]
    pub aggregated_trips: Vec<AggregatedTripRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_coordinate")]
    pub lat: f64,
    #[serde(deserialize_with = "deserialize_coordinate")]
    pub lng: f64,
}

/// all rides from one station to another, already counted by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedTripRecord {
    #[serde(alias = "startStationId")]
    pub start_station_id: String,
    #[serde(alias = "endStationId")]
    pub end_station_id: String,
    #[serde(alias = "tripCounts")]
    pub trip_counts: TripCounts,
}

impl RawDataset {
    /// parses a dataset from JSON bytes. any missing field, unknown count
    /// category or inconsistent count snapshot is reported as a
    /// [`DatasetError::DataShape`].
    pub fn from_json_slice(bytes: &[u8]) -> Result<RawDataset, DatasetError> {
        serde_json::from_slice(bytes).map_err(|e| DatasetError::DataShape(e.to_string()))
    }

    /// reads a dataset from a local JSON file.
    pub fn read_json(path: &Path) -> Result<RawDataset, DatasetError> {
        let contents = std::fs::read(path).map_err(|e| DatasetError::ReadError {
            path: path.to_owned(),
            message: e.to_string(),
        })?;
        RawDataset::from_json_slice(&contents)
    }

    /// writes this dataset as pretty-printed JSON.
    ///
    /// # Arguments
    ///
    /// * `path` - destination file
    /// * `overwrite` - if false, an existing file at `path` is an error
    pub fn write_json(&self, path: &Path, overwrite: bool) -> Result<(), DatasetError> {
        if path.exists() && !overwrite {
            return Err(DatasetError::WriteError {
                path: path.to_owned(),
                message: String::from("file exists and overwrite is not enabled"),
            });
        }
        let file = std::fs::File::create(path).map_err(|e| DatasetError::WriteError {
            path: path.to_owned(),
            message: e.to_string(),
        })?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|e| DatasetError::WriteError {
            path: path.to_owned(),
            message: format!("failed to serialize dataset to JSON: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camel_case_dataset() {
        let json = r#"{
            "stations": [{"id": "a", "name": "A", "lat": "37.8", "lng": -122.2}],
            "aggregatedTrips": [{
                "startStationId": "a",
                "endStationId": "a",
                "tripCounts": {
                    "total": 1,
                    "byRideType": {"classicBike": 1, "electricBike": 0},
                    "byMemberType": {"casual": 0, "member": 1},
                    "byRideTypeAndMemberType": {
                        "classicBike": {"casual": 0, "member": 1},
                        "electricBike": {"casual": 0, "member": 0}
                    }
                }
            }]
        }"#;
        let dataset = RawDataset::from_json_slice(json.as_bytes()).unwrap();
        assert_eq!(dataset.stations[0].lat, 37.8);
        assert_eq!(dataset.aggregated_trips[0].trip_counts.total(), 1);
    }

    #[test]
    fn test_missing_trip_counts_is_data_shape_error() {
        let json = r#"{
            "stations": [],
            "aggregated_trips": [{"start_station_id": "a", "end_station_id": "b"}]
        }"#;
        let result = RawDataset::from_json_slice(json.as_bytes());
        assert!(matches!(result, Err(DatasetError::DataShape(_))));
    }
}
