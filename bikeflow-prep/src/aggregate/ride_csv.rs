use std::path::Path;

use bikeflow_core::dataset::RawDataset;
use kdam::tqdm;

use super::{aggregate_rides, PrepError, PrepReport, RideRecord, UnknownCategoryPolicy};
use crate::util::fs;

/// reads a ride CSV (plain or `.gz`) and aggregates it into a dataset.
pub fn aggregate_ride_csv(
    path: &Path,
    policy: UnknownCategoryPolicy,
) -> Result<(RawDataset, PrepReport), PrepError> {
    let reader = fs::open_reader(path)?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader.headers().map_err(|e| PrepError::CsvReadError {
        path: path.to_owned(),
        message: format!("failure reading headers: {e}"),
    })?;

    log::info!("aggregating rides from '{}' with unknown category policy '{policy}'", path.display());
    let rows = tqdm!(
        csv_reader.into_deserialize::<RideRecord>(),
        desc = format!("aggregate rides {}", path.display())
    );
    let rides = rows.enumerate().map(|(row_index, row)| {
        row.map_err(|e| PrepError::CsvRowError {
            row_index,
            message: e.to_string(),
        })
    });
    let result = aggregate_rides(rides, policy);
    eprintln!();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeflow_core::dataset::BikeShareDataset;
    use chrono::NaiveDate;
    use itertools::Itertools;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test").join(name)
    }

    #[test]
    fn test_sample_rides_skip_policy() {
        let (dataset, report) =
            aggregate_ride_csv(&fixture("sample-rides.csv"), UnknownCategoryPolicy::Skip)
                .expect("fixture should aggregate");
        assert_eq!(report.complete, 8);
        assert_eq!(report.incomplete, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.stations, 4);
        assert_eq!(report.trips, 5);

        let ids = dataset.stations.iter().map(|s| s.id.as_str()).collect_vec();
        assert_eq!(ids, vec!["BK-C01", "OK-B12", "SF-A27", "SF-D04"]);
        let ok_b12 = &dataset.stations[1];
        assert_eq!(ok_b12.name, "Broadway at 14th St");
        assert_eq!(ok_b12.lat, 37.8044);

        let pairs = dataset
            .aggregated_trips
            .iter()
            .map(|t| format!("{}>{}", t.start_station_id, t.end_station_id))
            .collect_vec();
        assert_eq!(
            pairs,
            vec![
                "OK-B12>BK-C01",
                "BK-C01>OK-B12",
                "SF-D04>SF-A27",
                "OK-B12>OK-B12",
                "SF-A27>SF-D04"
            ]
        );
        assert_eq!(dataset.aggregated_trips[0].trip_counts.total(), 3);

        let period = report.period.expect("fixture has timestamps");
        let day = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert_eq!(period.start, day.and_hms_opt(8, 0, 0).unwrap());
        assert_eq!(period.end, day.and_hms_opt(18, 45, 0).unwrap());
    }

    #[test]
    fn test_sample_rides_fail_policy() {
        let result = aggregate_ride_csv(&fixture("sample-rides.csv"), UnknownCategoryPolicy::Fail);
        assert!(matches!(result, Err(PrepError::UnknownCategory { row_index: 7, .. })));
    }

    #[test]
    fn test_gzip_input_matches_plain() {
        let plain = aggregate_ride_csv(&fixture("sample-rides.csv"), UnknownCategoryPolicy::Skip)
            .unwrap();
        let gz = aggregate_ride_csv(&fixture("sample-rides.csv.gz"), UnknownCategoryPolicy::Skip)
            .unwrap();
        assert_eq!(plain.1, gz.1);
        assert_eq!(plain.0.aggregated_trips, gz.0.aggregated_trips);
    }

    #[test]
    fn test_output_loads_as_dataset() {
        let (raw, _) =
            aggregate_ride_csv(&fixture("sample-rides.csv"), UnknownCategoryPolicy::Skip).unwrap();
        let json = serde_json::to_vec(&raw).unwrap();
        let reparsed = RawDataset::from_json_slice(&json).unwrap();
        let dataset = BikeShareDataset::load(reparsed).unwrap();
        assert_eq!(dataset.n_stations(), 4);
        assert_eq!(dataset.n_trips(), 5);
        assert_eq!(dataset.total_trips(), 7);
        let ok_b12 = dataset.station("OK-B12").unwrap();
        assert_eq!(ok_b12.round_trip_count(), 1);
        assert_eq!(ok_b12.max_starting_trip_total(), 3);
    }

    #[test]
    fn test_missing_file() {
        let result = aggregate_ride_csv(&fixture("missing.csv"), UnknownCategoryPolicy::Fail);
        assert!(matches!(result, Err(PrepError::ReadError { .. })));
    }
}
