use std::path::Path;

use crate::aggregate::{aggregate_ride_csv, PrepError, PrepReport, UnknownCategoryPolicy};
use crate::util::fs;

/// aggregates the rides of `input_file` and writes the dataset JSON to
/// `output_file`. the report is logged and returned.
pub fn run(
    input_file: &Path,
    output_file: &Path,
    policy: UnknownCategoryPolicy,
    overwrite: bool,
) -> Result<PrepReport, PrepError> {
    let (dataset, report) = aggregate_ride_csv(input_file, policy)?;
    fs::write_json(&dataset, output_file, overwrite)?;
    let report_json = serde_json::to_string_pretty(&report).map_err(|e| {
        PrepError::InvalidUserInput(format!("failure serializing preparation report: {e}"))
    })?;
    log::info!("wrote '{}'\n{report_json}", output_file.display());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeflow_core::dataset::DatasetSource;
    use std::path::PathBuf;

    #[test]
    fn test_prepare_then_load() {
        let input = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test")
            .join("sample-rides.csv.gz");
        let output = std::env::temp_dir()
            .join("bikeflow-prepare-test")
            .join("tripdata.json");
        let report = run(&input, &output, UnknownCategoryPolicy::Skip, true).unwrap();
        assert_eq!(report.trips, 5);

        let source = DatasetSource::File {
            path: output.clone(),
        };
        let dataset = source.load().expect("prepared dataset should load");
        assert_eq!(dataset.n_trips(), report.trips);
        assert_eq!(dataset.n_stations(), report.stations);

        let again = run(&input, &output, UnknownCategoryPolicy::Skip, false);
        assert!(matches!(again, Err(PrepError::WriteError { .. })));
        let _ = std::fs::remove_file(&output);
    }
}
