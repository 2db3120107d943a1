use std::path::Path;

use bikeflow_core::{
    dataset::{BikeShareDataset, DatasetSource, DatasetSummary},
    model::{DatasetError, TripDirection},
    view::{DisplayMode, FlowMap, Popup, PresentationConfig, StationView},
};
use itertools::Itertools;

use crate::aggregate::PrepError;
use crate::util::fs;

fn load_dataset(dataset: &str) -> Result<BikeShareDataset, PrepError> {
    let source = dataset.parse::<DatasetSource>()?;
    log::info!("loading dataset from {source}");
    Ok(source.load()?)
}

pub fn run_summary(dataset: &str, top_n: usize) -> Result<(), PrepError> {
    let loaded = load_dataset(dataset)?;
    let summary = DatasetSummary::new(dataset, &loaded, top_n);
    let json = serde_json::to_string_pretty(&summary).map_err(|e| {
        PrepError::InvalidUserInput(format!("failure serializing dataset summary: {e}"))
    })?;
    println!("{json}");
    Ok(())
}

pub fn run_station(
    dataset: &str,
    station_id: &str,
    direction: TripDirection,
    config: PresentationConfig,
) -> Result<(), PrepError> {
    let loaded = load_dataset(dataset)?;
    println!("{}", station_report(&loaded, station_id, direction, config)?);
    Ok(())
}

/// the station popup followed by the popup of every line it draws.
pub fn station_report(
    dataset: &BikeShareDataset,
    station_id: &str,
    direction: TripDirection,
    config: PresentationConfig,
) -> Result<String, PrepError> {
    let station = dataset
        .station(station_id)
        .ok_or_else(|| DatasetError::StationNotFound(station_id.to_string()))?;
    let min_trip_total = config.min_trip_total;
    let map = FlowMap::new(dataset, config);
    let lines = map.trip_lines(station_id, DisplayMode::from(direction))?;
    let header = Popup::from(&StationView::from(station)).to_string();
    let body = lines
        .iter()
        .map(|line| format!("weight {:.2}\n{}", line.weight, line.popup))
        .join("\n");
    Ok(format!(
        "{header}\n{} trip lines {direction} here with at least {min_trip_total} trips\n\n{body}",
        lines.len()
    ))
}

pub fn run_export(
    dataset: &str,
    output_file: &Path,
    station_id: Option<&str>,
    direction: TripDirection,
    config: PresentationConfig,
    overwrite: bool,
) -> Result<(), PrepError> {
    let loaded = load_dataset(dataset)?;
    let map = FlowMap::new(&loaded, config);
    let collection = map.feature_collection(station_id, direction)?;
    log::info!(
        "writing {} features to '{}'",
        collection.features.len(),
        output_file.display()
    );
    fs::write_json(&collection, output_file, overwrite)
}
