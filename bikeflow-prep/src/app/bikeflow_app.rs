use std::path::Path;

use bikeflow_core::{model::TripDirection, view::PresentationConfig};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::aggregate::{PrepError, UnknownCategoryPolicy};

/// Command line tool for preparing and inspecting aggregated bike-share trip datasets
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct BikeflowApp {
    #[command(subcommand)]
    pub op: BikeflowOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum BikeflowOperation {
    /// aggregate a per-ride CSV export into a trip dataset JSON file
    Prepare {
        /// ride CSV file, optionally gzip-compressed (.gz)
        #[arg(short, long)]
        input_file: String,

        /// location of the aggregated dataset JSON
        #[arg(short, long)]
        output_file: String,

        #[arg(long, value_enum, default_value_t=UnknownCategoryPolicy::Fail)]
        unknown_category_policy: UnknownCategoryPolicy,

        #[arg(long)]
        overwrite: bool,
    },
    /// load a dataset and print summary statistics as JSON
    Summary {
        /// dataset JSON file path or http(s) URL
        #[arg(short, long)]
        dataset: String,

        /// number of stations listed in each busiest-station ranking
        #[arg(long, default_value_t = 5)]
        top_n: usize,
    },
    /// print a station's popup and the trip lines it shows in one direction
    Station {
        /// dataset JSON file path or http(s) URL
        #[arg(short, long)]
        dataset: String,

        #[arg(short, long)]
        station_id: String,

        #[arg(long, value_enum, default_value_t=DirectionArg::Starting)]
        direction: DirectionArg,

        /// overrides the minimum trip total of the presentation configuration
        #[arg(long)]
        min_trip_total: Option<u64>,

        /// presentation configuration file (TOML or JSON)
        #[arg(short, long)]
        configuration_file: Option<String>,
    },
    /// write stations and trip lines as a GeoJSON FeatureCollection
    Export {
        /// dataset JSON file path or http(s) URL
        #[arg(short, long)]
        dataset: String,

        #[arg(short, long)]
        output_file: String,

        /// only export the trip lines of this station
        #[arg(short, long)]
        station_id: Option<String>,

        #[arg(long, value_enum, default_value_t=DirectionArg::Starting)]
        direction: DirectionArg,

        /// presentation configuration file (TOML or JSON)
        #[arg(short, long)]
        configuration_file: Option<String>,

        #[arg(long)]
        overwrite: bool,
    },
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DirectionArg {
    Starting,
    Ending,
}

impl From<DirectionArg> for TripDirection {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::Starting => TripDirection::Starting,
            DirectionArg::Ending => TripDirection::Ending,
        }
    }
}

impl BikeflowOperation {
    pub fn run(&self) -> Result<(), PrepError> {
        match self {
            BikeflowOperation::Prepare {
                input_file,
                output_file,
                unknown_category_policy,
                overwrite,
            } => crate::app::prepare::run(
                Path::new(input_file),
                Path::new(output_file),
                *unknown_category_policy,
                *overwrite,
            )
            .map(|_| ()),
            BikeflowOperation::Summary { dataset, top_n } => {
                crate::app::inspect::run_summary(dataset, *top_n)
            }
            BikeflowOperation::Station {
                dataset,
                station_id,
                direction,
                min_trip_total,
                configuration_file,
            } => {
                let mut config = read_presentation_config(configuration_file.as_deref())?;
                if let Some(min) = min_trip_total {
                    config.min_trip_total = *min;
                }
                crate::app::inspect::run_station(dataset, station_id, (*direction).into(), config)
            }
            BikeflowOperation::Export {
                dataset,
                output_file,
                station_id,
                direction,
                configuration_file,
                overwrite,
            } => {
                let config = read_presentation_config(configuration_file.as_deref())?;
                crate::app::inspect::run_export(
                    dataset,
                    Path::new(output_file),
                    station_id.as_deref(),
                    (*direction).into(),
                    config,
                    *overwrite,
                )
            }
        }
    }
}

fn read_presentation_config(
    configuration_file: Option<&str>,
) -> Result<PresentationConfig, PrepError> {
    match configuration_file {
        Some(file) => Ok(PresentationConfig::from_file(Path::new(file))?),
        None => Ok(PresentationConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_station_command() {
        let app = BikeflowApp::try_parse_from([
            "bikeflow",
            "station",
            "--dataset",
            "tripdata.json",
            "--station-id",
            "OK-B12",
            "--direction",
            "ending",
            "--min-trip-total",
            "4",
        ])
        .expect("arguments should parse");
        match app.op {
            BikeflowOperation::Station {
                station_id,
                direction,
                min_trip_total,
                configuration_file,
                ..
            } => {
                assert_eq!(station_id, "OK-B12");
                assert_eq!(direction, DirectionArg::Ending);
                assert_eq!(min_trip_total, Some(4));
                assert_eq!(configuration_file, None);
            }
            _ => panic!("expected station command"),
        }
    }

    #[test]
    fn test_prepare_defaults_to_failing_on_unknown_categories() {
        let app = BikeflowApp::try_parse_from([
            "bikeflow",
            "prepare",
            "-i",
            "rides.csv.gz",
            "-o",
            "tripdata.json",
        ])
        .unwrap();
        match app.op {
            BikeflowOperation::Prepare {
                unknown_category_policy,
                overwrite,
                ..
            } => {
                assert_eq!(unknown_category_policy, UnknownCategoryPolicy::Fail);
                assert!(!overwrite);
            }
            _ => panic!("expected prepare command"),
        }
    }
}
