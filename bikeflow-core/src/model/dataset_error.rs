use std::path::PathBuf;

use super::TripDirection;

#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("dataset has unexpected shape: {0}")]
    DataShape(String),
    #[error("trip record {record_index} references {role} station '{station_id}' which is not in the station list")]
    MissingStation {
        station_id: String,
        role: TripDirection,
        record_index: usize,
    },
    #[error("station id '{0}' appears more than once in the station list")]
    DuplicateStation(String),
    #[error("station '{0}' not found in dataset")]
    StationNotFound(String),
    #[error("Error reading from '{path}': {message}")]
    ReadError { path: PathBuf, message: String },
    #[error("Error writing to '{path}': {message}")]
    WriteError { path: PathBuf, message: String },
    #[error("Failed to fetch dataset from '{url}': {message}")]
    FetchError { url: String, message: String },
    #[error("Error creating a runtime to handle async code: {0}")]
    TokioError(String),
    #[error("Invalid input: {0}")]
    InvalidUserInput(String),
    #[error("Internal Error: {0}")]
    Internal(String),
}
