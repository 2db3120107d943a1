use std::path::PathBuf;

use bikeflow_core::model::DatasetError;

#[derive(thiserror::Error, Debug)]
pub enum PrepError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("Error reading from '{path}': {message}")]
    ReadError { path: PathBuf, message: String },
    #[error("Error writing to '{path}': {message}")]
    WriteError { path: PathBuf, message: String },
    #[error("Failed to read ride CSV '{path}': {message}")]
    CsvReadError { path: PathBuf, message: String },
    #[error("Failed to deserialize ride row {row_index}: {message}")]
    CsvRowError { row_index: usize, message: String },
    #[error("ride row {row_index} has an unknown category: {message}")]
    UnknownCategory { row_index: usize, message: String },
    #[error("station '{0}' never appears with valid coordinates")]
    MissingCoordinates(String),
    #[error("Invalid input: {0}")]
    InvalidUserInput(String),
}
