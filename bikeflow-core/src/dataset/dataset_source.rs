use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{BikeShareDataset, RawDataset};
use crate::model::DatasetError;

/// where the aggregated dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum DatasetSource {
    /// a JSON file on the local filesystem
    File { path: PathBuf },
    /// a JSON document served over HTTP(S)
    Url { url: String },
}

impl DatasetSource {
    /// interprets a user-provided location. anything starting with
    /// `http://` or `https://` is a URL, everything else a file path.
    pub fn parse(location: &str) -> DatasetSource {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DatasetSource::Url {
                url: trimmed.to_string(),
            }
        } else {
            DatasetSource::File {
                path: PathBuf::from(trimmed),
            }
        }
    }

    /// fetches and parses the raw dataset.
    pub async fn fetch(&self) -> Result<RawDataset, DatasetError> {
        let bytes = match self {
            DatasetSource::File { path } => {
                tokio::fs::read(path)
                    .await
                    .map_err(|e| DatasetError::ReadError {
                        path: path.clone(),
                        message: e.to_string(),
                    })?
            }
            DatasetSource::Url { url } => {
                let fetch_error = |e: reqwest::Error| DatasetError::FetchError {
                    url: url.clone(),
                    message: e.to_string(),
                };
                let response = reqwest::get(url)
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(fetch_error)?;
                response.bytes().await.map_err(fetch_error)?.to_vec()
            }
        };
        log::debug!("fetched {} bytes from {self}", bytes.len());
        RawDataset::from_json_slice(&bytes)
    }

    /// fetches the dataset on a single-threaded async runtime, then builds
    /// the station/trip graph once the fetch has completed.
    pub fn load(&self) -> Result<BikeShareDataset, DatasetError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                DatasetError::TokioError(format!("failure creating async rust tokio runtime: {e}"))
            })?;
        let raw = runtime.block_on(self.fetch())?;
        BikeShareDataset::load(raw)
    }
}

impl std::str::FromStr for DatasetSource {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(DatasetError::InvalidUserInput(String::from(
                "dataset location must not be empty",
            )));
        }
        Ok(DatasetSource::parse(s))
    }
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetSource::File { path } => write!(f, "file '{}'", path.display()),
            DatasetSource::Url { url } => write!(f, "url '{url}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location() {
        assert_eq!(
            DatasetSource::parse("https://example.org/tripdata.json"),
            DatasetSource::Url {
                url: String::from("https://example.org/tripdata.json")
            }
        );
        assert_eq!(
            DatasetSource::parse("data/prepared/tripdata.json"),
            DatasetSource::File {
                path: PathBuf::from("data/prepared/tripdata.json")
            }
        );
        assert!("  ".parse::<DatasetSource>().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test")
            .join("sample-tripdata.json");
        let dataset = DatasetSource::File { path }
            .load()
            .expect("fixture should load");
        assert_eq!(dataset.n_stations(), 4);
        assert_eq!(dataset.n_trips(), 6);
        assert_eq!(dataset.total_trips(), 36);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let source = DatasetSource::parse("does/not/exist.json");
        assert!(matches!(source.load(), Err(DatasetError::ReadError { .. })));
    }
}
