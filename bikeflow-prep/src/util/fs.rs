use std::{
    fs::File,
    io::{BufReader, BufWriter, Read},
    path::Path,
};

use flate2::read::GzDecoder;
use serde::Serialize;

use crate::aggregate::PrepError;

/// true if the file at this path is gzip-compressed, by extension.
pub fn is_gzip<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or_default()
}

/// opens a file for reading, decompressing it when it ends in `.gz`.
pub fn open_reader(path: &Path) -> Result<Box<dyn Read>, PrepError> {
    let f = File::open(path).map_err(|e| PrepError::ReadError {
        path: path.to_owned(),
        message: e.to_string(),
    })?;
    let r: Box<dyn Read> = if is_gzip(path) {
        Box::new(BufReader::new(GzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };
    Ok(r)
}

/// helper function to "mkdir -p path" - make all directories along a path
pub fn create_dirs<P>(path: P) -> Result<(), PrepError>
where
    P: AsRef<Path>,
{
    let dirspath = path.as_ref();
    if dirspath.as_os_str().is_empty() || dirspath.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dirspath).map_err(|e| {
        let msg = format!(
            "error building output directory '{}': {e}",
            dirspath.to_str().unwrap_or_default()
        );
        PrepError::InvalidUserInput(msg)
    })
}

/// writes `value` as pretty-printed JSON, creating parent directories.
pub fn write_json<T: Serialize>(value: &T, path: &Path, overwrite: bool) -> Result<(), PrepError> {
    if path.exists() && !overwrite {
        return Err(PrepError::WriteError {
            path: path.to_owned(),
            message: String::from("file exists and overwrite is not enabled"),
        });
    }
    if let Some(parent) = path.parent() {
        create_dirs(parent)?;
    }
    let file = File::create(path).map_err(|e| PrepError::WriteError {
        path: path.to_owned(),
        message: e.to_string(),
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(|e| PrepError::WriteError {
        path: path.to_owned(),
        message: format!("failed to serialize JSON: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_gzip() {
        assert!(is_gzip("rides/202404-tripdata.csv.gz"));
        assert!(is_gzip("RIDES.CSV.GZ"));
        assert!(!is_gzip("rides/202404-tripdata.csv"));
        assert!(!is_gzip("gz"));
    }

    #[test]
    fn test_write_json_respects_overwrite() {
        let dir = std::env::temp_dir().join("bikeflow-prep-fs-test");
        let path = dir.join("nested").join("value.json");
        let _ = std::fs::remove_dir_all(&dir);
        write_json(&vec![1, 2, 3], &path, false).unwrap();
        assert!(matches!(
            write_json(&vec![4], &path, false),
            Err(PrepError::WriteError { .. })
        ));
        write_json(&vec![4], &path, true).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<u64> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, vec![4]);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
