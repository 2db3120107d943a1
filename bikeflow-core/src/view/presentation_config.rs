use std::path::Path;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use super::LineStyle;
use crate::model::DatasetError;

/// everything the presentation layer needs that is not part of the dataset.
/// any field left out of a configuration file takes its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub map: MapView,
    pub marker_icon: MarkerIcon,
    pub line_style: LineStyle,
    /// trip links with fewer rides than this are not drawn
    pub min_trip_total: u64,
}

/// initial map position and tile layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapView {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
    pub max_zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

/// the marker drawn for each station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerIcon {
    pub icon_url: String,
    pub icon_size: [u32; 2],
    /// pixel of the icon placed on the station location
    pub icon_anchor: [i32; 2],
    /// where popups open, relative to the icon anchor
    pub popup_anchor: [i32; 2],
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center_lat: 37.82,
            center_lng: -122.27,
            zoom: 14,
            max_zoom: 19,
            tile_url: String::from(
                "https://{s}.basemaps.cartocdn.com/light_nolabels/{z}/{x}/{y}.png",
            ),
            attribution: String::from("© OpenStreetMap contributors, © CARTO"),
        }
    }
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            icon_url: String::from("img/custom-marker.png"),
            icon_size: [21, 26],
            icon_anchor: [10, 26],
            popup_anchor: [1, -14],
        }
    }
}

impl PresentationConfig {
    /// reads a configuration file. the format (TOML, JSON, ...) is taken
    /// from the file extension.
    pub fn from_file(filepath: &Path) -> Result<PresentationConfig, DatasetError> {
        let config = Config::builder()
            .add_source(File::from(filepath))
            .build()
            .map_err(|e| {
                let msg = format!("file '{}' produced error: {e}", filepath.display());
                DatasetError::InvalidUserInput(msg)
            })?;
        config.try_deserialize::<PresentationConfig>().map_err(|e| {
            let msg = format!(
                "error reading presentation configuration in '{}': {e}",
                filepath.display()
            );
            DatasetError::InvalidUserInput(msg)
        })
    }
}
