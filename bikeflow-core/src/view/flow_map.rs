use std::collections::HashMap;

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;

use super::{DisplayMode, Popup, PresentationConfig, StationView, TripLinkView};
use crate::dataset::BikeShareDataset;
use crate::model::{DatasetError, StationIdx, TripDirection};

/// the station map of one dataset, holding the display mode of every
/// station. stations start in [`DisplayMode::Off`].
pub struct FlowMap<'a> {
    dataset: &'a BikeShareDataset,
    config: PresentationConfig,
    display_modes: HashMap<StationIdx, DisplayMode>,
}

/// a trip line ready to be drawn.
#[derive(Debug, Clone, Serialize)]
pub struct TripLine<'a> {
    pub link: TripLinkView<'a>,
    pub weight: f64,
    pub popup: Popup,
}

impl<'a> FlowMap<'a> {
    pub fn new(dataset: &'a BikeShareDataset, config: PresentationConfig) -> FlowMap<'a> {
        FlowMap {
            dataset,
            config,
            display_modes: HashMap::new(),
        }
    }

    pub fn config(&self) -> &PresentationConfig {
        &self.config
    }

    pub fn station_views(&self) -> Vec<StationView<'a>> {
        self.dataset.stations().map(StationView::from).collect()
    }

    pub fn display_mode(&self, station_id: &str) -> DisplayMode {
        self.dataset
            .station_index()
            .get_index_of(station_id)
            .and_then(|idx| self.display_modes.get(&StationIdx(idx)))
            .copied()
            .unwrap_or_default()
    }

    /// advances the display mode of a station one step, as a click would.
    /// returns the new mode.
    pub fn toggle_station(&mut self, station_id: &str) -> Result<DisplayMode, DatasetError> {
        let idx = self
            .dataset
            .station_index()
            .get_index_of(station_id)
            .ok_or_else(|| DatasetError::StationNotFound(station_id.to_string()))?;
        let mode = self.display_modes.entry(StationIdx(idx)).or_default();
        *mode = mode.next();
        log::debug!("station '{station_id}' display mode is now {mode:?}");
        Ok(*mode)
    }

    /// the lines a station shows in `mode`. round trips are never drawn and
    /// links below the configured minimum total are left out.
    pub fn trip_lines(
        &self,
        station_id: &str,
        mode: DisplayMode,
    ) -> Result<Vec<TripLine<'a>>, DatasetError> {
        let direction = match mode.direction() {
            Some(direction) => direction,
            None => return Ok(vec![]),
        };
        self.lines_for(station_id, direction)
    }

    /// lines of every station whose display mode is not off, in station order.
    pub fn displayed_lines(&self) -> Result<Vec<TripLine<'a>>, DatasetError> {
        let mut modes: Vec<(&StationIdx, &DisplayMode)> = self.display_modes.iter().collect();
        modes.sort_by_key(|(idx, _)| **idx);
        let mut lines = vec![];
        for (idx, mode) in modes {
            let station = self.dataset.station_at(*idx).ok_or_else(|| {
                DatasetError::Internal(format!("station index {} out of range", idx.0))
            })?;
            lines.extend(self.trip_lines(station.id(), *mode)?);
        }
        Ok(lines)
    }

    /// every station as a point feature, followed by the trip lines of
    /// `station_id` in `direction`, or of every station's outgoing links
    /// when no station is given. the map view, marker icon and line style
    /// are carried as foreign members of the collection.
    pub fn feature_collection(
        &self,
        station_id: Option<&str>,
        direction: TripDirection,
    ) -> Result<FeatureCollection, DatasetError> {
        let mut features: Vec<Feature> = self
            .station_views()
            .iter()
            .map(|view| self.station_feature(view))
            .collect::<Result<_, _>>()?;

        let lines = match station_id {
            Some(id) => self.lines_for(id, direction)?,
            None => {
                let mut lines = vec![];
                for station in self.dataset.stations() {
                    lines.extend(self.lines_for(station.id(), TripDirection::Starting)?);
                }
                lines
            }
        };
        for line in lines.iter() {
            features.push(self.line_feature(line)?);
        }

        let mut foreign_members = JsonObject::new();
        foreign_members.insert("map".into(), to_json(&self.config.map)?);
        foreign_members.insert("marker_icon".into(), to_json(&self.config.marker_icon)?);
        foreign_members.insert("line_style".into(), to_json(&self.config.line_style)?);

        Ok(FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        })
    }

    fn lines_for(
        &self,
        station_id: &str,
        direction: TripDirection,
    ) -> Result<Vec<TripLine<'a>>, DatasetError> {
        let dataset: &'a BikeShareDataset = self.dataset;
        let links = dataset.station_trips(station_id, direction, self.config.min_trip_total)?;
        links
            .into_iter()
            .filter(|(_, link)| !link.is_round_trip())
            .map(|(_, link)| {
                let view = TripLinkView::new(dataset, link)?;
                let popup = Popup::from(&view);
                Ok(TripLine {
                    weight: self.config.line_style.weight(link.total()),
                    link: view,
                    popup,
                })
            })
            .collect()
    }

    fn station_feature(&self, view: &StationView<'_>) -> Result<Feature, DatasetError> {
        let mut properties = to_properties(view)?;
        properties.insert(
            String::from("popup"),
            serde_json::Value::String(Popup::from(view).to_string()),
        );
        let point = Value::Point(vec![view.coordinates.lng, view.coordinates.lat]);
        Ok(feature(point, properties))
    }

    fn line_feature(&self, line: &TripLine<'_>) -> Result<Feature, DatasetError> {
        let style = &self.config.line_style;
        let mut properties = JsonObject::new();
        properties.insert("start_station_id".into(), line.link.start_station.id.into());
        properties.insert("end_station_id".into(), line.link.end_station.id.into());
        properties.insert("distance_km".into(), line.link.distance_km.into());
        properties.insert("counts".into(), to_json(line.link.counts)?);
        properties.insert("weight".into(), line.weight.into());
        properties.insert("color".into(), style.color.clone().into());
        properties.insert("opacity".into(), style.opacity.into());
        properties.insert("popup".into(), line.popup.to_string().into());
        let start = &line.link.start_station.coordinates;
        let end = &line.link.end_station.coordinates;
        let line_string = Value::LineString(vec![vec![start.lng, start.lat], vec![end.lng, end.lat]]);
        Ok(feature(line_string, properties))
    }
}

fn feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, DatasetError> {
    serde_json::to_value(value)
        .map_err(|e| DatasetError::Internal(format!("failure serializing feature properties: {e}")))
}

fn to_properties<T: Serialize>(value: &T) -> Result<JsonObject, DatasetError> {
    match to_json(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(DatasetError::Internal(format!(
            "expected feature properties to serialize as an object, found {other}"
        ))),
    }
}
