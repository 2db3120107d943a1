use serde::Serialize;

use super::{StationView, TripLinkView};
use crate::model::{BikeType, MemberType};

/// content of a hover/click popup, independent of any markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    pub lines: Vec<PopupLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupLine {
    pub label: String,
    pub value: String,
}

impl PopupLine {
    fn new(label: &str, value: impl ToString) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

impl From<&StationView<'_>> for Popup {
    fn from(station: &StationView<'_>) -> Self {
        Popup {
            title: station.name.to_string(),
            lines: vec![
                PopupLine::new("Trips starting here", station.combined_starting_counts.total()),
                PopupLine::new("Trips ending here", station.combined_ending_counts.total()),
                PopupLine::new("Round trips", station.round_trip_count),
            ],
        }
    }
}

impl From<&TripLinkView<'_>> for Popup {
    fn from(link: &TripLinkView<'_>) -> Self {
        let counts = link.counts;
        let mut lines = vec![
            PopupLine::new("Total Trips", counts.total()),
            PopupLine::new("Distance", format!("{:.2} km", link.distance_km)),
        ];
        for bike_type in BikeType::ALL {
            let label = format!("{} trips", bike_type.label());
            lines.push(PopupLine::new(&label, counts.by_bike_type(bike_type)));
        }
        for member_type in [MemberType::Member, MemberType::Casual] {
            let label = format!("{} trips", member_type.label());
            lines.push(PopupLine::new(&label, counts.by_member_type(member_type)));
        }
        for member_type in [MemberType::Member, MemberType::Casual] {
            for bike_type in BikeType::ALL {
                let label = format!("{} trips on {}", member_type.label(), bike_type.label());
                lines.push(PopupLine::new(&label, counts.get(bike_type, member_type)));
            }
        }
        Popup {
            title: format!("{} -> {}", link.start_station.name, link.end_station.name),
            lines,
        }
    }
}

impl std::fmt::Display for Popup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title)?;
        for line in self.lines.iter() {
            writeln!(f, "  {}: {}", line.label, line.value)?;
        }
        Ok(())
    }
}
