mod display_mode;
mod flow_map;
mod line_style;
mod popup;
mod presentation_config;
mod sink;

pub use display_mode::DisplayMode;
pub use flow_map::{FlowMap, TripLine};
pub use line_style::LineStyle;
pub use popup::{Popup, PopupLine};
pub use presentation_config::{MapView, MarkerIcon, PresentationConfig};
pub use sink::{Coordinates, StationRef, StationView, TripLinkView};
