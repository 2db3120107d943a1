mod bike_share_dataset;
mod dataset_source;
mod record;
mod summary;

pub use bike_share_dataset::BikeShareDataset;
pub use dataset_source::DatasetSource;
pub use record::{AggregatedTripRecord, RawDataset, StationRecord};
pub use summary::{DatasetStats, DatasetSummary, StationStats, TripLinkStats};
