mod category;
mod dataset_error;
mod station;
mod trip_counts;
mod trip_direction;
mod trip_link;

pub use category::{BikeType, MemberType};
pub use dataset_error::DatasetError;
pub use station::{Station, StationIdx};
pub use trip_counts::{
    MemberTypeCounts, RideTypeAndMemberTypeCounts, RideTypeCounts, TripCounts, TripCountsRecord,
};
pub use trip_direction::TripDirection;
pub use trip_link::{TripLink, TripLinkIdx};
