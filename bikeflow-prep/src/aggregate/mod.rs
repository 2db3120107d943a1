mod prep_error;
mod ride_csv;
mod ride_record;
mod trip_aggregator;
mod unknown_category_policy;

pub use prep_error::PrepError;
pub use ride_csv::aggregate_ride_csv;
pub use ride_record::{RideRecord, RIDE_DATETIME_FORMAT};
pub use trip_aggregator::{aggregate_rides, PrepReport, RideOutcome, RidePeriod, TripAggregator};
pub use unknown_category_policy::UnknownCategoryPolicy;
