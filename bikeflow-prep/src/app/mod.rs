mod bikeflow_app;
pub mod inspect;
pub mod prepare;

pub use bikeflow_app::{BikeflowApp, BikeflowOperation, DirectionArg};
