pub mod geo_utils;
pub mod serde_ops;
