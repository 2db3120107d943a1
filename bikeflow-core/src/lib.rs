pub mod dataset;
pub mod model;
pub mod util;
pub mod view;
