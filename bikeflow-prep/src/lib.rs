pub mod aggregate;
pub mod app;
pub mod util;
