pub mod api;
pub mod configuration;
pub mod model;
pub mod telemetry;
pub mod util;
