pub mod assistant;
pub mod config;
pub mod error;
pub mod finance;
pub mod locale;
pub mod telemetry;
