pub mod config;
pub mod error;
pub mod optimizer;
pub mod telemetry;
