pub mod config;
pub mod display;
pub mod error;
pub mod rankings;
pub mod telemetry;
