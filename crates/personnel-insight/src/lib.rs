pub mod config;
pub mod error;
pub mod insights;
pub mod predict;
pub mod roster;
pub mod telemetry;
