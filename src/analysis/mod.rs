//! Program and search profiling.
pub mod telemetry;

pub use telemetry::{FrontierStats, OperandStats, TelemetryReport};
