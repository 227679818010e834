pub mod telemetry;

pub use telemetry::{load_profile, parse_profile, TelemetryError, TelemetrySample};
