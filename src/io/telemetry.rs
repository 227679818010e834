use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::profile::FlightProfile;

// ---------------------------------------------------------------------------
// Telemetry ingestion: line-delimited JSON records
// ---------------------------------------------------------------------------

/// One telemetry record as transcribed from the webcast overlay. Altitude is
/// in kilometres in the source data.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TelemetrySample {
    pub time: f64,     // s
    pub velocity: f64, // m/s
    pub altitude: f64, // km
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("cannot read telemetry: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed telemetry record on line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },
}

/// Parse line-delimited JSON telemetry into a flight profile, converting
/// altitude to metres. Blank lines are skipped.
pub fn parse_profile<R: BufRead>(
    reader: R,
    time_step: f64,
) -> Result<FlightProfile, TelemetryError> {
    let mut profile = FlightProfile::new(time_step);
    let mut count = 0usize;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let sample: TelemetrySample =
            serde_json::from_str(&line).map_err(|source| TelemetryError::Parse {
                line: index + 1,
                source,
            })?;
        profile.put_velocity(sample.time, sample.velocity);
        profile.put_altitude(sample.time, sample.altitude * 1000.0);
        count += 1;
    }
    info!("parsed {} telemetry samples", count);
    Ok(profile)
}

/// Load telemetry from a file. Missing or malformed files are reported and
/// yield an empty profile so the simulation still runs end to end.
pub fn load_profile(path: &Path, time_step: f64) -> FlightProfile {
    match File::open(path) {
        Ok(file) => match parse_profile(BufReader::new(file), time_step) {
            Ok(profile) => profile,
            Err(e) => {
                warn!("telemetry file {} unusable: {}", path.display(), e);
                FlightProfile::new(time_step)
            }
        },
        Err(e) => {
            warn!("cannot open telemetry file {}: {}", path.display(), e);
            FlightProfile::new(time_step)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_line_delimited_records() {
        let data = concat!(
            r#"{"time": 0.0, "velocity": 0.0, "altitude": 0.0}"#,
            "\n",
            r#"{"time": 10.0, "velocity": 100.0, "altitude": 1.0}"#,
            "\n",
            "\n",
            r#"{"time": 20.0, "velocity": 150.0, "altitude": 5.0}"#,
            "\n",
        );
        let profile = parse_profile(Cursor::new(data), 1.0).unwrap();
        assert_eq!(profile.get_velocity(10.0), 100.0);
        // Altitude arrives in km and is stored in metres
        assert_eq!(profile.get_altitude(20.0), 5_000.0);
    }

    #[test]
    fn reports_the_offending_line() {
        let data = concat!(
            r#"{"time": 0.0, "velocity": 0.0, "altitude": 0.0}"#,
            "\n",
            "not json\n",
        );
        let err = parse_profile(Cursor::new(data), 1.0).unwrap_err();
        match err {
            TelemetryError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn missing_file_degrades_to_empty_profile() {
        let profile = load_profile(Path::new("/nonexistent/telemetry.json"), 1.0);
        assert!(profile.velocity().is_empty());
        assert!(profile.altitude().is_empty());
    }
}
