use super::series::TimeSeries;

// ---------------------------------------------------------------------------
// FlightProfile: paired velocity/altitude series on one time step
// ---------------------------------------------------------------------------

/// Velocity and altitude over time, sharing a single immutable time step.
///
/// All values are SI (m/s, m). Reads outside the observed domain return NaN;
/// consumers must guard before using a value in control decisions.
#[derive(Debug, Clone)]
pub struct FlightProfile {
    time_step: f64,
    velocity: TimeSeries,
    altitude: TimeSeries,
}

impl FlightProfile {
    pub fn new(time_step: f64) -> Self {
        Self {
            time_step,
            velocity: TimeSeries::new(),
            altitude: TimeSeries::new(),
        }
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn put_velocity(&mut self, time: f64, velocity: f64) {
        self.velocity.put(time, velocity);
    }

    pub fn put_altitude(&mut self, time: f64, altitude: f64) {
        self.altitude.put(time, altitude);
    }

    pub fn get_velocity(&self, time: f64) -> f64 {
        self.velocity.get(time)
    }

    pub fn get_altitude(&self, time: f64) -> f64 {
        self.altitude.get(time)
    }

    pub fn velocity(&self) -> &TimeSeries {
        &self.velocity
    }

    pub fn altitude(&self) -> &TimeSeries {
        &self.altitude
    }

    /// Both series resampled onto the profile's time-step grid.
    pub fn filled(&self) -> FlightProfile {
        FlightProfile {
            time_step: self.time_step,
            velocity: self.velocity.filled(self.time_step),
            altitude: self.altitude.filled(self.time_step),
        }
    }
}

// ---------------------------------------------------------------------------
// VelocityProfile: the pass-1 result handed to the rocket model
// ---------------------------------------------------------------------------

/// Time-indexed (vx, vy) pairs extracted from the telemetry replay.
#[derive(Debug, Clone)]
pub struct VelocityProfile {
    time_step: f64,
    vx: TimeSeries,
    vy: TimeSeries,
}

impl VelocityProfile {
    pub fn new(time_step: f64) -> Self {
        Self {
            time_step,
            vx: TimeSeries::new(),
            vy: TimeSeries::new(),
        }
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn put_vx(&mut self, time: f64, vx: f64) {
        self.vx.put(time, vx);
    }

    pub fn put_vy(&mut self, time: f64, vy: f64) {
        self.vy.put(time, vy);
    }

    pub fn get_vx(&self, time: f64) -> f64 {
        self.vx.get(time)
    }

    pub fn get_vy(&self, time: f64) -> f64 {
        self.vy.get(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_keeps_series_independent() {
        let mut p = FlightProfile::new(1.0);
        p.put_velocity(0.0, 10.0);
        p.put_altitude(0.0, 100.0);
        assert_eq!(p.get_velocity(0.0), 10.0);
        assert_eq!(p.get_altitude(0.0), 100.0);
        assert!(p.get_velocity(5.0).is_nan());
    }

    #[test]
    fn velocity_profile_round_trips_components() {
        let mut p = VelocityProfile::new(1.0);
        p.put_vx(3.0, 12.0);
        p.put_vy(3.0, -4.0);
        assert_eq!(p.get_vx(3.0), 12.0);
        assert_eq!(p.get_vy(3.0), -4.0);
        assert!(p.get_vx(99.0).is_nan());
    }
}
