use crate::physics::G0;

// ---------------------------------------------------------------------------
// Engine: thrust and propellant flow under a throttle setting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Engine {
    max_thrust: f64, // N, sea level
    isp: f64,        // s
    throttle: f64,   // 0..1
}

impl Engine {
    pub fn new(max_thrust: f64, isp: f64) -> Self {
        Self {
            max_thrust,
            isp,
            throttle: 0.0,
        }
    }

    pub fn max_thrust(&self) -> f64 {
        self.max_thrust
    }

    pub fn isp(&self) -> f64 {
        self.isp
    }

    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    /// Set the throttle, clamped into [0, 1].
    pub fn set_throttle(&mut self, throttle: f64) {
        self.throttle = throttle.clamp(0.0, 1.0);
    }

    /// Current thrust, N.
    pub fn thrust(&self) -> f64 {
        self.max_thrust * self.throttle
    }

    /// Propellant mass flow at the current throttle: F / (Isp * g0), kg/s.
    pub fn prop_flow_rate(&self) -> f64 {
        self.thrust() / (self.isp * G0)
    }
}
