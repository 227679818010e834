use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// PIDF altitude controller with Pythagorean velocity decomposition
// ---------------------------------------------------------------------------

/// Altitude-tracking controller state for the telemetry replay.
///
/// The setpoint is the telemetry altitude for the current tick, the last
/// state the body's altitude from the previous tick. Only the proportional
/// error path feeds the velocity decomposition; the gain fields exist for
/// tuning a closed-loop variant.
#[derive(Debug, Clone)]
pub struct PidfController {
    time_step: f64,
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub kf: f64,
    setpoint: f64,
    last_state: f64,
}

impl PidfController {
    pub fn new(time_step: f64, kp: f64, ki: f64, kd: f64, kf: f64) -> Self {
        Self {
            time_step,
            kp,
            ki,
            kd,
            kf,
            setpoint: 0.0,
            last_state: 0.0,
        }
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    pub fn set_setpoint(&mut self, setpoint: f64) {
        self.setpoint = setpoint;
    }

    pub fn last_state(&self) -> f64 {
        self.last_state
    }

    pub fn set_last_state(&mut self, state: f64) {
        self.last_state = state;
    }

    /// Altitude error: setpoint minus last observed state.
    pub fn compute_error(&self) -> f64 {
        self.setpoint - self.last_state
    }

    /// Decompose a target speed magnitude into (x, y) velocity components.
    ///
    /// A zero setpoint means the vehicle is at liftoff, so the velocity is
    /// purely vertical. Otherwise the vertical component is the velocity
    /// needed to close the altitude error within one time step, clamped to
    /// the magnitude (sign preserved), and the horizontal component makes
    /// up the remainder via the Pythagorean theorem — the returned vector's
    /// magnitude equals `mag_v` exactly.
    pub fn adjust_velocity(&self, mag_v: f64) -> Vector3<f64> {
        if self.setpoint == 0.0 {
            return Vector3::new(0.0, mag_v, 0.0);
        }

        let mut target_vy = self.compute_error() / self.time_step;
        if target_vy.abs() > mag_v {
            target_vy = target_vy.signum() * mag_v;
        }
        let target_vx = (mag_v * mag_v - target_vy * target_vy).max(0.0).sqrt();

        Vector3::new(target_vx, target_vy, 0.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
