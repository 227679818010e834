use nalgebra::Vector3;

use super::motion::MotionState;

// ---------------------------------------------------------------------------
// VelocityDrivenBody: kinematics commanded by an external velocity source
// ---------------------------------------------------------------------------

/// A body whose velocity slot is written each tick from an external source
/// (the reconstructed flight profile). Acceleration, jerk and higher
/// derivatives come purely from finite-differencing the velocity history;
/// there is no mass or force bookkeeping.
#[derive(Debug, Clone)]
pub struct VelocityDrivenBody {
    state: MotionState,
}

impl VelocityDrivenBody {
    pub fn new(order: usize, time_step: f64) -> Self {
        Self {
            state: MotionState::new(order, time_step),
        }
    }

    pub fn pre_compute(&mut self) {
        self.state.snapshot();
    }

    /// Command this tick's velocity.
    pub fn set_velocity(&mut self, v: Vector3<f64>) {
        self.state.set_velocity(v);
    }

    pub fn compute_motion(&mut self) {
        self.state.integrate_position();
    }

    pub fn post_compute(&mut self) {
        self.state.difference_from(2);
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn tick(body: &mut VelocityDrivenBody, v: Vector3<f64>) {
        body.pre_compute();
        body.set_velocity(v);
        body.compute_motion();
        body.post_compute();
    }

    #[test]
    fn constant_velocity_zeroes_higher_derivatives() {
        let mut body = VelocityDrivenBody::new(4, 1.0);
        let v = Vector3::new(3.0, 7.0, 0.0);
        tick(&mut body, v); // first tick sees the 0 -> v step
        for _ in 0..5 {
            tick(&mut body, v);
        }
        assert_abs_diff_eq!(body.state().acceleration().norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(body.state().jerk().norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn position_tracks_commanded_velocity() {
        let mut body = VelocityDrivenBody::new(4, 1.0);
        for _ in 0..10 {
            tick(&mut body, Vector3::new(0.0, 50.0, 0.0));
        }
        assert_abs_diff_eq!(body.state().position().y, 500.0, epsilon = 1e-9);
    }

    #[test]
    fn ramping_velocity_yields_constant_acceleration() {
        let mut body = VelocityDrivenBody::new(4, 1.0);
        for i in 0..6 {
            tick(&mut body, Vector3::new(0.0, 10.0 * i as f64, 0.0));
        }
        assert_abs_diff_eq!(body.state().acceleration().y, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(body.state().jerk().y, 0.0, epsilon = 1e-9);
    }
}
