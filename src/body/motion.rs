use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// MotionState: position plus N finite-difference derivatives
// ---------------------------------------------------------------------------

/// Position and its derivative history for a single body.
///
/// Slot `0` is position, `1` velocity, `2` acceleration, `3` jerk, and so on
/// up to the configured derivative order (commonly 4). One tick is three
/// phases: `snapshot` the current slots, apply the dynamics rule (force- or
/// velocity-driven), then run the backward-difference cascade. The cascade
/// is shared by every driver: each order `k` becomes
/// `(d[k-1] - d_prev[k-1]) / dt`.
#[derive(Debug, Clone)]
pub struct MotionState {
    time_step: f64,
    derivs: Vec<Vector3<f64>>,
    prev: Vec<Vector3<f64>>,
}

impl MotionState {
    /// `order` is the number of tracked vectors including position.
    pub fn new(order: usize, time_step: f64) -> Self {
        Self {
            time_step,
            derivs: vec![Vector3::zeros(); order.max(2)],
            prev: vec![Vector3::zeros(); order.max(2)],
        }
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn order(&self) -> usize {
        self.derivs.len()
    }

    /// Read-only view of all derivative slots.
    pub fn derivatives(&self) -> &[Vector3<f64>] {
        &self.derivs
    }

    /// Derivative of the given order; zero vector past the tracked order.
    pub fn derivative(&self, k: usize) -> Vector3<f64> {
        self.derivs.get(k).copied().unwrap_or_else(Vector3::zeros)
    }

    pub fn position(&self) -> Vector3<f64> {
        self.derivs[0]
    }

    pub fn velocity(&self) -> Vector3<f64> {
        self.derivs[1]
    }

    pub fn acceleration(&self) -> Vector3<f64> {
        self.derivative(2)
    }

    pub fn jerk(&self) -> Vector3<f64> {
        self.derivative(3)
    }

    /// Snapshot the current slots; the cascade differences against these.
    pub fn snapshot(&mut self) {
        self.prev.copy_from_slice(&self.derivs);
    }

    pub fn set_velocity(&mut self, v: Vector3<f64>) {
        self.derivs[1] = v;
    }

    pub fn set_derivative(&mut self, k: usize, v: Vector3<f64>) {
        if let Some(slot) = self.derivs.get_mut(k) {
            *slot = v;
        }
    }

    /// Advance position by the velocity slot over one time step.
    pub fn integrate_position(&mut self) {
        let dv = self.derivs[1] * self.time_step;
        self.derivs[0] += dv;
    }

    /// Advance velocity by the acceleration slot over one time step.
    pub fn integrate_velocity(&mut self) {
        let da = self.derivative(2) * self.time_step;
        self.derivs[1] += da;
    }

    /// Backward-difference cascade from order `start` upward.
    pub fn difference_from(&mut self, start: usize) {
        for k in start.max(1)..self.derivs.len() {
            self.derivs[k] = (self.derivs[k - 1] - self.prev[k - 1]) / self.time_step;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_integrates_velocity() {
        let mut s = MotionState::new(4, 0.5);
        s.set_velocity(Vector3::new(2.0, 4.0, 0.0));
        s.integrate_position();
        assert_eq!(s.position(), Vector3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn cascade_derives_acceleration_from_velocity_change() {
        let mut s = MotionState::new(4, 1.0);
        s.set_velocity(Vector3::new(0.0, 10.0, 0.0));
        s.snapshot();
        s.set_velocity(Vector3::new(0.0, 25.0, 0.0));
        s.difference_from(2);
        assert_eq!(s.acceleration(), Vector3::new(0.0, 15.0, 0.0));
    }

    #[test]
    fn derivative_past_order_is_zero() {
        let s = MotionState::new(2, 1.0);
        assert_eq!(s.acceleration(), Vector3::zeros());
        assert_eq!(s.jerk(), Vector3::zeros());
    }
}
