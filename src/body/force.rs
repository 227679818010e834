use nalgebra::Vector3;

use super::forces::ForceSet;
use super::motion::MotionState;

// ---------------------------------------------------------------------------
// ForceDrivenBody: Newtonian dynamics from a named force set
// ---------------------------------------------------------------------------

/// A body accelerated by the net of its named forces.
///
/// Each tick: `pre_compute`, caller updates `forces`, `compute_forces` with
/// the current mass (Newton's second law), `compute_motion`, `post_compute`.
/// `set_velocity` splices an externally commanded velocity into the current
/// tick; the next cascade then derives acceleration and jerk from the
/// spliced velocity instead of the force model, keeping the derivative
/// history consistent.
#[derive(Debug, Clone)]
pub struct ForceDrivenBody {
    state: MotionState,
    pub forces: ForceSet,
    spliced: bool,
}

impl ForceDrivenBody {
    pub fn new(order: usize, time_step: f64) -> Self {
        Self {
            state: MotionState::new(order, time_step),
            forces: ForceSet::new(),
            spliced: false,
        }
    }

    pub fn pre_compute(&mut self) {
        self.state.snapshot();
    }

    /// Override this tick's velocity (telemetry splice or ground clamp).
    pub fn set_velocity(&mut self, v: Vector3<f64>) {
        self.state.set_velocity(v);
        self.spliced = true;
    }

    /// Apply Newton's second law: acceleration = net force / mass.
    pub fn compute_forces(&mut self, mass: f64) {
        let accel = self.forces.net() / mass;
        self.state.set_derivative(2, accel);
    }

    pub fn compute_motion(&mut self) {
        if !self.spliced {
            self.state.integrate_velocity();
        }
        self.state.integrate_position();
    }

    pub fn post_compute(&mut self) {
        // A spliced velocity invalidates the force-model acceleration, so
        // the cascade restarts one order lower
        let start = if self.spliced { 2 } else { 3 };
        self.state.difference_from(start);
        self.spliced = false;
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
