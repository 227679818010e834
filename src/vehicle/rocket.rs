use nalgebra::Vector3;

use crate::body::{ForceDrivenBody, ForceSet, MotionState};

use super::engine::Engine;

// ---------------------------------------------------------------------------
// Rocket: a force-driven body with propellant and engines
// ---------------------------------------------------------------------------

/// A force-driven body carrying dry mass, a drainable propellant load and a
/// cluster of engines. Total mass is dry plus remaining propellant; draining
/// clamps at zero (depletion is a terminal state, not an error).
#[derive(Debug, Clone)]
pub struct Rocket {
    body: ForceDrivenBody,
    dry_mass: f64,
    propellant_mass: f64,
    engines: Vec<Engine>,
}

impl Rocket {
    pub fn new(
        dry_mass: f64,
        propellant_mass: f64,
        engines: Vec<Engine>,
        order: usize,
        time_step: f64,
    ) -> Self {
        Self {
            body: ForceDrivenBody::new(order, time_step),
            dry_mass,
            propellant_mass,
            engines,
        }
    }

    /// Total mass: dry plus remaining propellant, kg.
    pub fn mass(&self) -> f64 {
        self.dry_mass + self.propellant_mass
    }

    pub fn dry_mass(&self) -> f64 {
        self.dry_mass
    }

    pub fn propellant_mass(&self) -> f64 {
        self.propellant_mass
    }

    /// Drop separated structure (staging); dry mass cannot go negative.
    pub fn jettison(&mut self, mass: f64) {
        self.dry_mass = (self.dry_mass - mass).max(0.0);
    }

    /// Burn propellant, clamped at empty.
    pub fn drain_propellant(&mut self, mass: f64) {
        self.propellant_mass = (self.propellant_mass - mass).max(0.0);
    }

    pub fn engines(&self) -> &[Engine] {
        &self.engines
    }

    pub fn engines_mut(&mut self) -> &mut [Engine] {
        &mut self.engines
    }

    pub fn forces(&self) -> &ForceSet {
        &self.body.forces
    }

    pub fn forces_mut(&mut self) -> &mut ForceSet {
        &mut self.body.forces
    }

    pub fn state(&self) -> &MotionState {
        self.body.state()
    }

    // Tick phases, delegated to the force-driven body with the current mass

    pub fn pre_compute(&mut self) {
        self.body.pre_compute();
    }

    pub fn set_velocity(&mut self, v: Vector3<f64>) {
        self.body.set_velocity(v);
    }

    pub fn compute_forces(&mut self) {
        let mass = self.mass();
        self.body.compute_forces(mass);
    }

    pub fn compute_motion(&mut self) {
        self.body.compute_motion();
    }

    pub fn post_compute(&mut self) {
        self.body.post_compute();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
