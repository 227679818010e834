use std::f64::consts::PI;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Simulation + mission configuration
// ---------------------------------------------------------------------------

/// Stepping parameters shared by both simulation passes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Integration time step, s.
    pub time_step: f64,
    /// Duration of the telemetry-replay pass, s.
    pub replay_time: f64,
    /// Duration of the rocket-model pass, s.
    pub model_time: f64,
    /// Tracked derivative count (position, velocity, acceleration, jerk).
    pub derivative_order: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_step: 1.0,
            replay_time: 500.0,
            model_time: 400.0,
            derivative_order: 4,
        }
    }
}

impl SimConfig {
    pub fn replay_steps(&self) -> usize {
        (self.replay_time / self.time_step) as usize
    }

    pub fn model_steps(&self) -> usize {
        (self.model_time / self.time_step) as usize
    }
}

/// Vehicle and mission numbers for the rocket-model pass.
///
/// Defaults describe the Falcon 9 JCSAT-18/KACIFIC1 flight the telemetry
/// was recorded from (spaceflightinsider.com vehicle page, SpaceX users
/// guide for the Merlin figures).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub stage1_dry_mass: f64,        // kg
    pub stage1_propellant_mass: f64, // kg
    pub stage2_dry_mass: f64,        // kg
    pub stage2_propellant_mass: f64, // kg
    pub payload_mass: f64,           // kg
    pub engine_count: usize,
    pub engine_max_thrust: f64,      // N, sea level
    pub engine_isp: f64,             // s
    pub drag_coefficient: f64,
    pub frontal_area: f64,           // m^2
    /// Main-engine cutoff and stage separation time, s.
    pub meco_time: f64,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            stage1_dry_mass: 25_600.0,
            stage1_propellant_mass: 395_700.0,
            stage2_dry_mass: 3_900.0,
            stage2_propellant_mass: 92_670.0,
            payload_mass: 6_800.0,
            engine_count: 9,
            engine_max_thrust: 854_000.0,
            engine_isp: 282.0,
            drag_coefficient: 0.25,
            frontal_area: PI * 2.6 * 2.6,
            meco_time: 155.0,
        }
    }
}

impl MissionConfig {
    /// Everything the first-stage burn carries that is not its propellant.
    pub fn rocket_dry_mass(&self) -> f64 {
        self.stage1_dry_mass + self.stage2_dry_mass + self.stage2_propellant_mass
            + self.payload_mass
    }

    /// Mass separated at MECO: the upper stage plus payload.
    pub fn upper_mass(&self) -> f64 {
        self.stage2_dry_mass + self.stage2_propellant_mass + self.payload_mass
    }
}

/// Root of the TOML configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sim: SimConfig,
    pub mission: MissionConfig,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
