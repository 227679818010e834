use log::info;
use nalgebra::Vector3;

use crate::physics::{atmosphere, G0};
use crate::profile::VelocityProfile;
use crate::vehicle::{Engine, Rocket};

use super::config::{MissionConfig, SimConfig};
use super::render::{PlotFrame, PlotSink};

// ---------------------------------------------------------------------------
// Pass 2: physical rocket model chasing the recorded velocity profile
// ---------------------------------------------------------------------------

/// Build the rocket the mission config describes, fully fuelled and sitting
/// on the pad.
fn build_rocket(sim: &SimConfig, mission: &MissionConfig) -> Rocket {
    let engines = (0..mission.engine_count)
        .map(|_| Engine::new(mission.engine_max_thrust, mission.engine_isp))
        .collect();
    Rocket::new(
        mission.rocket_dry_mass(),
        mission.stage1_propellant_mass,
        engines,
        sim.derivative_order,
        sim.time_step,
    )
}

/// Fly a force-driven rocket so that it chases the velocity profile recorded
/// by the replay pass.
///
/// Each tick the required thrust is whatever closes the gap between the
/// current velocity and the profile's command within one time step, split
/// evenly across the engine cluster and clamped by each engine's throttle
/// range. Weight, drag and ground reaction are recomputed from the live
/// state; the upper stage is jettisoned at MECO and the engines shut down.
/// Running out of propellant freezes the vehicle in place for the rest of
/// the run, which makes underfuelled configurations obvious in the plots.
pub fn run_model(
    profile: &VelocityProfile,
    sim: &SimConfig,
    mission: &MissionConfig,
    sink: &PlotSink,
) -> Rocket {
    let mut rocket = build_rocket(sim, mission);
    let pad_weight = G0 * rocket.mass();
    rocket.forces_mut().weight = Vector3::new(0.0, -pad_weight, 0.0);
    rocket.forces_mut().normal = Vector3::new(0.0, pad_weight, 0.0);

    let mut staged = false;
    let mut reported_dry = false;

    for i in 0..sim.model_steps() {
        let t = i as f64 * sim.time_step;
        rocket.pre_compute();

        let position = rocket.state().position();
        let velocity = rocket.state().velocity();

        // Ground handling: below the surface the ground carries every
        // downward force and kills any remaining descent rate
        let reaction = if position.y < 0.0 {
            rocket.forces().ground_reaction()
        } else {
            Vector3::zeros()
        };
        rocket.forces_mut().normal = reaction;
        if position.y < 0.0 && velocity.y < 0.0 {
            rocket.set_velocity(Vector3::zeros());
        }

        let weight = G0 * rocket.mass();
        rocket.forces_mut().weight = Vector3::new(0.0, -weight, 0.0);

        // Drag reads the post-clamp velocity
        let velocity = rocket.state().velocity();
        let speed = velocity.norm();
        rocket.forces_mut().drag = if speed > 0.0 {
            -velocity / speed
                * atmosphere::drag_at_altitude(
                    mission.drag_coefficient,
                    position.y,
                    speed,
                    mission.frontal_area,
                )
        } else {
            Vector3::zeros()
        };

        if rocket.propellant_mass() <= 0.0 {
            if !reported_dry {
                info!("propellant exhausted at t={:.0}s, holding state", t);
                reported_dry = true;
            }
            continue;
        }

        // Throttle to the acceleration that reaches the commanded velocity
        // within one step
        let vx = profile.get_vx(t);
        let vy = profile.get_vy(t);
        let mut dv = Vector3::zeros();
        let mut accel = 0.0;
        if !vx.is_nan() && !vy.is_nan() {
            dv = Vector3::new(vx - velocity.x, vy - velocity.y, 0.0);
            accel = dv.norm() / sim.time_step;
            let force_per_engine = rocket.mass() * accel / mission.engine_count as f64;
            for engine in rocket.engines_mut() {
                let max = engine.max_thrust();
                engine.set_throttle(force_per_engine / max);
            }
        }

        if !staged && t >= mission.meco_time {
            info!(
                "MECO at t={:.0}s with {:.0} kg propellant remaining",
                t,
                rocket.propellant_mass()
            );
            rocket.jettison(mission.upper_mass());
            staged = true;
        }
        if staged {
            for engine in rocket.engines_mut() {
                engine.set_throttle(0.0);
            }
        }

        let thrust_total: f64 = rocket.engines().iter().map(Engine::thrust).sum();
        let burned: f64 = rocket
            .engines()
            .iter()
            .map(|e| e.prop_flow_rate() * sim.time_step)
            .sum();
        rocket.drain_propellant(burned);

        rocket.forces_mut().thrust = if accel > 0.0 {
            dv / (accel * sim.time_step) * thrust_total
        } else {
            Vector3::new(0.0, thrust_total, 0.0)
        };

        rocket.compute_forces();
        rocket.compute_motion();
        rocket.post_compute();

        sink.publish(PlotFrame::from_state(t, rocket.state()));
    }

    info!(
        "model finished: altitude {:.0} m, speed {:.1} m/s, propellant {:.0} kg",
        rocket.state().position().y,
        rocket.state().velocity().norm(),
        rocket.propellant_mass()
    );
    rocket
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
