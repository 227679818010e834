//! Reconstruction and replay of rocket flight profiles from sparse webcast
//! telemetry.
//!
//! The pipeline has two passes. The replay pass smooths the raw telemetry
//! into a piecewise-polynomial profile, reconciles altitude against the
//! velocity integral and flies a kinematic body along it, recording the
//! (vx, vy) decomposition it used each tick. The model pass then flies a
//! physical rocket (mass, engines, drag, staging) that throttles to chase
//! that recorded velocity profile.

pub mod body;
pub mod gnc;
pub mod io;
pub mod math;
pub mod physics;
pub mod profile;
pub mod sim;
pub mod vehicle;
