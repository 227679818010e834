pub mod atmosphere;

/// Standard gravity, m/s^2.
pub const G0: f64 = 9.80665;
