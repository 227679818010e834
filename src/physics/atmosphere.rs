// ---------------------------------------------------------------------------
// Earth atmosphere model (NASA Glenn piecewise fits, 0 to ~120 km)
// ---------------------------------------------------------------------------

/// Static pressure at a given geometric altitude, kPa.
///
/// Three-layer fit: troposphere (< 11 km), lower stratosphere (11-25 km),
/// upper stratosphere (>= 25 km).
pub fn pressure_kpa(alt: f64) -> f64 {
    if alt >= 25_000.0 {
        let t = -131.21 + 0.00299 * alt;
        2.488 * ((t + 273.1) / 216.6).powf(-11.388)
    } else if alt >= 11_000.0 {
        22.65 * (1.73 - 0.000_157 * alt).exp()
    } else {
        let t = 15.04 - 0.006_49 * alt;
        101.29 * ((t + 273.1) / 288.08).powf(5.256)
    }
}

/// Air density at a given geometric altitude, kg/m^3.
///
/// Ideal-gas state equation applied to the layer temperature and pressure.
pub fn density(alt: f64) -> f64 {
    let (t, p) = if alt >= 25_000.0 {
        let t = -131.21 + 0.00299 * alt;
        (t, 2.488 * ((t + 273.1) / 216.6).powf(-11.388))
    } else if alt >= 11_000.0 {
        (-56.46, 22.65 * (1.73 - 0.000_157 * alt).exp())
    } else {
        let t = 15.04 - 0.006_49 * alt;
        (t, 101.29 * ((t + 273.1) / 288.08).powf(5.256))
    };
    p / (0.2869 * (t + 273.1))
}

/// Quadratic drag force magnitude, N: F = cd * rho * v^2 / 2 * area.
pub fn drag(cd: f64, rho: f64, v: f64, area: f64) -> f64 {
    cd * rho * v * v / 2.0 * area
}

/// Drag force magnitude at a given altitude on Earth, N.
pub fn drag_at_altitude(cd: f64, alt: f64, v: f64, area: f64) -> f64 {
    drag(cd, density(alt.max(0.0)), v, area)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
