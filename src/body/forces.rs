use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// Named force set for a force-driven body
// ---------------------------------------------------------------------------

/// The forces acting on a rocket, one named slot each.
///
/// Callers overwrite the slots they model before each compute step; unset
/// slots stay zero. Named fields replace positional force-list indices so a
/// reordered setup cannot silently swap weight and thrust.
#[derive(Debug, Clone, Default)]
pub struct ForceSet {
    pub weight: Vector3<f64>,
    pub normal: Vector3<f64>,
    pub drag: Vector3<f64>,
    pub thrust: Vector3<f64>,
}

impl ForceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Net force, N.
    pub fn net(&self) -> Vector3<f64> {
        self.weight + self.normal + self.drag + self.thrust
    }

    /// Sum of the downward components other than the normal force; the
    /// ground pushes back with exactly this much.
    pub fn ground_reaction(&self) -> Vector3<f64> {
        let mut n = Vector3::zeros();
        for f in [&self.weight, &self.drag, &self.thrust] {
            if f.y < 0.0 {
                n.y -= f.y;
            }
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_sums_all_slots() {
        let mut f = ForceSet::new();
        f.weight = Vector3::new(0.0, -100.0, 0.0);
        f.thrust = Vector3::new(0.0, 150.0, 0.0);
        f.drag = Vector3::new(-5.0, -10.0, 0.0);
        assert_eq!(f.net(), Vector3::new(-5.0, 40.0, 0.0));
    }

    #[test]
    fn ground_reaction_cancels_downward_components() {
        let mut f = ForceSet::new();
        f.weight = Vector3::new(0.0, -100.0, 0.0);
        f.drag = Vector3::new(0.0, -20.0, 0.0);
        f.thrust = Vector3::new(0.0, 50.0, 0.0);
        assert_eq!(f.ground_reaction(), Vector3::new(0.0, 120.0, 0.0));
    }
}
