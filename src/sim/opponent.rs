//! Computer opponent throw selection
//!
//! Always aims for the button. Imprecision comes from a uniform lateral
//! offset; there is no look-ahead and no reaction to stones in play.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How the opponent converts an aim point into a launch velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrowModel {
    /// Forward speed per unit of launch-to-target distance
    pub force_ratio: f32,
    /// Lateral speed per unit of lateral aim offset
    pub lateral_gain: f32,
    /// Full spread of the lateral error, as a fraction of surface width
    pub error_fraction: f32,
}

impl Default for ThrowModel {
    fn default() -> Self {
        Self {
            force_ratio: 0.155,
            lateral_gain: 0.05,
            error_fraction: 0.1,
        }
    }
}

/// Pick a launch velocity from `launch` toward `target`
///
/// The lateral aim point is shifted by a uniform offset in
/// `[-spread/2, spread/2)` where `spread = error_fraction * surface_width`.
pub fn decide_throw<R: Rng + ?Sized>(
    launch: Vec2,
    target: Vec2,
    surface_width: f32,
    model: &ThrowModel,
    rng: &mut R,
) -> Vec2 {
    let spread = model.error_fraction * surface_width;
    let error_x = (rng.random::<f32>() - 0.5) * spread;

    let force_x = (target.x + error_x - launch.x) * model.lateral_gain;
    let force_y = (target.y - launch.y) * model.force_ratio;

    Vec2::new(force_x, force_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const HACK: Vec2 = Vec2::new(300.0, 900.0);
    const BUTTON: Vec2 = Vec2::new(300.0, 250.0);

    #[test]
    fn test_forward_force_is_fixed_fraction() {
        let mut rng = Pcg32::seed_from_u64(1);
        let vel = decide_throw(HACK, BUTTON, 600.0, &ThrowModel::default(), &mut rng);
        assert!((vel.y - (-650.0 * 0.155)).abs() < 1e-3);
    }

    #[test]
    fn test_lateral_error_is_bounded() {
        let model = ThrowModel::default();
        let mut rng = Pcg32::seed_from_u64(7);
        // Half of 0.1 * 600, scaled by the lateral gain
        let max_lateral = 30.0 * model.lateral_gain;
        for _ in 0..500 {
            let vel = decide_throw(HACK, BUTTON, 600.0, &model, &mut rng);
            assert!(vel.x.abs() <= max_lateral + 1e-5);
        }
    }

    #[test]
    fn test_zero_error_is_dead_center() {
        let model = ThrowModel {
            error_fraction: 0.0,
            ..ThrowModel::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let vel = decide_throw(HACK, BUTTON, 600.0, &model, &mut rng);
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn test_same_seed_same_throw() {
        let model = ThrowModel::default();
        let a = decide_throw(HACK, BUTTON, 600.0, &model, &mut Pcg32::seed_from_u64(42));
        let b = decide_throw(HACK, BUTTON, 600.0, &model, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
