//! Curling - a turn-based 2D curling simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (stone physics, collisions, turns, scoring)
//! - `tuning`: Data-driven physics and rule constants
//! - `settings`: Player preferences (difficulty, rink size, seed)
//! - `error`: Configuration loading errors

pub mod error;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use settings::{Difficulty, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (one tick per displayed frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Every stone weighs the same; collisions rely on it
    pub const STONE_MASS: f32 = 20.0;

    /// Default rink dimensions (pixels)
    pub const DEFAULT_RINK_WIDTH: f32 = 600.0;
    pub const DEFAULT_RINK_HEIGHT: f32 = 1000.0;
}

/// Convert a duration in seconds to whole simulation ticks
#[inline]
pub fn seconds_to_ticks(seconds: f32) -> u32 {
    (seconds * consts::TICKS_PER_SECOND as f32).round().max(0.0) as u32
}

/// Rotate a vector by -angle (world frame -> frame whose x axis points along `angle`)
#[inline]
pub fn rotate_into(v: Vec2, sin: f32, cos: f32) -> Vec2 {
    Vec2::new(v.x * cos + v.y * sin, v.y * cos - v.x * sin)
}

/// Rotate a vector by +angle (inverse of [`rotate_into`])
#[inline]
pub fn rotate_out_of(v: Vec2, sin: f32, cos: f32) -> Vec2 {
    Vec2::new(v.x * cos - v.y * sin, v.y * cos + v.x * sin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_round_trip() {
        let angle: f32 = 0.7;
        let (sin, cos) = angle.sin_cos();
        let v = Vec2::new(3.0, -4.0);
        let back = rotate_out_of(rotate_into(v, sin, cos), sin, cos);
        assert!((back - v).length() < 1e-5);
    }

    #[test]
    fn test_rotate_into_aligns_axis() {
        // A vector pointing along the angle lands on +x
        let angle: f32 = 1.2;
        let (sin, cos) = angle.sin_cos();
        let v = Vec2::new(cos, sin) * 5.0;
        let r = rotate_into(v, sin, cos);
        assert!((r.x - 5.0).abs() < 1e-5);
        assert!(r.y.abs() < 1e-5);
    }

    #[test]
    fn test_seconds_to_ticks() {
        assert_eq!(seconds_to_ticks(1.0), 60);
        assert_eq!(seconds_to_ticks(0.1), 6);
        assert_eq!(seconds_to_ticks(-1.0), 0);
    }
}
